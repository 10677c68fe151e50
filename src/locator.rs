use crate::models::{Arch, ArtifactDescriptor, ConsoleConfig, Platform};
use std::path::{Path, PathBuf};

/// (platform, arch) pairs the proving artifact is published for. Anything
/// else short-circuits every downstream operation with `NOT_SUPPORTED`.
const SUPPORTED_TARGETS: &[(Platform, Arch)] = &[
    (Platform::Macos, Arch::Aarch64),
    (Platform::Macos, Arch::X86_64),
    (Platform::Linux, Arch::X86_64),
    (Platform::Linux, Arch::Aarch64),
    (Platform::Windows, Arch::X86_64),
];

const ARTIFACT_STEM: &str = "zkprover";

/// Resolves the expected artifact location for the current platform/arch and
/// probes whether it exists and is runnable. Pure apart from a stat call;
/// probe failures degrade to `exists: false`, they never propagate.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    platform: Platform,
    arch: Arch,
    base_dir: PathBuf,
    override_path: Option<PathBuf>,
}

impl ArtifactLocator {
    pub fn new(data_dir: &Path, config: &ConsoleConfig) -> Self {
        Self::for_target(Platform::current(), Arch::current(), data_dir, config)
    }

    pub fn for_target(
        platform: Platform,
        arch: Arch,
        data_dir: &Path,
        config: &ConsoleConfig,
    ) -> Self {
        let base_dir = config
            .artifact_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("bin"));
        Self {
            platform,
            arch,
            base_dir,
            override_path: config.artifact_path.clone(),
        }
    }

    pub fn target(&self) -> (Platform, Arch) {
        (self.platform, self.arch)
    }

    pub fn is_supported(&self) -> bool {
        SUPPORTED_TARGETS
            .iter()
            .any(|(platform, arch)| *platform == self.platform && *arch == self.arch)
    }

    pub fn locate(&self) -> ArtifactDescriptor {
        let path = self.expected_path();
        let (exists, executable) = probe(&path);
        ArtifactDescriptor {
            platform: self.platform,
            arch: self.arch,
            path,
            exists,
            executable,
        }
    }

    pub fn expected_path(&self) -> PathBuf {
        match &self.override_path {
            Some(path) => path.clone(),
            None => self.base_dir.join(self.artifact_file_name()),
        }
    }

    fn artifact_file_name(&self) -> String {
        let mut name = format!(
            "{}-{}-{}",
            ARTIFACT_STEM,
            self.arch.as_str(),
            self.platform.as_str()
        );
        if self.platform == Platform::Windows {
            name.push_str(".exe");
        }
        name
    }
}

fn probe(path: &Path) -> (bool, bool) {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return (false, false),
    };
    if !metadata.is_file() {
        return (false, false);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        (true, metadata.permissions().mode() & 0o111 != 0)
    }

    #[cfg(not(unix))]
    {
        // Windows has no execute bit; installers only drop .exe artifacts.
        let runnable = path
            .extension()
            .and_then(|value| value.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("exe"))
            .unwrap_or(false);
        (true, runnable)
    }
}
