#![allow(dead_code)]

use prover_console::{ArtifactLocator, ConsoleConfig, ContainerRuntime, ProcessSupervisor};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Copy the mock artifact into a scratch directory with the execute bit set.
pub fn install_fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("zkprover");
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mock-zkprover.sh");
    std::fs::copy(&source, &target).expect("copy fixture");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fixture");
    }

    (dir, target)
}

/// Defaults shrunk so lifecycle tests finish quickly; the ratios between the
/// windows are preserved.
pub fn fast_config(artifact: &Path) -> ConsoleConfig {
    let mut config = ConsoleConfig::default();
    config.artifact_path = Some(artifact.to_path_buf());
    config.startup_grace_ms = 200;
    config.graceful_stop_ms = 2_000;
    config.forced_kill_wait_ms = 500;
    config.execute_timeout_ms = 5_000;
    config.poll_fast_ms = 100;
    config.poll_slow_ms = 500;
    config
}

pub fn build_supervisor(config: &ConsoleConfig, data_dir: &Path) -> ProcessSupervisor {
    let locator = ArtifactLocator::new(data_dir, config);
    let runtime = ContainerRuntime::new(config.container_runtime.clone());
    ProcessSupervisor::new(config.clone(), locator, runtime)
}
