use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Macos,
    Linux,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Self::Macos,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Macos => "darwin",
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "aarch64")]
    Aarch64,
    #[serde(rename = "other")]
    Other,
}

impl Arch {
    pub fn current() -> Self {
        match std::env::consts::ARCH {
            "x86_64" => Self::X86_64,
            "aarch64" => Self::Aarch64,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
            Self::Other => "other",
        }
    }
}

/// How the proving artifact is delivered on this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Binary,
    Container,
}

/// Result of resolving the artifact for the current platform/arch pair.
/// Recomputed on demand; the probe never fails, it degrades to
/// `exists: false, executable: false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescriptor {
    pub platform: Platform,
    pub arch: Arch,
    pub path: PathBuf,
    pub exists: bool,
    pub executable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessState {
    NotStarted,
    Starting,
    Running,
    Stopping,
    Stopped,
    Error,
}

impl ProcessState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Error => "error",
        }
    }

    /// A live state owns an OS-level handle; at most one live handle may
    /// exist per artifact kind at any time.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Starting | Self::Running | Self::Stopping)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Error)
    }
}

/// Public view of one supervised OS process. The supervisor owns the mutable
/// record; everything handed outward is a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    /// OS pid for binary artifacts, container id for container artifacts.
    pub handle_id: String,
    pub pid: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub state: ProcessState,
    pub exit_code: Option<i32>,
    pub termination_signal: Option<String>,
}

/// Reconciled point-in-time status. Derived, immutable, compared by value to
/// drive the adaptive polling schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub is_supported: bool,
    pub is_installed: bool,
    pub is_executable: bool,
    pub is_running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    Synthesize,
    Preprocess,
    Prove,
    Verify,
}

impl PipelineStage {
    /// Subcommand spelling on the artifact's CLI surface.
    pub fn subcommand(self) -> &'static str {
        match self {
            Self::Synthesize => "synthesize",
            Self::Preprocess => "preprocess",
            Self::Prove => "prove",
            Self::Verify => "verify",
        }
    }
}

/// Completion record for one pipeline-stage run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRunRecord {
    pub id: String,
    pub stage: PipelineStage,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub output_bytes: usize,
    pub error: Option<String>,
}

/// Runtime configuration. The timeout defaults mirror the constants the
/// control panel has always shipped with; they are configurable, not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleConfig {
    pub artifact_kind: ArtifactKind,
    /// Directory the installer drops the binary into. Defaults to
    /// `<data dir>/bin` when unset.
    pub artifact_dir: Option<PathBuf>,
    /// Full override of the artifact path; wins over `artifact_dir`.
    pub artifact_path: Option<PathBuf>,
    pub container_runtime: String,
    pub container_image: String,
    /// Arguments used when the reconciler starts the daemon implicitly.
    pub daemon_args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub process_env: BTreeMap<String, String>,
    pub startup_grace_ms: u64,
    pub graceful_stop_ms: u64,
    pub forced_kill_wait_ms: u64,
    pub execute_timeout_ms: u64,
    pub poll_fast_ms: u64,
    pub poll_slow_ms: u64,
    /// Consecutive identical polls before the reconciler relaxes to the slow
    /// interval.
    pub stable_poll_threshold: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            artifact_kind: ArtifactKind::Binary,
            artifact_dir: None,
            artifact_path: None,
            container_runtime: "docker".to_string(),
            container_image: "zkprover/pipeline".to_string(),
            daemon_args: Vec::new(),
            working_dir: None,
            process_env: BTreeMap::new(),
            startup_grace_ms: 1_000,
            graceful_stop_ms: 5_000,
            forced_kill_wait_ms: 1_000,
            execute_timeout_ms: 30_000,
            poll_fast_ms: 2_000,
            poll_slow_ms: 10_000,
            stable_poll_threshold: 3,
        }
    }
}

impl ConsoleConfig {
    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }

    pub fn graceful_stop(&self) -> Duration {
        Duration::from_millis(self.graceful_stop_ms)
    }

    pub fn forced_kill_wait(&self) -> Duration {
        Duration::from_millis(self.forced_kill_wait_ms)
    }

    pub fn execute_timeout(&self) -> Duration {
        Duration::from_millis(self.execute_timeout_ms)
    }

    pub fn poll_fast(&self) -> Duration {
        Duration::from_millis(self.poll_fast_ms)
    }

    pub fn poll_slow(&self) -> Duration {
        Duration::from_millis(self.poll_slow_ms)
    }
}
