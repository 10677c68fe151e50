use thiserror::Error;

/// Crate-wide error taxonomy. Every async operation resolves to a value or to
/// one of these kinds; raw OS errors never cross the crate boundary.
///
/// Variants are `Clone` (string payloads only) so a deduplicated
/// initialization can hand the same outcome to every waiting caller.
#[derive(Debug, Clone, Error)]
pub enum ConsoleError {
    /// The current platform/architecture pair is outside the allow-list.
    /// Fatal to the whole feature; retrying cannot help.
    #[error("NOT_SUPPORTED: {0}")]
    NotSupported(String),
    /// The artifact is absent from its expected location. Recoverable by the
    /// installer collaborator, not by this crate.
    #[error("NOT_INSTALLED: {0}")]
    NotInstalled(String),
    #[error("NOT_EXECUTABLE: {0}")]
    NotExecutable(String),
    /// An operation required a live process and none exists.
    #[error("NOT_RUNNING: {0}")]
    NotRunning(String),
    /// The OS rejected the spawn, or the process crashed inside the startup
    /// grace window. Callers may retry `start()`.
    #[error("SPAWN_FAILED: {0}")]
    SpawnFailed(String),
    #[error("TIMEOUT: {0}")]
    Timeout(String),
    #[error("IO_FAILURE: {0}")]
    Io(String),
    #[error("INTERNAL: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ConsoleError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<anyhow::Error> for ConsoleError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
