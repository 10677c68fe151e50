mod console;
mod container;
mod errors;
mod locator;
mod models;
mod pipeline;
mod reconciler;
mod shutdown;
mod stream;
mod supervisor;

pub use console::ConsoleCore;
pub use container::{ContainerRuntime, ContainerStatus};
pub use errors::{ConsoleError, ConsoleResult};
pub use locator::ArtifactLocator;
pub use models::{
    Arch, ArtifactDescriptor, ArtifactKind, ConsoleConfig, PipelineStage, Platform, ProcessInfo,
    ProcessState, StageRunRecord, StatusSnapshot,
};
pub use pipeline::PipelineRunner;
pub use reconciler::StatusReconciler;
pub use shutdown::ShutdownCoordinator;
pub use stream::{StreamChannel, StreamEvent};
pub use supervisor::ProcessSupervisor;

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// File-backed structured logging for the whole panel. Call once at startup;
/// the writer guard lives for the process.
pub fn init_tracing(data_dir: &Path) -> Result<(), String> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "console.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}
