use crate::container::ContainerRuntime;
use crate::errors::ConsoleResult;
use crate::locator::ArtifactLocator;
use crate::models::{ConsoleConfig, PipelineStage, ProcessInfo, StageRunRecord, StatusSnapshot};
use crate::pipeline::PipelineRunner;
use crate::reconciler::StatusReconciler;
use crate::shutdown::ShutdownCoordinator;
use crate::stream::StreamEvent;
use crate::supervisor::ProcessSupervisor;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// The command surface the UI layer talks to. Owns one supervisor per
/// configured artifact kind plus the reconciler, stage ledger, and shutdown
/// coordinator wired over them.
pub struct ConsoleCore {
    supervisor: ProcessSupervisor,
    reconciler: StatusReconciler,
    pipeline: PipelineRunner,
    shutdown: ShutdownCoordinator,
}

impl ConsoleCore {
    pub fn new(config: ConsoleConfig, data_dir: PathBuf) -> Arc<Self> {
        let locator = ArtifactLocator::new(&data_dir, &config);
        let runtime = ContainerRuntime::new(config.container_runtime.clone());
        let supervisor = ProcessSupervisor::new(config.clone(), locator.clone(), runtime.clone());
        let reconciler =
            StatusReconciler::new(config.clone(), locator, runtime, supervisor.clone());
        let pipeline = PipelineRunner::new(reconciler.clone(), supervisor.clone());
        let shutdown = ShutdownCoordinator::new(
            &config,
            vec![supervisor.clone()],
            vec![reconciler.clone()],
        );

        Arc::new(Self {
            supervisor,
            reconciler,
            pipeline,
            shutdown,
        })
    }

    /// Kick off the background status polling loop.
    pub fn start_status_polling(&self) {
        self.reconciler.start_polling();
    }

    pub async fn start(&self, args: Vec<String>) -> ConsoleResult<ProcessInfo> {
        self.supervisor.start(&args).await
    }

    pub async fn stop(&self, pid: Option<u32>) -> ConsoleResult<bool> {
        self.supervisor.stop(pid).await
    }

    pub async fn get_status(&self) -> StatusSnapshot {
        self.reconciler.status().await
    }

    pub async fn execute(&self, command: Vec<String>) -> ConsoleResult<String> {
        self.supervisor.execute(&command).await
    }

    pub async fn execute_streaming(&self, command: Vec<String>) -> ConsoleResult<String> {
        self.supervisor.execute_streaming(&command).await
    }

    pub fn subscribe_stream(&self) -> mpsc::UnboundedReceiver<StreamEvent> {
        self.supervisor.subscribe_stream()
    }

    pub fn unsubscribe_stream(&self) {
        self.supervisor.unsubscribe_stream()
    }

    pub async fn ensure_initialized(&self) -> ConsoleResult<StatusSnapshot> {
        self.reconciler.ensure_initialized().await
    }

    pub fn subscribe_status(&self) -> watch::Receiver<StatusSnapshot> {
        self.reconciler.subscribe()
    }

    pub async fn run_stage(
        &self,
        stage: PipelineStage,
        extra_args: Vec<String>,
    ) -> ConsoleResult<StageRunRecord> {
        self.pipeline.run_stage(stage, &extra_args).await
    }

    pub fn list_stage_runs(&self) -> Vec<StageRunRecord> {
        self.pipeline.list_stage_runs()
    }

    /// Drain all supervised processes; only after this resolves may the host
    /// application exit. Safe to call from multiple exit paths.
    pub async fn shutdown(&self) -> bool {
        self.shutdown.run().await
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleCore;
    use crate::models::ConsoleConfig;

    #[tokio::test]
    async fn fresh_core_reports_not_running() {
        let dir = tempfile::tempdir().expect("tempdir");
        let core = ConsoleCore::new(ConsoleConfig::default(), dir.path().to_path_buf());
        let status = core.get_status().await;
        assert!(!status.is_running);
        // Nothing live: stopping is a no-op success, shutdown drains nothing.
        assert!(core.stop(None).await.expect("stop"));
        assert!(core.shutdown().await);
    }
}
