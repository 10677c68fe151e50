use crate::errors::ConsoleResult;
use crate::models::{PipelineStage, StageRunRecord};
use crate::reconciler::StatusReconciler;
use crate::supervisor::ProcessSupervisor;
use chrono::Utc;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use uuid::Uuid;

/// Drives one pipeline stage at a time through the supervised daemon and
/// keeps the completion ledger the UI lists. Readiness is delegated to the
/// reconciler so stage requests from independent surfaces share one
/// initialization.
#[derive(Clone)]
pub struct PipelineRunner {
    reconciler: StatusReconciler,
    supervisor: ProcessSupervisor,
    records: Arc<StdMutex<Vec<StageRunRecord>>>,
}

impl PipelineRunner {
    pub fn new(reconciler: StatusReconciler, supervisor: ProcessSupervisor) -> Self {
        Self {
            reconciler,
            supervisor,
            records: Arc::new(StdMutex::new(Vec::new())),
        }
    }

    /// Run a stage to completion, streaming its output to the registered
    /// subscriber. Every attempt leaves a completion record, failures
    /// included.
    pub async fn run_stage(
        &self,
        stage: PipelineStage,
        extra_args: &[String],
    ) -> ConsoleResult<StageRunRecord> {
        self.reconciler.ensure_initialized().await?;

        let started_at = Utc::now();
        let mut command = vec![stage.subcommand().to_string()];
        command.extend_from_slice(extra_args);

        let result = self.supervisor.execute_streaming(&command).await;
        let finished_at = Utc::now();

        let record = match &result {
            Ok(output) => StageRunRecord {
                id: Uuid::new_v4().to_string(),
                stage,
                started_at,
                finished_at,
                success: true,
                exit_code: Some(0),
                output_bytes: output.len(),
                error: None,
            },
            Err(error) => StageRunRecord {
                id: Uuid::new_v4().to_string(),
                stage,
                started_at,
                finished_at,
                success: false,
                exit_code: None,
                output_bytes: 0,
                error: Some(error.to_string()),
            },
        };

        tracing::info!(
            stage = stage.subcommand(),
            success = record.success,
            duration_ms = (finished_at - started_at).num_milliseconds(),
            "pipeline stage finished"
        );
        self.records
            .lock()
            .expect("stage ledger lock")
            .push(record.clone());

        result.map(|_| record)
    }

    pub fn list_stage_runs(&self) -> Vec<StageRunRecord> {
        self.records.lock().expect("stage ledger lock").clone()
    }
}
