use crate::models::ConsoleConfig;
use crate::reconciler::StatusReconciler;
use crate::supervisor::ProcessSupervisor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio::time::{timeout, Duration};

/// Drains every supervised process before the host application is allowed to
/// exit. Runs at most once; a second exit signal arriving mid-drain is
/// ignored rather than restarting the sequence. Every step is best-effort: a
/// failure is logged and the sequence still runs to completion, because a
/// shutdown must never hang the application.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    supervisors: Vec<ProcessSupervisor>,
    reconcilers: Vec<StatusReconciler>,
    engaged: Arc<AtomicBool>,
    drain_bound: Duration,
}

impl ShutdownCoordinator {
    pub fn new(
        config: &ConsoleConfig,
        supervisors: Vec<ProcessSupervisor>,
        reconcilers: Vec<StatusReconciler>,
    ) -> Self {
        // Graceful wait plus the forced-kill window, with slack for signal
        // delivery and runtime round-trips.
        let drain_bound =
            config.graceful_stop() + config.forced_kill_wait() + Duration::from_secs(2);
        Self {
            supervisors,
            reconcilers,
            engaged: Arc::new(AtomicBool::new(false)),
            drain_bound,
        }
    }

    /// Returns `true` when this call performed the drain, `false` when a
    /// drain was already in flight.
    pub async fn run(&self) -> bool {
        if self.engaged.swap(true, Ordering::SeqCst) {
            tracing::info!("shutdown already in progress; ignoring repeat signal");
            return false;
        }
        tracing::info!(
            supervisors = self.supervisors.len(),
            "draining external processes before exit"
        );

        let mut drains = JoinSet::new();
        for supervisor in self.supervisors.iter().cloned() {
            drains.spawn(async move { supervisor.stop(None).await });
        }

        let drain_all = async {
            while let Some(joined) = drains.join_next().await {
                match joined {
                    Ok(Ok(_)) => {}
                    Ok(Err(error)) => {
                        tracing::warn!(error = %error, "supervisor stop failed during shutdown");
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "shutdown drain task failed");
                    }
                }
            }
        };
        if timeout(self.drain_bound, drain_all).await.is_err() {
            tracing::warn!(
                bound_ms = self.drain_bound.as_millis() as u64,
                "shutdown drain timed out; proceeding with exit"
            );
        }

        // Release supervisor-held resources: subscriber slots referencing
        // terminated handles and the background polling loops.
        for supervisor in &self.supervisors {
            supervisor.unsubscribe_stream();
        }
        for reconciler in &self.reconcilers {
            reconciler.stop_polling();
        }

        tracing::info!("shutdown drain complete");
        true
    }
}
