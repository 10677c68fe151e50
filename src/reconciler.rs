use crate::container::ContainerRuntime;
use crate::errors::{ConsoleError, ConsoleResult};
use crate::locator::ArtifactLocator;
use crate::models::{ArtifactKind, ConsoleConfig, StatusSnapshot};
use crate::supervisor::ProcessSupervisor;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

type InitReceiver = watch::Receiver<Option<ConsoleResult<StatusSnapshot>>>;

/// Chooses the next polling delay: frequent while status is unstable, relaxed
/// once a run of identical snapshots shows steady state. Any change resets
/// the run.
#[derive(Debug, Default)]
struct PollPacer {
    stable_polls: u32,
}

impl PollPacer {
    fn observe(&mut self, changed: bool, config: &ConsoleConfig) -> Duration {
        if changed {
            self.stable_polls = 0;
        } else {
            self.stable_polls = self.stable_polls.saturating_add(1);
        }
        if self.stable_polls >= config.stable_poll_threshold {
            config.poll_slow()
        } else {
            config.poll_fast()
        }
    }
}

/// Computes reconciled status snapshots and collapses concurrent
/// initialization requests into a single in-flight operation. Many UI
/// surfaces call `ensure_initialized` without coordinating; exactly one
/// underlying start must result.
#[derive(Clone)]
pub struct StatusReconciler {
    config: Arc<ConsoleConfig>,
    locator: Arc<ArtifactLocator>,
    runtime: ContainerRuntime,
    supervisor: ProcessSupervisor,
    in_flight: Arc<Mutex<Option<InitReceiver>>>,
    publisher: Arc<watch::Sender<StatusSnapshot>>,
    poll_task: Arc<StdMutex<Option<JoinHandle<()>>>>,
}

impl StatusReconciler {
    pub fn new(
        config: ConsoleConfig,
        locator: ArtifactLocator,
        runtime: ContainerRuntime,
        supervisor: ProcessSupervisor,
    ) -> Self {
        let (publisher, _) = watch::channel(StatusSnapshot::default());
        Self {
            config: Arc::new(config),
            locator: Arc::new(locator),
            runtime,
            supervisor,
            in_flight: Arc::new(Mutex::new(None)),
            publisher: Arc::new(publisher),
            poll_task: Arc::new(StdMutex::new(None)),
        }
    }

    /// Fresh snapshot from the locator and the supervisor's current handle;
    /// never cached beyond the caller's own use.
    pub async fn status(&self) -> StatusSnapshot {
        let is_supported = self.locator.is_supported();
        let is_running = self.supervisor.current_state() == crate::models::ProcessState::Running;

        match self.config.artifact_kind {
            ArtifactKind::Binary => {
                let descriptor = self.locator.locate();
                StatusSnapshot {
                    is_supported,
                    is_installed: descriptor.exists,
                    is_executable: descriptor.executable,
                    is_running,
                }
            }
            ArtifactKind::Container => {
                let container_id = self
                    .supervisor
                    .current_info()
                    .filter(|info| info.pid.is_none())
                    .map(|info| info.handle_id);
                let status = self
                    .runtime
                    .inspect(&self.config.container_image, container_id.as_deref())
                    .await;
                StatusSnapshot {
                    is_supported,
                    is_installed: status.runtime_available && status.image_exists,
                    is_executable: status.runtime_available,
                    is_running,
                }
            }
        }
    }

    /// Make the daemon ready, collapsing concurrent callers onto one
    /// in-flight operation. The first caller owns the work; everyone else
    /// awaits the same receiver and observes the identical outcome.
    pub async fn ensure_initialized(&self) -> ConsoleResult<StatusSnapshot> {
        let mut receiver = {
            let mut guard = self.in_flight.lock().await;
            match guard.as_ref() {
                Some(receiver) => receiver.clone(),
                None => {
                    let (sender, receiver) = watch::channel(None);
                    *guard = Some(receiver.clone());
                    let reconciler = self.clone();
                    tokio::spawn(async move {
                        let result = reconciler.initialize().await;
                        let _ = sender.send(Some(result));
                        let mut guard = reconciler.in_flight.lock().await;
                        *guard = None;
                    });
                    receiver
                }
            }
        };

        loop {
            {
                let value = receiver.borrow_and_update();
                if let Some(result) = value.as_ref() {
                    return result.clone();
                }
            }
            if receiver.changed().await.is_err() {
                return Err(ConsoleError::Internal(
                    "initialization task terminated".to_string(),
                ));
            }
        }
    }

    async fn initialize(&self) -> ConsoleResult<StatusSnapshot> {
        let snapshot = self.status().await;
        if !snapshot.is_running {
            self.supervisor.start(&self.config.daemon_args).await?;
        }
        let fresh = self.status().await;
        self.publish(fresh);
        Ok(fresh)
    }

    /// Debounced status feed: subscribers only observe changes.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.publisher.subscribe()
    }

    fn publish(&self, snapshot: StatusSnapshot) {
        self.publisher.send_if_modified(|current| {
            if *current != snapshot {
                *current = snapshot;
                true
            } else {
                false
            }
        });
    }

    /// Background polling loop on the adaptive schedule. Idempotent: a
    /// second call while a loop is live is a no-op.
    pub fn start_polling(&self) {
        let mut slot = self.poll_task.lock().expect("poll task lock");
        if slot.is_some() {
            return;
        }
        let reconciler = self.clone();
        *slot = Some(tokio::spawn(async move {
            let mut pacer = PollPacer::default();
            let mut last: Option<StatusSnapshot> = None;
            loop {
                let snapshot = reconciler.status().await;
                let changed = last.as_ref() != Some(&snapshot);
                if changed {
                    tracing::debug!(
                        installed = snapshot.is_installed,
                        running = snapshot.is_running,
                        "status changed"
                    );
                    reconciler.publish(snapshot);
                }
                last = Some(snapshot);
                let delay = pacer.observe(changed, &reconciler.config);
                tokio::time::sleep(delay).await;
            }
        }));
    }

    /// Abort the polling loop; part of supervisor resource release at
    /// shutdown.
    pub fn stop_polling(&self) {
        let mut slot = self.poll_task.lock().expect("poll task lock");
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PollPacer, StatusReconciler};
    use crate::container::ContainerRuntime;
    use crate::errors::ConsoleError;
    use crate::locator::ArtifactLocator;
    use crate::models::{Arch, ConsoleConfig, Platform};
    use crate::supervisor::ProcessSupervisor;
    use std::path::Path;

    fn reconciler_for(platform: Platform, arch: Arch) -> StatusReconciler {
        let config = ConsoleConfig::default();
        let locator =
            ArtifactLocator::for_target(platform, arch, Path::new("/tmp/console"), &config);
        let runtime = ContainerRuntime::new(config.container_runtime.clone());
        let supervisor = ProcessSupervisor::new(config.clone(), locator.clone(), runtime.clone());
        StatusReconciler::new(config, locator, runtime, supervisor)
    }

    #[test]
    fn pacer_relaxes_after_stable_run_and_resets_on_change() {
        let config = ConsoleConfig::default();
        let mut pacer = PollPacer::default();

        assert_eq!(pacer.observe(true, &config), config.poll_fast());
        assert_eq!(pacer.observe(false, &config), config.poll_fast());
        assert_eq!(pacer.observe(false, &config), config.poll_fast());
        assert_eq!(pacer.observe(false, &config), config.poll_slow());
        assert_eq!(pacer.observe(false, &config), config.poll_slow());
        // A change snaps back to the frequent interval.
        assert_eq!(pacer.observe(true, &config), config.poll_fast());
    }

    #[tokio::test]
    async fn unsupported_platform_is_reported_not_running() {
        let reconciler = reconciler_for(Platform::Other, Arch::Other);
        let snapshot = reconciler.status().await;
        assert!(!snapshot.is_supported);
        assert!(!snapshot.is_running);
    }

    #[tokio::test]
    async fn concurrent_initializations_observe_the_same_failure() {
        let reconciler = reconciler_for(Platform::Linux, Arch::X86_64);
        let (first, second) = tokio::join!(
            reconciler.ensure_initialized(),
            reconciler.ensure_initialized()
        );
        // No artifact installed: both callers get the one underlying outcome.
        assert!(matches!(first, Err(ConsoleError::NotInstalled(_))));
        assert!(matches!(second, Err(ConsoleError::NotInstalled(_))));
    }
}
