use crate::errors::{ConsoleError, ConsoleResult};
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::timeout;

const PROBE_TIMEOUT: Duration = Duration::from_secs(3);
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Answer from the runtime's status surface. Defaults are the conservative
/// "not ready" reading used whenever the runtime is slow or absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerStatus {
    pub runtime_available: bool,
    pub image_exists: bool,
    pub is_running: bool,
}

/// Thin client over the container runtime's command-line surface. The
/// runtime itself is opaque; this only spawns, signals, and inspects.
#[derive(Debug, Clone)]
pub struct ContainerRuntime {
    program: String,
}

impl ContainerRuntime {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn capture<I, S>(&self, args: I, bound: Duration) -> ConsoleResult<std::process::Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        timeout(bound, command.output())
            .await
            .map_err(|_| ConsoleError::Timeout(format!("{} command timed out", self.program)))?
            .map_err(|error| ConsoleError::Io(error.to_string()))
    }

    /// Black-box status query. Every probe is bounded; a slow or failing
    /// runtime degrades to the conservative default rather than propagating.
    pub async fn inspect(&self, image: &str, container_id: Option<&str>) -> ContainerStatus {
        let runtime_available = match self.capture(["version"], PROBE_TIMEOUT).await {
            Ok(output) => output.status.success(),
            Err(error) => {
                tracing::debug!(runtime = %self.program, error = %error, "runtime probe failed");
                false
            }
        };
        if !runtime_available {
            return ContainerStatus::default();
        }

        let image_exists = matches!(
            self.capture(["image", "inspect", image], PROBE_TIMEOUT).await,
            Ok(output) if output.status.success()
        );

        let is_running = match container_id {
            Some(id) => match self
                .capture(["inspect", "--format", "{{.State.Running}}", id], PROBE_TIMEOUT)
                .await
            {
                Ok(output) if output.status.success() => {
                    String::from_utf8_lossy(&output.stdout).trim() == "true"
                }
                _ => false,
            },
            None => false,
        };

        ContainerStatus {
            runtime_available,
            image_exists,
            is_running,
        }
    }

    /// `run -d` the image and return the container id printed by the runtime.
    pub async fn run_detached(&self, image: &str, args: &[String]) -> ConsoleResult<String> {
        let mut full_args = vec!["run".to_string(), "--rm".to_string(), "-d".to_string()];
        full_args.push(image.to_string());
        full_args.extend_from_slice(args);

        let output = self.capture(&full_args, LAUNCH_TIMEOUT).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConsoleError::SpawnFailed(format!(
                "container launch failed: {}",
                stderr.trim()
            )));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(ConsoleError::SpawnFailed(
                "runtime reported no container id".to_string(),
            ));
        }
        Ok(id)
    }

    /// Polite stop; the runtime forwards the graceful signal and waits up to
    /// `grace` before killing on its own.
    pub async fn stop(&self, id: &str, grace: Duration) -> ConsoleResult<()> {
        let grace_secs = grace.as_secs().max(1).to_string();
        let bound = grace + Duration::from_secs(2);
        let output = self.capture(["stop", "-t", grace_secs.as_str(), id], bound).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ConsoleError::Io(format!(
                "container stop failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    /// Unconditional kill, used when the graceful path times out.
    pub async fn kill(&self, id: &str) -> ConsoleResult<()> {
        let output = self.capture(["kill", id], PROBE_TIMEOUT).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ConsoleError::Io(format!(
                "container kill failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    /// Command builder for `exec` inside a running container; the caller
    /// applies its own timeout and stream handling.
    pub fn exec_command(&self, id: &str, command: &[String]) -> Command {
        let mut exec = Command::new(&self.program);
        exec.arg("exec").arg(id).args(command);
        exec
    }

    /// Follow the container's log streams; stdout/stderr of the returned
    /// child mirror the container's own channels.
    pub fn logs_follow(&self, id: &str) -> ConsoleResult<Child> {
        let mut command = Command::new(&self.program);
        command
            .args(["logs", "--follow", id])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
            .spawn()
            .map_err(|error| ConsoleError::Io(format!("failed to follow container logs: {error}")))
    }
}

#[cfg(test)]
mod tests {
    use super::ContainerRuntime;

    #[tokio::test]
    async fn absent_runtime_degrades_to_not_ready() {
        let runtime = ContainerRuntime::new("definitely-not-a-container-runtime");
        let status = runtime.inspect("zkprover/pipeline", Some("abc123")).await;
        assert!(!status.runtime_available);
        assert!(!status.image_exists);
        assert!(!status.is_running);
    }

    #[tokio::test]
    async fn launch_against_absent_runtime_is_an_error_not_a_panic() {
        let runtime = ContainerRuntime::new("definitely-not-a-container-runtime");
        let result = runtime.run_detached("zkprover/pipeline", &[]).await;
        assert!(result.is_err());
    }
}
