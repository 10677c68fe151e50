use crate::container::ContainerRuntime;
use crate::errors::{ConsoleError, ConsoleResult};
use crate::locator::ArtifactLocator;
use crate::models::{ArtifactKind, ConsoleConfig, ProcessInfo, ProcessState};
use crate::stream::{strip_ansi, LineSplitter, StreamChannel, StreamEvent, SubscriberSlot};
use chrono::Utc;
use std::collections::VecDeque;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use tokio::io::{AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, Mutex};
use tokio::time::{timeout, Duration, Instant};

const MAX_STREAM_PENDING_BYTES: usize = 2_000_000;
const STDERR_TAIL_LINES: usize = 20;
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone)]
enum ActiveHandle {
    Binary {
        child: Arc<Mutex<Child>>,
        pid: u32,
    },
    Container {
        id: String,
        logs: Option<Arc<Mutex<Child>>>,
    },
}

struct HandleCell {
    lifecycle: ProcessState,
    info: Option<ProcessInfo>,
    active: Option<ActiveHandle>,
    /// Incremented per spawn so stale monitor tasks cannot mutate the state
    /// of a newer handle.
    epoch: u64,
}

#[derive(Default)]
struct TerminationOutcome {
    exit_code: Option<i32>,
    signal: Option<String>,
}

/// Owns the single live process for one artifact kind and funnels every
/// lifecycle mutation through itself. All public operations are async; the
/// caller suspends until the relevant transition or timeout completes.
///
/// Cheap to clone; clones share the same supervised handle.
#[derive(Clone)]
pub struct ProcessSupervisor {
    config: Arc<ConsoleConfig>,
    locator: Arc<ArtifactLocator>,
    runtime: ContainerRuntime,
    /// Serializes start/stop so state transitions are totally ordered.
    op_lock: Arc<Mutex<()>>,
    cell: Arc<StdMutex<HandleCell>>,
    subscriber: SubscriberSlot,
    spawn_attempts: Arc<AtomicU64>,
}

impl ProcessSupervisor {
    pub fn new(config: ConsoleConfig, locator: ArtifactLocator, runtime: ContainerRuntime) -> Self {
        Self {
            config: Arc::new(config),
            locator: Arc::new(locator),
            runtime,
            op_lock: Arc::new(Mutex::new(())),
            cell: Arc::new(StdMutex::new(HandleCell {
                lifecycle: ProcessState::NotStarted,
                info: None,
                active: None,
                epoch: 0,
            })),
            subscriber: SubscriberSlot::new(),
            spawn_attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn current_state(&self) -> ProcessState {
        self.cell.lock().expect("supervisor cell lock").lifecycle
    }

    pub fn current_info(&self) -> Option<ProcessInfo> {
        self.cell.lock().expect("supervisor cell lock").info.clone()
    }

    /// OS spawn attempts made over this supervisor's lifetime; exposed for
    /// runner metrics and instrumented tests.
    pub fn spawn_attempts(&self) -> u64 {
        self.spawn_attempts.load(Ordering::SeqCst)
    }

    pub fn subscribe_stream(&self) -> mpsc::UnboundedReceiver<StreamEvent> {
        self.subscriber.subscribe()
    }

    pub fn unsubscribe_stream(&self) {
        self.subscriber.unsubscribe()
    }

    /// Start the supervised process. A call while a live handle exists
    /// returns that handle instead of spawning a duplicate; a call from a
    /// terminal state spawns fresh.
    pub async fn start(&self, args: &[String]) -> ConsoleResult<ProcessInfo> {
        let _op = self.op_lock.lock().await;

        {
            let cell = self.cell.lock().expect("supervisor cell lock");
            if cell.lifecycle.is_live() {
                let info = cell
                    .info
                    .clone()
                    .ok_or_else(|| ConsoleError::Internal("live process without handle info".to_string()))?;
                tracing::debug!(handle = %info.handle_id, "start requested while live; returning existing handle");
                return Ok(info);
            }
        }

        self.preflight().await?;

        let epoch = {
            let mut cell = self.cell.lock().expect("supervisor cell lock");
            cell.lifecycle = ProcessState::Starting;
            cell.info = None;
            cell.active = None;
            cell.epoch += 1;
            cell.epoch
        };

        let started = match self.config.artifact_kind {
            ArtifactKind::Binary => self.start_binary(args, epoch).await,
            ArtifactKind::Container => self.start_container(args, epoch).await,
        };

        match started {
            Ok(info) => Ok(info),
            Err(error) => {
                let mut cell = self.cell.lock().expect("supervisor cell lock");
                if cell.epoch == epoch {
                    cell.lifecycle = ProcessState::Error;
                    cell.active = None;
                }
                Err(error)
            }
        }
    }

    /// Checks that never require an OS spawn attempt: unsupported targets and
    /// absent artifacts are rejected up front with their dedicated kinds.
    async fn preflight(&self) -> ConsoleResult<()> {
        if !self.locator.is_supported() {
            let (platform, arch) = self.locator.target();
            return Err(ConsoleError::NotSupported(format!(
                "{}/{} is not a supported target",
                platform.as_str(),
                arch.as_str()
            )));
        }

        match self.config.artifact_kind {
            ArtifactKind::Binary => {
                let descriptor = self.locator.locate();
                if !descriptor.exists {
                    return Err(ConsoleError::NotInstalled(format!(
                        "artifact not found at {}",
                        descriptor.path.display()
                    )));
                }
                if !descriptor.executable {
                    return Err(ConsoleError::NotExecutable(format!(
                        "artifact at {} lacks execute permission",
                        descriptor.path.display()
                    )));
                }
            }
            ArtifactKind::Container => {
                let status = self.runtime.inspect(&self.config.container_image, None).await;
                if !status.runtime_available {
                    return Err(ConsoleError::NotInstalled(format!(
                        "container runtime '{}' is unavailable",
                        self.runtime.program()
                    )));
                }
                if !status.image_exists {
                    return Err(ConsoleError::NotInstalled(format!(
                        "image '{}' is not present",
                        self.config.container_image
                    )));
                }
            }
        }
        Ok(())
    }

    async fn start_binary(&self, args: &[String], epoch: u64) -> ConsoleResult<ProcessInfo> {
        let descriptor = self.locator.locate();
        self.spawn_attempts.fetch_add(1, Ordering::SeqCst);

        let mut command = Command::new(&descriptor.path);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        for (key, value) in &self.config.process_env {
            command.env(key, value);
        }

        let mut child = command.spawn().map_err(|error| {
            ConsoleError::SpawnFailed(format!(
                "failed to spawn {}: {}",
                descriptor.path.display(),
                error
            ))
        })?;
        let started_at = Utc::now();

        let pid = child.id().ok_or_else(|| {
            ConsoleError::SpawnFailed("process exited before a pid was observed".to_string())
        })?;

        let stderr_tail = Arc::new(StdMutex::new(VecDeque::new()));
        if let Some(stdout) = child.stdout.take() {
            self.spawn_stream_pump(stdout, StreamChannel::Stdout, None);
        }
        if let Some(stderr) = child.stderr.take() {
            self.spawn_stream_pump(stderr, StreamChannel::Stderr, Some(stderr_tail.clone()));
        }
        let child = Arc::new(Mutex::new(child));

        // Grace window: a crash right after spawn is a failed start, not a
        // running process.
        let deadline = Instant::now() + self.config.startup_grace();
        loop {
            let status = {
                let mut child = child.lock().await;
                child
                    .try_wait()
                    .map_err(|error| ConsoleError::Io(format!("failed to poll startup status: {error}")))?
            };
            if let Some(status) = status {
                let tail = drain_tail(&stderr_tail);
                let detail = if tail.is_empty() {
                    String::new()
                } else {
                    format!(": {tail}")
                };
                return Err(ConsoleError::SpawnFailed(format!(
                    "process exited during startup (status {:?}){detail}",
                    status.code()
                )));
            }
            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let info = ProcessInfo {
            handle_id: pid.to_string(),
            pid: Some(pid),
            started_at,
            state: ProcessState::Running,
            exit_code: None,
            termination_signal: None,
        };
        {
            let mut cell = self.cell.lock().expect("supervisor cell lock");
            cell.lifecycle = ProcessState::Running;
            cell.info = Some(info.clone());
            cell.active = Some(ActiveHandle::Binary {
                child: child.clone(),
                pid,
            });
        }
        self.spawn_binary_exit_monitor(epoch, child);
        tracing::info!(pid = pid, "external process running");
        Ok(info)
    }

    async fn start_container(&self, args: &[String], epoch: u64) -> ConsoleResult<ProcessInfo> {
        self.spawn_attempts.fetch_add(1, Ordering::SeqCst);
        let id = self
            .runtime
            .run_detached(&self.config.container_image, args)
            .await?;
        let started_at = Utc::now();

        let logs = match self.runtime.logs_follow(&id) {
            Ok(mut logs) => {
                if let Some(stdout) = logs.stdout.take() {
                    self.spawn_stream_pump(stdout, StreamChannel::Stdout, None);
                }
                if let Some(stderr) = logs.stderr.take() {
                    self.spawn_stream_pump(stderr, StreamChannel::Stderr, None);
                }
                Some(Arc::new(Mutex::new(logs)))
            }
            Err(error) => {
                tracing::warn!(container = %id, error = %error, "log streaming unavailable");
                None
            }
        };

        tokio::time::sleep(self.config.startup_grace()).await;
        let status = self
            .runtime
            .inspect(&self.config.container_image, Some(&id))
            .await;
        if !status.is_running {
            if let Some(logs) = &logs {
                let _ = logs.lock().await.start_kill();
            }
            return Err(ConsoleError::SpawnFailed(format!(
                "container {id} exited during startup"
            )));
        }

        let info = ProcessInfo {
            handle_id: id.clone(),
            pid: None,
            started_at,
            state: ProcessState::Running,
            exit_code: None,
            termination_signal: None,
        };
        {
            let mut cell = self.cell.lock().expect("supervisor cell lock");
            cell.lifecycle = ProcessState::Running;
            cell.info = Some(info.clone());
            cell.active = Some(ActiveHandle::Container {
                id: id.clone(),
                logs,
            });
        }
        self.spawn_container_exit_monitor(epoch, id.clone());
        tracing::info!(container = %id, "container running");
        Ok(info)
    }

    /// Stop the supervised process: graceful signal, bounded wait, forced
    /// kill, bounded wait, then `Stopped` unconditionally. Idempotent:
    /// stopping a terminal handle is a no-op success. With `pid` given, only
    /// a matching live process is stopped (`false` otherwise).
    pub async fn stop(&self, pid: Option<u32>) -> ConsoleResult<bool> {
        let _op = self.op_lock.lock().await;

        let (active, epoch) = {
            let mut cell = self.cell.lock().expect("supervisor cell lock");
            if !cell.lifecycle.is_live() {
                return Ok(true);
            }
            if let Some(requested) = pid {
                let current = cell.info.as_ref().and_then(|info| info.pid);
                if current != Some(requested) {
                    return Ok(false);
                }
            }
            cell.lifecycle = ProcessState::Stopping;
            if let Some(info) = cell.info.as_mut() {
                info.state = ProcessState::Stopping;
            }
            (cell.active.clone(), cell.epoch)
        };

        let outcome = match active {
            Some(ActiveHandle::Binary { child, pid }) => self.stop_binary(child, pid).await,
            Some(ActiveHandle::Container { id, logs }) => self.stop_container(&id, logs).await,
            None => TerminationOutcome::default(),
        };

        let mut cell = self.cell.lock().expect("supervisor cell lock");
        if cell.epoch == epoch {
            cell.lifecycle = ProcessState::Stopped;
            cell.active = None;
            if let Some(info) = cell.info.as_mut() {
                info.state = ProcessState::Stopped;
                info.exit_code = outcome.exit_code.or(info.exit_code);
                info.termination_signal = outcome.signal.or(info.termination_signal.take());
            }
        }
        Ok(true)
    }

    async fn stop_binary(&self, child: Arc<Mutex<Child>>, pid: u32) -> TerminationOutcome {
        request_graceful_termination(pid);

        if let Some(status) = wait_with_deadline(&child, self.config.graceful_stop()).await {
            return termination_outcome(&status);
        }

        tracing::warn!(pid = pid, "graceful stop timed out; escalating to kill");
        {
            let mut child = child.lock().await;
            let _ = child.start_kill();
        }
        if let Some(status) = wait_with_deadline(&child, self.config.forced_kill_wait()).await {
            return termination_outcome(&status);
        }

        // Best-effort past this point; never block the caller indefinitely.
        tracing::error!(pid = pid, "process survived the forced kill window");
        TerminationOutcome::default()
    }

    async fn stop_container(
        &self,
        id: &str,
        logs: Option<Arc<Mutex<Child>>>,
    ) -> TerminationOutcome {
        if let Err(error) = self.runtime.stop(id, self.config.graceful_stop()).await {
            tracing::warn!(container = %id, error = %error, "graceful container stop failed; killing");
            if let Err(error) = self.runtime.kill(id).await {
                tracing::error!(container = %id, error = %error, "container kill failed");
            }
        }
        if let Some(logs) = logs {
            let _ = logs.lock().await.start_kill();
        }
        TerminationOutcome::default()
    }

    /// Run a client command against the live daemon: a one-shot invocation of
    /// the artifact binary, or `exec` inside the running container. Requires
    /// `Running`; starting is an explicit, separate decision left to the
    /// caller.
    pub async fn execute(&self, command: &[String]) -> ConsoleResult<String> {
        self.run_client_command(command, false).await
    }

    /// Same contract as [`execute`], additionally forwarding output lines to
    /// the registered stream subscriber as they arrive.
    ///
    /// [`execute`]: ProcessSupervisor::execute
    pub async fn execute_streaming(&self, command: &[String]) -> ConsoleResult<String> {
        self.run_client_command(command, true).await
    }

    async fn run_client_command(
        &self,
        command: &[String],
        stream_events: bool,
    ) -> ConsoleResult<String> {
        if command.is_empty() {
            return Err(ConsoleError::Internal("empty command".to_string()));
        }

        let mut invocation = {
            let cell = self.cell.lock().expect("supervisor cell lock");
            if cell.lifecycle != ProcessState::Running {
                return Err(ConsoleError::NotRunning("process is not running".to_string()));
            }
            match &cell.active {
                Some(ActiveHandle::Container { id, .. }) => self.runtime.exec_command(id, command),
                _ => {
                    let descriptor = self.locator.locate();
                    let mut client = Command::new(&descriptor.path);
                    client.args(command);
                    if let Some(dir) = &self.config.working_dir {
                        client.current_dir(dir);
                    }
                    for (key, value) in &self.config.process_env {
                        client.env(key, value);
                    }
                    client
                }
            }
        };
        invocation
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = invocation
            .spawn()
            .map_err(|error| ConsoleError::SpawnFailed(format!("failed to spawn command: {error}")))?;

        let stdout_lines: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let stderr_lines: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let stdout_task = child
            .stdout
            .take()
            .map(|stream| self.spawn_capture(stream, StreamChannel::Stdout, stdout_lines.clone(), stream_events));
        let stderr_task = child
            .stderr
            .take()
            .map(|stream| self.spawn_capture(stream, StreamChannel::Stderr, stderr_lines.clone(), stream_events));

        let waited = timeout(self.config.execute_timeout(), child.wait()).await;

        let status = match waited {
            Ok(Ok(status)) => Some(status),
            Ok(Err(error)) => {
                return Err(ConsoleError::Io(format!("failed to await command: {error}")));
            }
            Err(_) => {
                let _ = child.start_kill();
                let _ = timeout(Duration::from_secs(1), child.wait()).await;
                None
            }
        };

        if let Some(task) = stdout_task {
            let _ = task.await;
        }
        if let Some(task) = stderr_task {
            let _ = task.await;
        }

        let stdout_text = joined(&stdout_lines);
        let Some(status) = status else {
            // Timed out: partial stdout is the best-effort result.
            tracing::warn!(
                timeout_ms = self.config.execute_timeout_ms,
                "command timed out; returning partial output"
            );
            return Ok(stdout_text);
        };

        let stderr_text = joined(&stderr_lines);
        if !stderr_text.trim().is_empty() {
            return Err(ConsoleError::Io(format!(
                "command reported errors: {}",
                stderr_text.trim()
            )));
        }
        if !status.success() {
            return Err(ConsoleError::Io(format!(
                "command exited with status {:?}",
                status.code()
            )));
        }
        Ok(stdout_text)
    }

    fn spawn_stream_pump<R>(
        &self,
        stream: R,
        channel: StreamChannel,
        tail: Option<Arc<StdMutex<VecDeque<String>>>>,
    ) where
        R: tokio::io::AsyncRead + Unpin + Send + 'static,
    {
        let slot = self.subscriber.clone();
        tokio::spawn(async move {
            let mut reader = BufReader::new(stream);
            let mut chunk = vec![0_u8; 4096];
            let mut splitter = LineSplitter::new(Some(MAX_STREAM_PENDING_BYTES));
            loop {
                match reader.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(size) => {
                        for line in splitter.push(&chunk[..size]) {
                            deliver_line(&slot, channel, tail.as_ref(), line);
                        }
                        let dropped = splitter.take_dropped_bytes();
                        if dropped > 0 {
                            tracing::warn!(
                                channel = channel.as_str(),
                                bytes = dropped,
                                "stream buffer trimmed"
                            );
                        }
                    }
                    Err(error) => {
                        tracing::warn!(channel = channel.as_str(), error = %error, "stream read failed");
                        break;
                    }
                }
            }
            if let Some(rest) = splitter.finish() {
                deliver_line(&slot, channel, tail.as_ref(), rest);
            }
        });
    }

    fn spawn_capture<R>(
        &self,
        stream: R,
        channel: StreamChannel,
        sink: Arc<StdMutex<Vec<String>>>,
        stream_events: bool,
    ) -> tokio::task::JoinHandle<()>
    where
        R: tokio::io::AsyncRead + Unpin + Send + 'static,
    {
        let slot = self.subscriber.clone();
        tokio::spawn(async move {
            let mut reader = BufReader::new(stream);
            let mut chunk = vec![0_u8; 4096];
            let mut splitter = LineSplitter::new(Some(MAX_STREAM_PENDING_BYTES));
            let handle_line = |line: String| {
                let line = strip_ansi(&line);
                if line.is_empty() {
                    return;
                }
                if stream_events {
                    slot.emit_line(channel, line.clone());
                }
                sink.lock().expect("capture sink lock").push(line);
            };
            loop {
                match reader.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(size) => {
                        for line in splitter.push(&chunk[..size]) {
                            handle_line(line);
                        }
                    }
                    Err(error) => {
                        tracing::warn!(channel = channel.as_str(), error = %error, "capture read failed");
                        break;
                    }
                }
            }
            if let Some(rest) = splitter.finish() {
                handle_line(rest);
            }
        })
    }

    fn spawn_binary_exit_monitor(&self, epoch: u64, child: Arc<Mutex<Child>>) {
        let supervisor = self.clone();
        tokio::spawn(async move {
            loop {
                let status = {
                    let mut child = child.lock().await;
                    child.try_wait()
                };
                match status {
                    Ok(Some(status)) => {
                        supervisor.record_unsolicited_exit(epoch, &status);
                        break;
                    }
                    Ok(None) => tokio::time::sleep(Duration::from_millis(250)).await,
                    Err(error) => {
                        tracing::warn!(error = %error, "exit poll failed");
                        break;
                    }
                }
                if !supervisor.epoch_is_current(epoch) {
                    break;
                }
            }
        });
    }

    fn spawn_container_exit_monitor(&self, epoch: u64, id: String) {
        let supervisor = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(supervisor.config.poll_fast()).await;
                if !supervisor.epoch_is_current(epoch) {
                    break;
                }
                let status = supervisor
                    .runtime
                    .inspect(&supervisor.config.container_image, Some(&id))
                    .await;
                if !status.is_running {
                    supervisor.record_container_exit(epoch, &id);
                    break;
                }
            }
        });
    }

    fn record_unsolicited_exit(&self, epoch: u64, status: &std::process::ExitStatus) {
        let mut cell = self.cell.lock().expect("supervisor cell lock");
        if cell.epoch != epoch || cell.lifecycle != ProcessState::Running {
            // A stop() in flight owns this transition.
            return;
        }
        cell.lifecycle = ProcessState::Stopped;
        cell.active = None;
        if let Some(info) = cell.info.as_mut() {
            info.state = ProcessState::Stopped;
            info.exit_code = status.code();
            info.termination_signal = exit_signal_name(status);
        }
        tracing::warn!(exit_code = ?status.code(), "external process exited unsolicited");
    }

    fn record_container_exit(&self, epoch: u64, id: &str) {
        let mut cell = self.cell.lock().expect("supervisor cell lock");
        if cell.epoch != epoch || cell.lifecycle != ProcessState::Running {
            return;
        }
        cell.lifecycle = ProcessState::Stopped;
        cell.active = None;
        if let Some(info) = cell.info.as_mut() {
            info.state = ProcessState::Stopped;
        }
        tracing::warn!(container = %id, "container exited unsolicited");
    }

    fn epoch_is_current(&self, epoch: u64) -> bool {
        self.cell.lock().expect("supervisor cell lock").epoch == epoch
    }
}

fn deliver_line(
    slot: &SubscriberSlot,
    channel: StreamChannel,
    tail: Option<&Arc<StdMutex<VecDeque<String>>>>,
    line: String,
) {
    let line = strip_ansi(&line);
    if line.is_empty() {
        return;
    }
    if let Some(tail) = tail {
        let mut tail = tail.lock().expect("stderr tail lock");
        tail.push_back(line.clone());
        while tail.len() > STDERR_TAIL_LINES {
            tail.pop_front();
        }
    }
    slot.emit(StreamEvent { channel, line });
}

fn drain_tail(tail: &Arc<StdMutex<VecDeque<String>>>) -> String {
    let mut tail = tail.lock().expect("stderr tail lock");
    tail.drain(..).collect::<Vec<_>>().join("\n")
}

fn joined(lines: &Arc<StdMutex<Vec<String>>>) -> String {
    lines.lock().expect("capture sink lock").join("\n")
}

async fn wait_with_deadline(
    child: &Arc<Mutex<Child>>,
    bound: Duration,
) -> Option<std::process::ExitStatus> {
    let deadline = Instant::now() + bound;
    loop {
        let status = {
            let mut child = child.lock().await;
            child.try_wait()
        };
        match status {
            Ok(Some(status)) => return Some(status),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(error = %error, "termination poll failed");
                return None;
            }
        }
        if Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(EXIT_POLL_INTERVAL).await;
    }
}

fn request_graceful_termination(pid: u32) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;
        let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
    }

    #[cfg(windows)]
    {
        let _ = std::process::Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/T"])
            .spawn();
    }
}

fn termination_outcome(status: &std::process::ExitStatus) -> TerminationOutcome {
    TerminationOutcome {
        exit_code: status.code(),
        signal: exit_signal_name(status),
    }
}

#[cfg(unix)]
fn exit_signal_name(status: &std::process::ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|signal| format!("signal {signal}"))
}

#[cfg(not(unix))]
fn exit_signal_name(_status: &std::process::ExitStatus) -> Option<String> {
    None
}
