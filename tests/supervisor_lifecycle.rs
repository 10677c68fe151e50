#![cfg(unix)]

mod common;

use common::{build_supervisor, fast_config, install_fixture};
use prover_console::{ConsoleError, ProcessState, StreamChannel};
use std::time::{Duration, Instant};

#[tokio::test]
async fn start_reports_running_with_pid_within_grace() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    let started = Instant::now();
    let info = supervisor.start(&[]).await.expect("start daemon");
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(info.state, ProcessState::Running);
    assert!(info.pid.is_some());
    assert_eq!(supervisor.current_state(), ProcessState::Running);

    assert!(supervisor.stop(None).await.expect("stop daemon"));
}

#[tokio::test]
async fn concurrent_starts_share_one_process() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    let (first, second) = tokio::join!(supervisor.start(&[]), supervisor.start(&[]));
    let first = first.expect("first start");
    let second = second.expect("second start");
    assert_eq!(first.handle_id, second.handle_id);
    assert_eq!(supervisor.spawn_attempts(), 1);

    // A third start while running returns the same handle without spawning.
    let third = supervisor.start(&[]).await.expect("third start");
    assert_eq!(third.handle_id, first.handle_id);
    assert_eq!(supervisor.spawn_attempts(), 1);

    assert!(supervisor.stop(None).await.expect("stop daemon"));
}

#[tokio::test]
async fn execute_runs_a_client_command_against_the_daemon() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor.start(&[]).await.expect("start daemon");
    let output = supervisor
        .execute(&["echo".to_string(), "ok".to_string()])
        .await
        .expect("execute echo");
    assert!(output.contains("ok"));

    assert!(supervisor.stop(None).await.expect("stop daemon"));
    let status = supervisor.current_info().expect("info after stop");
    assert_eq!(status.state, ProcessState::Stopped);
}

#[tokio::test]
async fn stop_is_idempotent_on_a_terminal_handle() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor.start(&[]).await.expect("start daemon");
    assert!(supervisor.stop(None).await.expect("first stop"));
    assert_eq!(supervisor.current_state(), ProcessState::Stopped);
    assert!(supervisor.stop(None).await.expect("second stop"));
}

#[tokio::test]
async fn stop_with_mismatched_pid_declines() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    let info = supervisor.start(&[]).await.expect("start daemon");
    let wrong_pid = info.pid.expect("pid").wrapping_add(1);
    assert!(!supervisor.stop(Some(wrong_pid)).await.expect("mismatched stop"));
    assert_eq!(supervisor.current_state(), ProcessState::Running);

    assert!(supervisor.stop(info.pid).await.expect("matching stop"));
    assert_eq!(supervisor.current_state(), ProcessState::Stopped);
}

#[tokio::test]
async fn stop_is_bounded_even_when_term_is_ignored() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor
        .start(&["stubborn".to_string()])
        .await
        .expect("start stubborn daemon");

    let started = Instant::now();
    assert!(supervisor.stop(None).await.expect("stop"));
    let elapsed = started.elapsed();
    // Graceful window plus forced-kill window plus scheduling slack.
    assert!(
        elapsed < Duration::from_millis(config.graceful_stop_ms + config.forced_kill_wait_ms + 1_500),
        "stop took {elapsed:?}"
    );
    assert_eq!(supervisor.current_state(), ProcessState::Stopped);
}

#[tokio::test]
async fn crash_inside_grace_window_is_a_failed_start() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    let error = supervisor
        .start(&["die".to_string()])
        .await
        .expect_err("immediate crash must fail the start");
    assert!(matches!(error, ConsoleError::SpawnFailed(_)));
    assert!(error.to_string().contains("startup"));
    assert_eq!(supervisor.current_state(), ProcessState::Error);

    // A terminal error state permits a fresh start.
    let info = supervisor.start(&[]).await.expect("restart after error");
    assert_eq!(info.state, ProcessState::Running);
    assert!(supervisor.stop(None).await.expect("stop"));
}

#[tokio::test]
async fn unsolicited_exit_is_recorded_as_stopped() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor
        .start(&["short".to_string()])
        .await
        .expect("start short-lived process");
    assert_eq!(supervisor.current_state(), ProcessState::Running);

    let deadline = Instant::now() + Duration::from_secs(5);
    while supervisor.current_state() != ProcessState::Stopped {
        assert!(Instant::now() < deadline, "exit was never observed");
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let info = supervisor.current_info().expect("info after exit");
    assert_eq!(info.exit_code, Some(0));
}

#[tokio::test]
async fn streamed_output_preserves_emission_order() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor.start(&[]).await.expect("start daemon");
    let mut receiver = supervisor.subscribe_stream();

    let output = supervisor
        .execute_streaming(&["count".to_string()])
        .await
        .expect("execute count");
    assert_eq!(
        output,
        "line 1\nline 2\nline 3\nline 4\nline 5"
    );

    for index in 1..=5 {
        let event = receiver.try_recv().expect("stream event");
        assert_eq!(event.channel, StreamChannel::Stdout);
        assert_eq!(event.line, format!("line {index}"));
    }

    supervisor.unsubscribe_stream();
    assert!(supervisor.stop(None).await.expect("stop"));
}

#[tokio::test]
async fn switching_subscribers_cuts_off_the_old_stream() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor.start(&[]).await.expect("start daemon");

    let mut first = supervisor.subscribe_stream();
    supervisor
        .execute_streaming(&["echo".to_string(), "before".to_string()])
        .await
        .expect("first streamed command");
    assert_eq!(first.try_recv().expect("first event").line, "before");

    let mut second = supervisor.subscribe_stream();
    supervisor
        .execute_streaming(&["echo".to_string(), "after".to_string()])
        .await
        .expect("second streamed command");

    // The displaced subscriber sees closure, never the later event.
    assert!(first.try_recv().is_err());
    assert_eq!(second.try_recv().expect("second event").line, "after");

    assert!(supervisor.stop(None).await.expect("stop"));
}

#[tokio::test]
async fn execute_converts_stderr_into_an_error() {
    let (dir, artifact) = install_fixture();
    let config = fast_config(&artifact);
    let supervisor = build_supervisor(&config, dir.path());

    supervisor.start(&[]).await.expect("start daemon");
    let error = supervisor
        .execute(&["fail".to_string()])
        .await
        .expect_err("stderr output must fail the command");
    assert!(error.to_string().contains("proof rejected"));

    assert!(supervisor.stop(None).await.expect("stop"));
}

#[tokio::test]
async fn execute_timeout_returns_partial_stdout() {
    let (dir, artifact) = install_fixture();
    let mut config = fast_config(&artifact);
    config.execute_timeout_ms = 500;
    let supervisor = build_supervisor(&config, dir.path());

    supervisor.start(&[]).await.expect("start daemon");
    let started = Instant::now();
    let output = supervisor
        .execute(&["drip".to_string()])
        .await
        .expect("timeout resolves with partial output");
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(output.contains("tick 1"));
    assert!(!output.contains("tick 2"));

    assert!(supervisor.stop(None).await.expect("stop"));
}
