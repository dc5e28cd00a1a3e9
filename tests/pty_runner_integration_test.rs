//! Runs real commands under a pseudo-terminal through `sh`.

use std::sync::Arc;
use xcodebuild_runner::domain::ports::ProcessRunner;
use xcodebuild_runner::{
    BuildRunner, Config, ExitStatus, FailureReason, PassBasis, PtyConfig, PtyProcessRunner,
    RunnerError, Verdict,
};

fn sh_runner() -> PtyProcessRunner {
    PtyProcessRunner::new(PtyConfig::default().with_shell("sh"))
}

#[tokio::test]
async fn test_pty_reports_child_exit_code() {
    let runner = sh_runner();
    let mut sink = |_: &str| {};

    let captured = runner
        .run("printf 'building\\n'; exit 3", &mut sink)
        .await
        .expect("run should complete");

    assert_eq!(captured.exit_status, ExitStatus::Known(3));
    assert_eq!(captured.log.lines(), ["building"]);
    assert!(captured.pid.is_some());
    assert_eq!(runner.active_pid(), None);
}

#[tokio::test]
async fn test_pty_lines_are_sanitized_before_callback() {
    let runner = sh_runner();
    let mut seen = Vec::new();
    let mut sink = |line: &str| seen.push(line.to_string());

    let captured = runner
        .run(
            "printf '\\033[1;32mAnalyze Foo.m\\033[0m\\n\\n   \\nDone\\n'",
            &mut sink,
        )
        .await
        .expect("run should complete");

    assert_eq!(captured.exit_status, ExitStatus::Known(0));
    assert_eq!(seen, ["Analyze Foo.m", "Done"]);
    assert_eq!(captured.log.lines(), seen.as_slice());
}

#[tokio::test]
async fn test_pty_keeps_unterminated_last_line() {
    let runner = sh_runner();
    let mut sink = |_: &str| {};

    let captured = runner
        .run("printf 'first\\nno newline'", &mut sink)
        .await
        .expect("run should complete");

    assert_eq!(captured.log.lines(), ["first", "no newline"]);
}

#[tokio::test]
async fn test_pty_silent_child_yields_empty_log() {
    let runner = sh_runner();
    let mut sink = |_: &str| {};

    let captured = tokio_test::assert_ok!(runner.run("exit 0", &mut sink).await);

    assert!(captured.log.is_empty());
    assert_eq!(captured.exit_status, ExitStatus::Known(0));
}

#[tokio::test]
async fn test_pty_rejects_empty_command() {
    let runner = sh_runner();
    let mut sink = |_: &str| {};

    let result = runner.run("  ", &mut sink).await;
    assert!(matches!(result, Err(RunnerError::EmptyCommand)));
}

#[tokio::test]
async fn test_pty_runner_is_reusable_after_a_run() {
    let runner = sh_runner();
    let mut sink = |_: &str| {};

    let first = runner.run("exit 1", &mut sink).await.unwrap();
    let second = runner.run("exit 2", &mut sink).await.unwrap();

    assert_eq!(first.exit_status, ExitStatus::Known(1));
    assert_eq!(second.exit_status, ExitStatus::Known(2));
}

#[tokio::test]
async fn test_build_runner_over_pty_uses_exit_code() {
    let build = BuildRunner::new(Arc::new(sh_runner()), Config::default());
    let mut sink = |_: &str| {};

    let report = build
        .run_command("printf '** TEST FAILED **\\n'; exit 65", &mut sink)
        .await
        .unwrap();

    assert_eq!(report.verdict, Verdict::exit_code_failure(65));
    assert_eq!(report.verdict.exit_code(), 65);
}

#[tokio::test]
async fn test_build_runner_over_pty_gates_analyzer_alerts() {
    let mut config = Config::default();
    config.clang_analyzer.fail_build = true;
    config.clang_analyzer.threshold = 1;
    let build = BuildRunner::new(Arc::new(sh_runner()), config);
    let mut sink = |_: &str| {};

    let report = build
        .run_command(
            "printf 'Analyze A.m\\nAnalyze B.m\\n(2 commands with analyzer issues)\\n'",
            &mut sink,
        )
        .await
        .unwrap();

    assert_eq!(report.run.analyzer_alerts(), ["A.m", "B.m"]);
    assert_eq!(
        report.verdict,
        Verdict::failed(FailureReason::AnalyzerThresholdExceeded {
            alerts: 2,
            threshold: 1
        })
    );

    let mut relaxed = Config::default();
    relaxed.clang_analyzer.threshold = 5;
    relaxed.clang_analyzer.fail_build = true;
    let build = BuildRunner::new(Arc::new(sh_runner()), relaxed);
    let report = build.run_command("printf 'ok\\n'", &mut sink).await.unwrap();
    assert_eq!(report.verdict, Verdict::passed(PassBasis::ExitCode));
}
