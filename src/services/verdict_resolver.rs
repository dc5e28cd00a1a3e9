//! Pass/fail resolution for a finished run.
//!
//! The child's exit code is authoritative. When the pseudo-terminal closed
//! before a status could be collected, the last log line is checked against
//! the test runner's summary phrases, and anything unrecognised counts as a
//! failure. Runs that survive that step are then gated on analyzer alerts.

use tracing::{error, info, warn};

use crate::domain::models::{
    ClangAnalyzerConfig, CompletedRun, ExitStatus, FailureReason, PassBasis, Verdict,
};

/// Summary phrase of a fully green test run.
const NO_FAILURES_MARKER: &str = "with 0 failures";

/// Phrase printed by the build tool when any test failed.
const TEST_FAILED_MARKER: &str = "TEST FAILED";

/// Resolves the verdict of a run under a fixed analyzer policy.
#[derive(Debug, Clone, Default)]
pub struct VerdictResolver {
    analyzer: ClangAnalyzerConfig,
}

impl VerdictResolver {
    pub const fn new(analyzer: ClangAnalyzerConfig) -> Self {
        Self { analyzer }
    }

    /// Classify the build/test portion, then apply analyzer gating.
    pub fn resolve(&self, run: &CompletedRun) -> Verdict {
        let build = Self::classify_build(run.exit_status(), run.log().last());
        if !build.is_passed() {
            return build;
        }
        self.gate_analyzer(build, run.analyzer_alerts().len())
    }

    /// Verdict of the build/test portion alone.
    pub fn classify_build(exit_status: ExitStatus, last_line: Option<&str>) -> Verdict {
        match exit_status {
            ExitStatus::Known(0) => Verdict::passed(PassBasis::ExitCode),
            ExitStatus::Known(code) => {
                error!(code, "Build tool exited with non-zero status");
                Verdict::exit_code_failure(code)
            }
            ExitStatus::Unknown => {
                warn!("Unable to get build tool exit status, checking log for test results...");
                Self::classify_from_log(last_line)
            }
        }
    }

    fn classify_from_log(last_line: Option<&str>) -> Verdict {
        let last_line = last_line.unwrap_or_default();

        if last_line.contains(NO_FAILURES_MARKER) {
            info!("Looks like all the tests passed");
            Verdict::passed(PassBasis::NoFailuresMarker)
        } else if last_line.contains(TEST_FAILED_MARKER) {
            error!("TEST FAILED detected, exiting with non-zero status code");
            Verdict::failed(FailureReason::TestFailedMarker)
        } else {
            warn!(
                last_line,
                "Unable to determine test status from build log, did something terrible happen?"
            );
            Verdict::failed(FailureReason::Indeterminate)
        }
    }

    /// Fail a passing build when analyzer gating is on and alerts exceed the threshold.
    pub fn gate_analyzer(&self, build: Verdict, alert_count: usize) -> Verdict {
        if !self.analyzer.fail_build {
            return build;
        }

        let threshold = self.analyzer.threshold;
        if alert_count > threshold {
            error!(
                alerts = alert_count,
                threshold, "Analyzer warnings exceeded threshold, failing build"
            );
            return Verdict::failed(FailureReason::AnalyzerThresholdExceeded {
                alerts: alert_count,
                threshold,
            });
        }
        build
    }
}
