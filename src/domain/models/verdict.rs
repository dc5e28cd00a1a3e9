//! Pass/fail classification of a finished run.

use serde::Serialize;
use std::fmt;

/// Exit code used for every failure that did not come from the child itself.
pub const HEURISTIC_FAILURE_CODE: i32 = 1;

/// Outcome of one supervised run.
///
/// The caller at the process boundary exits with [`Verdict::exit_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    Passed { basis: PassBasis },
    Failed { reason: FailureReason, exit_code: i32 },
}

/// Why a run was judged successful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassBasis {
    /// The child exited with status zero
    ExitCode,
    /// No status was available, but the log ended with a zero-failure summary
    NoFailuresMarker,
}

/// Why a run was judged a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    ExitCode { code: i32 },
    TestFailedMarker,
    Indeterminate,
    AnalyzerThresholdExceeded { alerts: usize, threshold: usize },
}

impl Verdict {
    pub const fn passed(basis: PassBasis) -> Self {
        Self::Passed { basis }
    }

    /// A failure that carries the child's own exit code.
    pub const fn exit_code_failure(code: i32) -> Self {
        Self::Failed {
            reason: FailureReason::ExitCode { code },
            exit_code: code,
        }
    }

    /// A failure derived by this runner rather than reported by the child.
    pub const fn failed(reason: FailureReason) -> Self {
        Self::Failed {
            reason,
            exit_code: HEURISTIC_FAILURE_CODE,
        }
    }

    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Passed { .. } => 0,
            Self::Failed { exit_code, .. } => *exit_code,
        }
    }

    pub const fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            Self::Passed { .. } => None,
            Self::Failed { reason, .. } => Some(*reason),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExitCode { code } => write!(f, "build tool exited with status {code}"),
            Self::TestFailedMarker => write!(f, "TEST FAILED detected in build log"),
            Self::Indeterminate => {
                write!(f, "unable to determine test status from build log")
            }
            Self::AnalyzerThresholdExceeded { alerts, threshold } => write!(
                f,
                "{alerts} analyzer alert(s) exceeded threshold of {threshold}"
            ),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed { .. } => write!(f, "PASSED"),
            Self::Failed { reason, .. } => write!(f, "FAILED ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Verdict::passed(PassBasis::ExitCode).exit_code(), 0);
        assert_eq!(Verdict::exit_code_failure(65).exit_code(), 65);
        assert_eq!(Verdict::failed(FailureReason::Indeterminate).exit_code(), 1);
    }

    #[test]
    fn test_failure_reason_accessor() {
        assert!(Verdict::passed(PassBasis::NoFailuresMarker)
            .failure_reason()
            .is_none());
        assert_eq!(
            Verdict::failed(FailureReason::TestFailedMarker).failure_reason(),
            Some(FailureReason::TestFailedMarker)
        );
    }

    #[test]
    fn test_serializes_tagged() {
        let verdict = Verdict::failed(FailureReason::AnalyzerThresholdExceeded {
            alerts: 3,
            threshold: 2,
        });
        let json = serde_json::to_value(verdict).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["exit_code"], 1);
        assert_eq!(json["reason"]["kind"], "analyzer_threshold_exceeded");
        assert_eq!(json["reason"]["alerts"], 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::passed(PassBasis::ExitCode).to_string(), "PASSED");
        assert_eq!(
            Verdict::exit_code_failure(2).to_string(),
            "FAILED (build tool exited with status 2)"
        );
    }
}
