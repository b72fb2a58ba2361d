//! Merge gate evaluation over upstream job results.

use serde::{Deserialize, Serialize};

use crate::check::{CheckSpec, JobResult};
use crate::error::{GateError, Result};
use crate::obs::{emit_check_failed, emit_check_observed, emit_gate_evaluated};
use crate::status::JobStatus;

/// Confirmation printed when every check passed.
pub const PASSED_MESSAGE: &str = "All checks passed";

/// Header printed above the failure lines.
pub const FAILED_HEADER: &str = "The following checks failed:";

/// Gate evaluation verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateVerdict {
    /// Whether the gate passed.
    pub passed: bool,

    /// One `"<label>: <status>"` line per failing check, in check order.
    pub failures: Vec<String>,

    /// Summary message.
    pub message: String,
}

impl GateVerdict {
    fn pass() -> Self {
        Self {
            passed: true,
            failures: Vec::new(),
            message: PASSED_MESSAGE.to_string(),
        }
    }

    fn fail(failures: Vec<String>) -> Self {
        Self {
            passed: false,
            failures,
            message: FAILED_HEADER.to_string(),
        }
    }

    /// Process exit code for this verdict: 0 on pass, 1 on failure.
    pub fn exit_code(&self) -> u8 {
        if self.passed {
            0
        } else {
            1
        }
    }

    pub fn into_result(self) -> Result<()> {
        if self.passed {
            Ok(())
        } else {
            Err(GateError::UpstreamFailure {
                failures: self.failures,
            })
        }
    }
}

/// Aggregates upstream job results into a single verdict.
pub struct ResultAggregator;

impl ResultAggregator {
    /// Evaluate results in the given order.
    ///
    /// Every status other than `success` contributes exactly one failure
    /// line. There is no short-circuit: all failing checks are reported.
    pub fn evaluate(results: &[JobResult]) -> GateVerdict {
        let mut failures = Vec::new();

        for result in results {
            emit_check_observed(&result.check.job, result.status.as_str());
            if !result.passed() {
                emit_check_failed(&result.check.job, result.status.as_str());
                failures.push(result.failure_line());
            }
        }

        let verdict = if failures.is_empty() {
            GateVerdict::pass()
        } else {
            GateVerdict::fail(failures)
        };
        emit_gate_evaluated(results.len(), verdict.failures.len(), verdict.passed);
        verdict
    }

    /// Evaluate the default lint and unit-test pair, lint first.
    pub fn evaluate_pair(lint: JobStatus, unit_test: JobStatus) -> GateVerdict {
        Self::evaluate(&[
            JobResult::new(CheckSpec::lint(), lint),
            JobResult::new(CheckSpec::unit_test(), unit_test),
        ])
    }
}
