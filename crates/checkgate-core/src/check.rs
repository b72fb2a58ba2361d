//! Check definitions: which upstream job feeds the gate, and how its
//! failures are labelled.

use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};
use crate::status::JobStatus;

/// Job name of the lint workflow in the CI job graph.
pub const LINT_JOB: &str = "linting";

/// Job name of the unit-test workflow in the CI job graph.
pub const UNIT_TEST_JOB: &str = "UnitTesting";

/// An upstream job the gate depends on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckSpec {
    /// Job name as it appears in the workflow's `needs` graph.
    pub job: String,

    /// Label used in failure lines (`"<label>: <status>"`).
    pub label: String,
}

impl CheckSpec {
    pub fn new(job: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            label: label.into(),
        }
    }

    pub fn lint() -> Self {
        Self::new(LINT_JOB, "lint check")
    }

    pub fn unit_test() -> Self {
        Self::new(UNIT_TEST_JOB, "unit test check")
    }

    /// The checks gated by default, in report order.
    pub fn defaults() -> Vec<Self> {
        vec![Self::lint(), Self::unit_test()]
    }

    /// Parse a `job=label` pair.
    pub fn parse(raw: &str) -> Result<Self> {
        let (job, label) = raw
            .split_once('=')
            .ok_or_else(|| GateError::InvalidCheck(raw.to_string()))?;
        let (job, label) = (job.trim(), label.trim());
        if job.is_empty() || label.is_empty() {
            return Err(GateError::InvalidCheck(raw.to_string()));
        }
        Ok(Self::new(job, label))
    }
}

/// The observed status of one upstream job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobResult {
    pub check: CheckSpec,
    pub status: JobStatus,
}

impl JobResult {
    pub fn new(check: CheckSpec, status: JobStatus) -> Self {
        Self { check, status }
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }

    pub fn failure_line(&self) -> String {
        format!("{}: {}", self.check.label, self.status)
    }
}
