//! checkgate - merge gate for pull-request CI workflows
//!
//! Reads the results of the upstream jobs a workflow depends on and folds
//! them into a single verdict:
//! - every status other than `success` is a failure (skipped and cancelled included)
//! - failures are reported one line per check, in configured order
//! - the verdict maps to a process exit code that blocks the merge

pub mod aggregator;
pub mod check;
pub mod error;
pub mod needs;
pub mod obs;
pub mod report;
pub mod status;
pub mod telemetry;

pub use aggregator::{GateVerdict, ResultAggregator, FAILED_HEADER, PASSED_MESSAGE};
pub use check::{CheckSpec, JobResult, LINT_JOB, UNIT_TEST_JOB};
pub use error::{GateError, Result};
pub use needs::{NeedsContext, NeedsEntry};
pub use obs::{emit_check_failed, emit_check_observed, emit_gate_evaluated, GateSpan};
pub use report::{OutputFormat, Report};
pub use status::JobStatus;
pub use telemetry::init_tracing;
