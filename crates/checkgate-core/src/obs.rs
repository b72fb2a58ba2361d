//! Structured observability hooks for gate evaluation.
//!
//! Events are emitted through `tracing`; the binary routes them to stderr
//! and filters them with `RUST_LOG` (see [`crate::telemetry`]).

use tracing::{debug, info};

/// RAII guard that enters a span tagged with the CI run id.
///
/// ```ignore
/// let _span = GateSpan::enter("8812345678");
/// // tracing calls below carry run_id = "8812345678"
/// ```
pub struct GateSpan {
    _span: tracing::span::EnteredSpan,
}

impl GateSpan {
    pub fn enter(run_id: &str) -> Self {
        let span = tracing::info_span!("checkgate.run", run_id = %run_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: one upstream result was read.
pub fn emit_check_observed(job: &str, status: &str) {
    debug!(event = "gate.check_observed", job = %job, status = %status);
}

/// Emit event: an upstream check did not succeed.
pub fn emit_check_failed(job: &str, status: &str) {
    info!(event = "gate.check_failed", job = %job, status = %status);
}

/// Emit event: gate evaluation completed.
pub fn emit_gate_evaluated(total: usize, failed: usize, passed: bool) {
    info!(
        event = "gate.evaluated",
        total = total,
        failed = failed,
        passed = passed,
    );
}
