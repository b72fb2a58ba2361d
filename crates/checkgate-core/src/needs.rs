//! Reader for the CI platform's serialized `needs` context.
//!
//! The workflow passes `${{ toJSON(needs) }}` into the gate, which looks like:
//!
//! ```json
//! {
//!   "linting": { "result": "success", "outputs": {} },
//!   "UnitTesting": { "result": "failure", "outputs": {} }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::check::{CheckSpec, JobResult};
use crate::error::{GateError, Result};
use crate::status::JobStatus;

/// One upstream job entry in the `needs` context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NeedsEntry {
    pub result: JobStatus,

    #[serde(default)]
    pub outputs: BTreeMap<String, Value>,
}

/// Parsed `needs` context keyed by job name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NeedsContext {
    jobs: BTreeMap<String, NeedsEntry>,
}

impl NeedsContext {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(GateError::InvalidNeeds)
    }

    /// Job names present in the context, sorted.
    pub fn jobs(&self) -> Vec<&str> {
        self.jobs.keys().map(String::as_str).collect()
    }

    pub fn get(&self, job: &str) -> Option<&NeedsEntry> {
        self.jobs.get(job)
    }

    /// Resolve the configured checks against this context, in check order.
    pub fn results_for(&self, checks: &[CheckSpec]) -> Result<Vec<JobResult>> {
        checks
            .iter()
            .map(|check| {
                let entry = self
                    .get(&check.job)
                    .ok_or_else(|| GateError::MissingJob(check.job.clone()))?;
                Ok(JobResult::new(check.clone(), entry.result.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "UnitTesting": { "result": "cancelled", "outputs": {} },
        "linting": { "result": "success", "outputs": { "report": "ok" } }
    }"#;

    #[test]
    fn test_parse_needs_context() {
        let needs = NeedsContext::from_json(SAMPLE).unwrap();
        assert_eq!(needs.jobs(), vec!["UnitTesting", "linting"]);

        let lint = needs.get("linting").unwrap();
        assert_eq!(lint.result, JobStatus::Success);
        assert_eq!(lint.outputs["report"], "ok");
    }

    #[test]
    fn test_outputs_are_optional() {
        let needs = NeedsContext::from_json(r#"{"linting": {"result": "skipped"}}"#).unwrap();
        assert!(needs.get("linting").unwrap().outputs.is_empty());
    }

    #[test]
    fn test_results_follow_check_order() {
        let needs = NeedsContext::from_json(SAMPLE).unwrap();
        let results = needs.results_for(&CheckSpec::defaults()).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].check.job, "linting");
        assert_eq!(results[1].check.job, "UnitTesting");
        assert_eq!(results[1].status, JobStatus::Cancelled);
    }

    #[test]
    fn test_missing_job_is_an_error() {
        let needs = NeedsContext::from_json(r#"{"linting": {"result": "success"}}"#).unwrap();
        match needs.results_for(&CheckSpec::defaults()) {
            Err(GateError::MissingJob(job)) => assert_eq!(job, "UnitTesting"),
            other => panic!("expected MissingJob, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            NeedsContext::from_json("{ not json"),
            Err(GateError::InvalidNeeds(_))
        ));
        assert!(matches!(
            NeedsContext::from_json(r#"{"linting": {"outputs": {}}}"#),
            Err(GateError::InvalidNeeds(_))
        ));
    }
}
