//! Rendering of a gate verdict onto the process output streams.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::aggregator::GateVerdict;
use crate::error::Result;

/// Output format for the verdict on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Lines destined for stdout and stderr, plus the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub exit_code: u8,
}

impl Report {
    pub fn from_verdict(verdict: &GateVerdict, format: OutputFormat) -> Result<Self> {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        if !verdict.passed {
            stderr.push(verdict.message.clone());
            stderr.extend(verdict.failures.iter().map(|f| format!("\t{}", f)));
        }

        match format {
            OutputFormat::Text => {
                if verdict.passed {
                    stdout.push(verdict.message.clone());
                }
            }
            OutputFormat::Json => stdout.push(serde_json::to_string(verdict)?),
        }

        Ok(Self {
            stdout,
            stderr,
            exit_code: verdict.exit_code(),
        })
    }

    /// Write every line, newline-terminated, and flush both streams.
    pub fn write_to<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> Result<()> {
        for line in &self.stdout {
            writeln!(out, "{}", line)?;
        }
        for line in &self.stderr {
            writeln!(err, "{}", line)?;
        }
        out.flush()?;
        err.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ResultAggregator;
    use crate::status::JobStatus;

    fn render(lint: &str, unit_test: &str, format: OutputFormat) -> (String, String, u8) {
        let verdict =
            ResultAggregator::evaluate_pair(JobStatus::parse(lint), JobStatus::parse(unit_test));
        let report = Report::from_verdict(&verdict, format).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        report.write_to(&mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            report.exit_code,
        )
    }

    #[test]
    fn test_text_pass() {
        let (out, err, code) = render("success", "success", OutputFormat::Text);
        assert_eq!(out, "All checks passed\n");
        assert!(err.is_empty());
        assert_eq!(code, 0);
    }

    #[test]
    fn test_text_failure_block() {
        let (out, err, code) = render("failure", "failure", OutputFormat::Text);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "The following checks failed:\n\tlint check: failure\n\tunit test check: failure\n"
        );
        assert_eq!(code, 1);
    }

    #[test]
    fn test_json_pass() {
        let (out, err, code) = render("success", "success", OutputFormat::Json);
        let parsed: GateVerdict = serde_json::from_str(out.trim_end()).unwrap();
        assert!(parsed.passed);
        assert!(err.is_empty());
        assert_eq!(code, 0);
    }

    #[test]
    fn test_json_failure_keeps_stderr_block() {
        let (out, err, code) = render("success", "skipped", OutputFormat::Json);
        let parsed: GateVerdict = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(parsed.failures, vec!["unit test check: skipped"]);
        assert!(err.contains("\tunit test check: skipped"));
        assert_eq!(code, 1);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(
            render("cancelled", "failure", OutputFormat::Json),
            render("cancelled", "failure", OutputFormat::Json)
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
