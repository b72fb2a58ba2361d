//! checkgate - CI merge gate CLI
//!
//! Folds upstream job results into one pass/fail verdict and exits with a
//! status code that blocks or allows the merge.
//!
//! ## Commands
//!
//! - `evaluate`: gate on the lint and unit-test statuses
//! - `needs`: gate on a serialized `needs` context with configurable checks

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

use checkgate_core::{
    init_tracing, CheckSpec, GateSpan, GateVerdict, JobStatus, NeedsContext, OutputFormat,
    Report, ResultAggregator,
};

/// Exit code for unusable input, matching clap's usage-error code.
const INPUT_ERROR_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "checkgate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Merge gate for pull-request CI workflows", long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Verdict format on stdout (text or json)
    #[arg(long, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// CI run id attached to log lines
    #[arg(long, global = true, env = "GITHUB_RUN_ID", default_value = "local")]
    run_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gate on the lint and unit-test job results
    Evaluate {
        /// Result of the lint job (success, failure, cancelled, skipped)
        #[arg(long, env = "LINT_STATUS")]
        lint_status: String,

        /// Result of the unit-test job (success, failure, cancelled, skipped)
        #[arg(long, env = "UNITTEST_STATUS")]
        unittest_status: String,
    },

    /// Gate on a serialized `needs` context (`toJSON(needs)`)
    Needs {
        /// Inline needs JSON
        #[arg(long, env = "NEEDS_JSON")]
        needs_json: Option<String>,

        /// Path to a file holding the needs JSON (takes precedence over inline JSON)
        #[arg(long)]
        needs_file: Option<PathBuf>,

        /// Check to gate on, as job=label (repeatable; default: lint and unit test)
        #[arg(long = "check")]
        checks: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.log_json, level);

    let _span = GateSpan::enter(&cli.run_id);

    match run(cli.command, cli.format) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(INPUT_ERROR_EXIT)
        }
    }
}

fn run(command: Commands, format: OutputFormat) -> Result<u8> {
    let verdict = match command {
        Commands::Evaluate {
            lint_status,
            unittest_status,
        } => cmd_evaluate(&lint_status, &unittest_status),
        Commands::Needs {
            needs_json,
            needs_file,
            checks,
        } => cmd_needs(needs_json, needs_file, &checks)?,
    };

    emit_report(&verdict, format)
}

/// Gate on the two fixed upstream results, lint first.
fn cmd_evaluate(lint_status: &str, unittest_status: &str) -> GateVerdict {
    debug!(lint_status, unittest_status, "evaluating fixed checks");
    ResultAggregator::evaluate_pair(JobStatus::parse(lint_status), JobStatus::parse(unittest_status))
}

/// Gate on the configured checks resolved from a needs context.
fn cmd_needs(
    needs_json: Option<String>,
    needs_file: Option<PathBuf>,
    checks: &[String],
) -> Result<GateVerdict> {
    let raw = match (needs_file, needs_json) {
        (Some(path), _) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read needs file {:?}", path))?,
        (None, Some(json)) => json,
        (None, None) => anyhow::bail!("Provide --needs-json, --needs-file, or NEEDS_JSON"),
    };

    let needs = NeedsContext::from_json(&raw).context("Failed to parse needs context")?;
    debug!(jobs = ?needs.jobs(), "loaded needs context");

    let checks = if checks.is_empty() {
        CheckSpec::defaults()
    } else {
        checks
            .iter()
            .map(|c| CheckSpec::parse(c))
            .collect::<checkgate_core::Result<Vec<_>>>()?
    };

    let results = needs.results_for(&checks)?;
    Ok(ResultAggregator::evaluate(&results))
}

fn emit_report(verdict: &GateVerdict, format: OutputFormat) -> Result<u8> {
    let report = Report::from_verdict(verdict, format).context("Failed to render verdict")?;
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    report
        .write_to(&mut stdout.lock(), &mut stderr.lock())
        .context("Failed to write report")?;
    Ok(report.exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cmd_evaluate_orders_lint_first() {
        let verdict = cmd_evaluate("cancelled", "failure");
        assert_eq!(
            verdict.failures,
            vec!["lint check: cancelled", "unit test check: failure"]
        );
    }

    #[test]
    fn test_cmd_needs_requires_input() {
        assert!(cmd_needs(None, None, &[]).is_err());
    }

    #[test]
    fn test_cmd_needs_with_custom_checks() {
        let json = r#"{"build": {"result": "success"}, "e2e": {"result": "skipped"}}"#;
        let checks = vec!["build=build check".to_string(), "e2e=e2e check".to_string()];
        let verdict = cmd_needs(Some(json.to_string()), None, &checks).unwrap();
        assert_eq!(verdict.failures, vec!["e2e check: skipped"]);
    }

    #[test]
    fn test_cmd_needs_rejects_bad_check() {
        let json = r#"{"linting": {"result": "success"}}"#;
        assert!(cmd_needs(Some(json.to_string()), None, &["linting".to_string()]).is_err());
    }
}
