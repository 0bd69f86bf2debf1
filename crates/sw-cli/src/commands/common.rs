//! Shared helpers for command output and exit status

use serde::Serialize;
use std::fmt;
use sw_core::{AppliedStep, Direction, MigrationReport};

use crate::cli::OutputFormat;

/// Structured exit code carried through `anyhow::Error`.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run and the database is closed cleanly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) u8);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// JSON view of one committed step
#[derive(Debug, Serialize)]
pub(crate) struct StepOutput<'a> {
    pub version: u32,
    pub name: &'a str,
    pub direction: Direction,
}

/// JSON view of a migration run
#[derive(Debug, Serialize)]
pub(crate) struct ReportOutput<'a> {
    pub from: u32,
    pub to: u32,
    pub steps: Vec<StepOutput<'a>>,
    pub elapsed_ms: u128,
}

impl<'a> From<&'a MigrationReport> for ReportOutput<'a> {
    fn from(report: &'a MigrationReport) -> Self {
        Self {
            from: report.from,
            to: report.to,
            steps: report.applied.iter().map(StepOutput::from).collect(),
            elapsed_ms: report.elapsed.as_millis(),
        }
    }
}

impl<'a> From<&'a AppliedStep> for StepOutput<'a> {
    fn from(step: &'a AppliedStep) -> Self {
        Self {
            version: step.version,
            name: &step.name,
            direction: step.direction,
        }
    }
}

/// Print the outcome of `up` / `to`
pub(crate) fn print_report(report: &MigrationReport, output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ReportOutput::from(report))?
            );
        }
        OutputFormat::Text => {
            if report.is_noop() {
                println!("Already at version {}", report.to);
                return Ok(());
            }
            for step in &report.applied {
                println!(
                    "  {} {:04} {}",
                    step.direction.marker(),
                    step.version,
                    step.name
                );
            }
            println!(
                "Migrated from {} to {} ({} step{}) in {:.2?}",
                report.from,
                report.to,
                report.applied.len(),
                if report.applied.len() == 1 { "" } else { "s" },
                report.elapsed
            );
        }
    }
    Ok(())
}
