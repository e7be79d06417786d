//! `workflow-validator` CLI entry-point.
//!
//! Runs every structural check against one workflow JSON file, prints a
//! line per check followed by a summary, and exits non-zero if anything
//! failed.

mod exit_codes;
mod logging;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use validator::{run_suite, CheckRunner, Report, Style, CATALOGUE, DEFAULT_WORKFLOW_PATH};

#[derive(Parser)]
#[command(
    name = "workflow-validator",
    about = "Structural checks for the Make.com → GitHub backup workflow",
    version
)]
struct Cli {
    /// Path to the workflow JSON file.
    #[arg(default_value = DEFAULT_WORKFLOW_PATH)]
    path: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Disable ANSI colours in text output.
    #[arg(long)]
    no_color: bool,

    /// Print the check descriptions and exit without reading the file.
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    logging::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::from(exit_codes::OK),
        Ok(false) => ExitCode::from(exit_codes::FAILED),
        Err(e) => {
            error!("{e:#}");
            eprintln!("❌ {e:#}");
            ExitCode::from(exit_codes::FAILED)
        }
    }
}

/// Returns whether every check passed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let stdout = io::stdout().lock();

    if cli.list {
        list_checks(stdout).context("failed to write check list")?;
        return Ok(true);
    }

    let style = Style {
        color: !cli.no_color,
        lines: cli.format == Format::Text,
    };

    let mut out = stdout;
    if cli.format == Format::Text {
        writeln!(out, "\n=== Workflow Validation Tests ===\n")?;
    }

    let mut runner = CheckRunner::new(out, style);
    run_suite(&cli.path, &mut runner).context("failed to write check output")?;
    let (report, mut out) = runner.finish();

    info!(
        passed = report.passed(),
        failed = report.failed(),
        "validation finished"
    );

    match cli.format {
        Format::Text => print_summary(&mut out, &report, style)?,
        Format::Json => print_json(&mut out, &report)?,
    }

    Ok(report.is_success())
}

fn list_checks(mut out: impl Write) -> io::Result<()> {
    writeln!(out, "{}", validator::checks::FILE_EXISTS)?;
    writeln!(out, "{}", validator::checks::FILE_PARSES)?;
    for check in CATALOGUE {
        writeln!(out, "{}", check.description)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, report: &Report, style: Style) -> anyhow::Result<()> {
    let summary = report.summary();

    writeln!(out, "\n=== Test Results ===")?;
    writeln!(out, "Total: {}", summary.total)?;
    writeln!(out, "{}", style.green(&format!("Passed: {}", summary.passed)))?;
    writeln!(out, "{}", style.red(&format!("Failed: {}", summary.failed)))?;

    if summary.failures.is_empty() {
        writeln!(out, "\n{}\n", style.green("All tests passed!"))?;
    } else {
        writeln!(out, "\nFailed Tests:")?;
        for description in &summary.failures {
            writeln!(out, "  - {description}")?;
        }
    }
    Ok(())
}

fn print_json(out: &mut impl Write, report: &Report) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}
