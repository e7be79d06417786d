//! Check runner.
//!
//! `CheckRunner` is the explicit result accumulator: every check goes through
//! [`CheckRunner::run_check`], which
//! 1. executes the check body,
//! 2. records a pass or a fail (with the error message) in the [`Report`],
//! 3. writes one progress line to the output stream, if line output is on.
//!
//! A failing check never stops the run; the caller decides what to do with
//! the finished report.

use std::io::{self, Write};

use tracing::debug;

use crate::{error::CheckError, report::Report};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// Output style
// ---------------------------------------------------------------------------

/// How progress lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Wrap markers in ANSI colour codes.
    pub color: bool,
    /// Emit a line per check. Off for machine-readable output.
    pub lines: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self { color: true, lines: true }
    }
}

impl Style {
    pub fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// CheckRunner
// ---------------------------------------------------------------------------

pub struct CheckRunner<W: Write> {
    out: W,
    style: Style,
    report: Report,
}

impl<W: Write> CheckRunner<W> {
    pub fn new(out: W, style: Style) -> Self {
        Self { out, style, report: Report::new() }
    }

    /// Run one check and record its outcome.
    ///
    /// # Errors
    /// Only fails if the progress line cannot be written.
    pub fn run_check<F>(&mut self, description: &str, check: F) -> io::Result<()>
    where
        F: FnOnce() -> Result<(), CheckError>,
    {
        let result = self.report.record(description, check());
        debug!(check = description, status = ?result.status, "check finished");

        if !self.style.lines {
            return Ok(());
        }

        match &result.error {
            None => writeln!(self.out, "{} {}", self.style.green("✓"), description),
            Some(message) => {
                writeln!(self.out, "{} {}", self.style.red("✗"), description)?;
                writeln!(self.out, "  {}", self.style.red(message))
            }
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Finish the run, handing back the report and the output stream.
    pub fn finish(self) -> (Report, W) {
        (self.report, self.out)
    }
}
