//! Per-check results and the aggregate test report.

use serde::Serialize;

use crate::error::CheckError;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// One record per executed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub description: String,
    pub status: CheckStatus,
    /// Failure explanation; `None` for passing checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn is_pass(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

/// Aggregate outcome of one validation run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    total: usize,
    passed: usize,
    failed: usize,
    checks: Vec<CheckResult>,
}

/// Counts plus the failing descriptions, computed after the last check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome of one check and return the stored record.
    pub fn record(&mut self, description: &str, outcome: Result<(), CheckError>) -> &CheckResult {
        self.total += 1;
        let result = match outcome {
            Ok(()) => {
                self.passed += 1;
                CheckResult {
                    description: description.to_owned(),
                    status: CheckStatus::Pass,
                    error: None,
                }
            }
            Err(err) => {
                self.failed += 1;
                CheckResult {
                    description: description.to_owned(),
                    status: CheckStatus::Fail,
                    error: Some(err.to_string()),
                }
            }
        };
        self.checks.push(result);
        // Just pushed, so the vector is non-empty.
        &self.checks[self.checks.len() - 1]
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total(),
            passed: self.passed,
            failed: self.failed,
            failures: self
                .checks
                .iter()
                .filter(|c| !c.is_pass())
                .map(|c| c.description.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tracks_counts_and_order() {
        let mut report = Report::new();
        report.record("first", Ok(()));
        report.record("second", Err(CheckError::Assertion("boom".into())));
        report.record("third", Err(CheckError::DocumentUnavailable));

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.total(), 3);
        assert!(!report.is_success());

        let descriptions: Vec<_> = report.checks().iter().map(|c| c.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
        assert_eq!(report.checks()[1].error.as_deref(), Some("boom"));
    }

    #[test]
    fn summary_lists_only_failures() {
        let mut report = Report::new();
        report.record("ok", Ok(()));
        report.record("bad", Err(CheckError::Assertion("nope".into())));

        let summary = report.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures, vec!["bad".to_string()]);
    }

    #[test]
    fn empty_report_is_success() {
        let report = Report::new();
        assert!(report.is_success());
        assert!(report.summary().failures.is_empty());
    }

    #[test]
    fn serializes_status_uppercase_and_skips_empty_error() {
        let mut report = Report::new();
        report.record("ok", Ok(()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checks"][0]["status"], "PASS");
        assert!(json["checks"][0].get("error").is_none());
        assert_eq!(json["passed"], 1);
        assert_eq!(json["total"], 1);
        assert_eq!(json["failed"], 0);
    }
}
