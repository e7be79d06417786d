//! Check catalogue for the "Make.com → GitHub Backup" workflow.
//!
//! Every entry of [`CATALOGUE`] is an independent assertion evaluated against
//! the loaded document. The two file-level checks (existence, JSON parse) run
//! before the catalogue in [`run_suite`] because they produce the document.

use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::{
    assertions::{ensure, ensure_contains, ensure_eq, ensure_exists, ensure_found, with_default},
    error::CheckError,
    loader::load_document,
    models::{Document, Node},
    runner::CheckRunner,
};

// ---------------------------------------------------------------------------
// Expected values
// ---------------------------------------------------------------------------

pub const WORKFLOW_NAME: &str = "Make.com → GitHub Backup";

pub const CRON_NODE: &str = "n8n-nodes-base.cron";
pub const SET_NODE: &str = "n8n-nodes-base.set";
pub const HTTP_REQUEST_NODE: &str = "n8n-nodes-base.httpRequest";
pub const FUNCTION_NODE: &str = "n8n-nodes-base.function";
pub const SPLIT_IN_BATCHES_NODE: &str = "n8n-nodes-base.splitInBatches";
pub const SLACK_NODE: &str = "n8n-nodes-base.slack";

const TRIGGER: &str = "Daily 2AM CST Trigger";
const READ_STATE: &str = "Read Backup State";
const COMMIT_STATE: &str = "Commit Backup State";
const FETCH_SCENARIOS: &str = "Fetch All Scenarios";
const SPLIT_SCENARIOS: &str = "Split Scenarios";
const DOWNLOAD_BLUEPRINT: &str = "Download Blueprint";
const CHECK_EXISTING: &str = "Check Existing File";
const COMMIT_SCENARIO: &str = "Commit Scenario File";

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A literal a parameter is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Literal {
    Str(&'static str),
    Int(i64),
}

impl Literal {
    pub fn to_value(self) -> Value {
        match self {
            Literal::Str(s) => Value::from(s),
            Literal::Int(n) => Value::from(n),
        }
    }
}

/// What a single check asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Top-level `name` equals the expected workflow name.
    WorkflowName(&'static str),
    /// Top-level field exists and is a JSON array.
    IsArray { field: &'static str, missing: &'static str, wrong: &'static str },
    /// Top-level field exists and is a JSON object.
    IsObject { field: &'static str, missing: &'static str, wrong: &'static str },
    /// Named node exists and has the given `type`.
    NodeType {
        node: &'static str,
        node_type: &'static str,
        not_found: &'static str,
        mismatch: &'static str,
    },
    /// `parameters.<key>` equals `expected`, after substituting `default`
    /// for an unset value when one is given.
    ParamEquals {
        node: &'static str,
        key: &'static str,
        expected: Literal,
        default: Option<Literal>,
        message: &'static str,
    },
    /// `parameters.<key>` is a string containing every fragment.
    /// Each fragment carries its own failure message.
    ParamContains {
        node: &'static str,
        key: &'static str,
        fragments: &'static [(&'static str, &'static str)],
    },
    /// `continueOnFail` is literally `true`.
    ContinueOnFail { node: &'static str, message: &'static str },
}

impl Rule {
    /// Evaluate against the document; `None` means it failed to load.
    ///
    /// # Errors
    /// [`CheckError::DocumentUnavailable`] without a document, otherwise
    /// [`CheckError::Assertion`] for the first unmet expectation.
    pub fn evaluate(&self, document: Option<&Document>) -> Result<(), CheckError> {
        let doc = document.ok_or(CheckError::DocumentUnavailable)?;

        match *self {
            Rule::WorkflowName(expected) => ensure_eq(doc.name(), expected, "Workflow name mismatch"),
            Rule::IsArray { field, missing, wrong } => {
                let value = ensure_exists(doc.field(field), missing)?;
                ensure(value.is_array(), wrong)
            }
            Rule::IsObject { field, missing, wrong } => {
                let value = ensure_exists(doc.field(field), missing)?;
                ensure(value.is_object(), wrong)
            }
            Rule::NodeType { node, node_type, not_found, mismatch } => {
                let node = ensure_found(doc.find_node(node), not_found)?;
                ensure_eq(node.node_type(), node_type, mismatch)
            }
            Rule::ParamEquals { node: name, key, expected, default, message } => {
                let node = require_node(doc, name)?;
                let default = default.map(Literal::to_value);
                let actual = match &default {
                    // Only the key may be defaulted; `parameters` itself must exist.
                    Some(default) => {
                        let parameters =
                            ensure_found(node.parameters(), &format!("{name} has no parameters"))?;
                        Some(with_default(parameters.get(key), default))
                    }
                    None => node.parameter(key),
                };
                ensure_eq(actual, expected.to_value(), message)
            }
            Rule::ParamContains { node, key, fragments } => {
                let node = require_node(doc, node)?;
                let value = node.parameter(key);
                for &(fragment, message) in fragments {
                    ensure_contains(value, fragment, message)?;
                }
                Ok(())
            }
            Rule::ContinueOnFail { node, message } => {
                let node = require_node(doc, node)?;
                ensure(node.continue_on_fail() == Some(&Value::Bool(true)), message)
            }
        }
    }

    /// Whether the rule inspects an entry of `nodes`.
    pub fn depends_on_nodes(&self) -> bool {
        !matches!(
            self,
            Rule::WorkflowName(_) | Rule::IsArray { .. } | Rule::IsObject { .. }
        )
    }
}

fn require_node<'d>(doc: &'d Document, name: &str) -> Result<Node<'d>, CheckError> {
    ensure_found(doc.find_node(name), &format!("{name} node not found"))
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// A described rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub description: &'static str,
    pub rule: Rule,
}

const fn node_type(
    description: &'static str,
    node: &'static str,
    node_type: &'static str,
    not_found: &'static str,
    mismatch: &'static str,
) -> Check {
    Check { description, rule: Rule::NodeType { node, node_type, not_found, mismatch } }
}

const fn param_equals(
    description: &'static str,
    node: &'static str,
    key: &'static str,
    expected: Literal,
    default: Option<Literal>,
    message: &'static str,
) -> Check {
    Check { description, rule: Rule::ParamEquals { node, key, expected, default, message } }
}

/// Document-level checks, in execution order.
pub const CATALOGUE: &[Check] = &[
    // 2.1.1 top-level shape
    Check {
        description: "2.1.1: Workflow has required name",
        rule: Rule::WorkflowName(WORKFLOW_NAME),
    },
    Check {
        description: "2.1.1: Workflow has nodes array",
        rule: Rule::IsArray {
            field: "nodes",
            missing: "Workflow missing nodes array",
            wrong: "nodes must be an array",
        },
    },
    Check {
        description: "2.1.1: Workflow has connections object",
        rule: Rule::IsObject {
            field: "connections",
            missing: "Workflow missing connections object",
            wrong: "connections must be an object",
        },
    },
    Check {
        description: "2.1.1: Workflow has settings object",
        rule: Rule::IsObject {
            field: "settings",
            missing: "Workflow missing settings object",
            wrong: "settings must be an object",
        },
    },
    // 2.1.2 trigger
    node_type(
        "2.1.2: Cron Trigger node exists",
        TRIGGER,
        CRON_NODE,
        "Cron Trigger node not found",
        "Cron node type mismatch",
    ),
    param_equals(
        "2.1.2: Cron Trigger has correct schedule",
        TRIGGER,
        "cronExpression",
        Literal::Str("0 2 * * *"),
        None,
        "Cron schedule mismatch",
    ),
    param_equals(
        "2.1.2: Cron Trigger has correct timezone",
        TRIGGER,
        "timezone",
        Literal::Str("America/Chicago"),
        Some(Literal::Str("America/Chicago")),
        "Timezone mismatch",
    ),
    // 2.1.3 execution metadata
    node_type(
        "2.1.3: Execution metadata node exists",
        "Initialize Execution Context",
        SET_NODE,
        "Execution metadata node not found",
        "Metadata node type mismatch",
    ),
    // 2.2 backup state
    node_type(
        "2.2.1: Read Backup State node exists",
        READ_STATE,
        HTTP_REQUEST_NODE,
        "Read Backup State node not found",
        "Node type should be httpRequest",
    ),
    Check {
        description: "2.2.1: Read Backup State uses correct GitHub URL",
        rule: Rule::ParamContains {
            node: READ_STATE,
            key: "url",
            fragments: &[
                ("api.github.com", "URL should use GitHub API"),
                ("bautrey/n8n", "URL should reference correct repo"),
                ("backup-state.json", "URL should reference backup-state.json"),
            ],
        },
    },
    param_equals(
        "2.2.1: Read Backup State uses GET method",
        READ_STATE,
        "method",
        Literal::Str("GET"),
        Some(Literal::Str("GET")),
        "Should use GET method",
    ),
    node_type(
        "2.2.2: Parse Backup State node exists",
        "Parse Backup State",
        FUNCTION_NODE,
        "Parse Backup State node not found",
        "Node type should be function",
    ),
    node_type(
        "2.2.3: Update Backup State node exists",
        "Update Backup State",
        FUNCTION_NODE,
        "Update Backup State node not found",
        "Node type should be function",
    ),
    node_type(
        "2.2.4: Commit Backup State node exists",
        COMMIT_STATE,
        HTTP_REQUEST_NODE,
        "Commit Backup State node not found",
        "Node type should be httpRequest",
    ),
    param_equals(
        "2.2.4: Commit Backup State uses PUT method",
        COMMIT_STATE,
        "method",
        Literal::Str("PUT"),
        None,
        "Should use PUT method",
    ),
    // 2.3 scenarios
    node_type(
        "2.3.1: Fetch All Scenarios node exists",
        FETCH_SCENARIOS,
        HTTP_REQUEST_NODE,
        "Fetch All Scenarios node not found",
        "Node type should be httpRequest",
    ),
    Check {
        description: "2.3.1: Fetch All Scenarios uses Make.com API",
        rule: Rule::ParamContains {
            node: FETCH_SCENARIOS,
            key: "url",
            fragments: &[
                ("make.com/api/v2/scenarios", "URL should use Make.com API scenarios endpoint"),
                ("teamId=154819", "URL should include correct team ID"),
            ],
        },
    },
    node_type(
        "2.3.2: Filter Changed Scenarios node exists",
        "Filter Changed Scenarios",
        FUNCTION_NODE,
        "Filter Changed Scenarios node not found",
        "Node type should be function",
    ),
    node_type(
        "2.3.3: Split Scenarios node exists",
        SPLIT_SCENARIOS,
        SPLIT_IN_BATCHES_NODE,
        "Split Scenarios node not found",
        "Node type should be splitInBatches",
    ),
    param_equals(
        "2.3.3: Split Scenarios uses batch size of 1",
        SPLIT_SCENARIOS,
        "batchSize",
        Literal::Int(1),
        None,
        "Batch size should be 1 for sequential processing",
    ),
    node_type(
        "2.3.4: Download Blueprint node exists",
        DOWNLOAD_BLUEPRINT,
        HTTP_REQUEST_NODE,
        "Download Blueprint node not found",
        "Node type should be httpRequest",
    ),
    Check {
        description: "2.3.4: Download Blueprint uses blueprint API endpoint",
        rule: Rule::ParamContains {
            node: DOWNLOAD_BLUEPRINT,
            key: "url",
            fragments: &[("blueprint", "URL should include blueprint endpoint")],
        },
    },
    // 2.4 commit scenarios to GitHub
    node_type(
        "2.4.1: Check Existing File node exists",
        CHECK_EXISTING,
        HTTP_REQUEST_NODE,
        "Check Existing File node not found",
        "Node type should be httpRequest",
    ),
    Check {
        description: "2.4.1: Check Existing File uses GitHub scenarios path",
        rule: Rule::ParamContains {
            node: CHECK_EXISTING,
            key: "url",
            fragments: &[
                ("api.github.com", "URL should use GitHub API"),
                ("scenarios", "URL should reference scenarios directory"),
            ],
        },
    },
    Check {
        description: "2.4.1: Check Existing File continues on fail",
        rule: Rule::ContinueOnFail {
            node: CHECK_EXISTING,
            message: "Should continue on fail for 404 handling",
        },
    },
    node_type(
        "2.4.2: Prepare Commit Data node exists",
        "Prepare Commit Data",
        FUNCTION_NODE,
        "Prepare Commit Data node not found",
        "Node type should be function",
    ),
    node_type(
        "2.4.3: Commit Scenario File node exists",
        COMMIT_SCENARIO,
        HTTP_REQUEST_NODE,
        "Commit Scenario File node not found",
        "Node type should be httpRequest",
    ),
    param_equals(
        "2.4.3: Commit Scenario File uses PUT method",
        COMMIT_SCENARIO,
        "method",
        Literal::Str("PUT"),
        None,
        "Should use PUT method",
    ),
    // 2.5 reporting
    node_type(
        "2.5.1: Aggregate Results node exists",
        "Aggregate Results",
        FUNCTION_NODE,
        "Aggregate Results node not found",
        "Node type should be function",
    ),
    node_type(
        "2.5.2: Format Slack Message node exists",
        "Format Slack Message",
        FUNCTION_NODE,
        "Format Slack Message node not found",
        "Node type should be function",
    ),
    node_type(
        "2.5.3: Send Slack Notification node exists",
        "Send Slack Notification",
        SLACK_NODE,
        "Send Slack Notification node not found",
        "Node type should be slack",
    ),
];

pub const FILE_EXISTS: &str = "2.1.1: Workflow file exists";
pub const FILE_PARSES: &str = "2.1.1: Workflow file contains valid JSON";

// ---------------------------------------------------------------------------
// Suite
// ---------------------------------------------------------------------------

/// Run the file-level checks followed by every catalogue entry.
///
/// Returns the loaded document (if any) so callers can inspect it further.
///
/// # Errors
/// Only I/O errors from writing progress lines; check failures are recorded
/// in the runner's report.
pub fn run_suite<W: Write>(
    path: &Path,
    runner: &mut CheckRunner<W>,
) -> io::Result<Option<Document>> {
    info!(path = %path.display(), checks = CATALOGUE.len() + 2, "running workflow checks");

    runner.run_check(FILE_EXISTS, || {
        ensure(
            path.exists(),
            format!("Workflow file not found at {}", path.display()),
        )
    })?;

    let mut document = None;
    runner.run_check(FILE_PARSES, || {
        document = Some(load_document(path)?);
        Ok(())
    })?;

    for check in CATALOGUE {
        runner.run_check(check.description, || check.rule.evaluate(document.as_ref()))?;
    }

    Ok(document)
}
