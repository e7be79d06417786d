//! In-memory view of a workflow document.
//!
//! The document is kept as a raw [`serde_json::Value`] rather than a typed
//! struct: a malformed file must still load so that each check can report
//! exactly which field is wrong.

use std::collections::HashSet;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A parsed workflow document (the JSON root).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wrap an already-parsed JSON value.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Top-level field lookup. `None` when the root is not an object.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn name(&self) -> Option<&Value> {
        self.field("name")
    }

    /// The `nodes` array, if present and actually an array.
    pub fn nodes(&self) -> Option<&Vec<Value>> {
        self.field("nodes").and_then(Value::as_array)
    }

    /// First node whose `name` equals `name` exactly.
    ///
    /// Returns `None` when no node matches or `nodes` is missing. Duplicate
    /// names are not rejected; the earliest entry wins.
    pub fn find_node(&self, name: &str) -> Option<Node<'_>> {
        self.nodes()?
            .iter()
            .filter_map(Node::from_value)
            .find(|node| node.name() == Some(name))
    }

    /// Names that appear on more than one node, in first-repeat order.
    pub fn duplicate_node_names(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();

        for node in self.nodes().into_iter().flatten().filter_map(Node::from_value) {
            if let Some(name) = node.name() {
                if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
                    duplicates.push(name.to_owned());
                }
            }
        }

        duplicates
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Borrowed view over one entry of the `nodes` array.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Node<'a> {
    /// `None` when the entry is not a JSON object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|fields| Self { fields })
    }

    pub fn name(&self) -> Option<&'a str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// The node's `type` field (behaviour category).
    pub fn node_type(&self) -> Option<&'a Value> {
        self.fields.get("type")
    }

    pub fn parameters(&self) -> Option<&'a Map<String, Value>> {
        self.fields.get("parameters").and_then(Value::as_object)
    }

    /// A single entry of `parameters`.
    pub fn parameter(&self, key: &str) -> Option<&'a Value> {
        self.parameters()?.get(key)
    }

    /// Raw `continueOnFail` value, left uninterpreted so callers can insist
    /// on a literal `true`.
    pub fn continue_on_fail(&self) -> Option<&'a Value> {
        self.fields.get("continueOnFail")
    }
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_nodes(nodes: Value) -> Document {
        Document::new(json!({ "name": "wf", "nodes": nodes }))
    }

    #[test]
    fn find_node_matches_exact_name() {
        let doc = doc_with_nodes(json!([
            { "name": "Fetch", "type": "n8n-nodes-base.httpRequest" },
            { "name": "Parse", "type": "n8n-nodes-base.function" },
        ]));

        let node = doc.find_node("Parse").expect("node should be found");
        assert_eq!(node.node_type(), Some(&json!("n8n-nodes-base.function")));
        assert!(doc.find_node("parse").is_none());
        assert!(doc.find_node("Pars").is_none());
    }

    #[test]
    fn find_node_takes_first_match() {
        let doc = doc_with_nodes(json!([
            { "name": "Dup", "type": "first" },
            { "name": "Dup", "type": "second" },
        ]));

        let node = doc.find_node("Dup").unwrap();
        assert_eq!(node.node_type(), Some(&json!("first")));
        assert_eq!(doc.duplicate_node_names(), vec!["Dup".to_string()]);
    }

    #[test]
    fn find_node_without_nodes_array_is_none() {
        let doc = Document::new(json!({ "nodes": { "name": "Fetch" } }));
        assert!(doc.nodes().is_none());
        assert!(doc.find_node("Fetch").is_none());

        let doc = Document::new(json!([1, 2, 3]));
        assert!(doc.find_node("Fetch").is_none());
    }

    #[test]
    fn non_object_nodes_are_skipped() {
        let doc = doc_with_nodes(json!([42, "Fetch", { "name": "Fetch" }]));
        assert!(doc.find_node("Fetch").is_some());
    }

    #[test]
    fn parameter_lookup_handles_missing_parameters() {
        let doc = doc_with_nodes(json!([
            { "name": "A", "parameters": { "url": "https://example.com" } },
            { "name": "B" },
            { "name": "C", "parameters": "not-an-object" },
        ]));

        assert_eq!(
            doc.find_node("A").unwrap().parameter("url"),
            Some(&json!("https://example.com"))
        );
        assert!(doc.find_node("B").unwrap().parameter("url").is_none());
        assert!(doc.find_node("C").unwrap().parameters().is_none());
    }

    #[test]
    fn unique_names_report_no_duplicates() {
        let doc = doc_with_nodes(json!([{ "name": "A" }, { "name": "B" }, { "type": "x" }]));
        assert!(doc.duplicate_node_names().is_empty());
    }
}
