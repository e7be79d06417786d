//! Reading the workflow file from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::{error::LoadError, models::Document};

/// Conventional location of the workflow under test, relative to the
/// working directory.
pub const DEFAULT_WORKFLOW_PATH: &str = "workflows/make-backup-github.json";

/// Read and parse the workflow document at `path`.
///
/// # Errors
/// - [`LoadError::NotFound`] if nothing exists at `path`.
/// - [`LoadError::Io`] for any other read failure.
/// - [`LoadError::Parse`] if the content is not valid JSON.
/// - [`LoadError::NullDocument`] if the content is the JSON literal `null`.
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
        _ => LoadError::Io { path: path.to_path_buf(), source },
    })?;

    let root: Value = serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if root.is_null() {
        return Err(LoadError::NullDocument { path: path.to_path_buf() });
    }

    let document = Document::new(root);
    info!(path = %path.display(), "workflow document loaded");

    let duplicates = document.duplicate_node_names();
    if !duplicates.is_empty() {
        warn!(
            ?duplicates,
            "workflow contains duplicate node names; lookups use the first match"
        );
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(content.as_bytes()).expect("write");
        file
    }

    #[test]
    fn loads_valid_json() {
        let file = write_temp(r#"{ "name": "wf", "nodes": [] }"#);
        let doc = load_document(file.path()).expect("should load");
        assert_eq!(doc.name(), Some(&serde_json::json!("wf")));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_document(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let file = write_temp("{ \"name\": ");
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn null_root_is_rejected() {
        let file = write_temp("null");
        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::NullDocument { .. }));
    }

    #[test]
    fn directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_document(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
