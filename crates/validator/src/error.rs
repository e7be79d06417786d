//! Validator error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading and parsing the workflow file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing exists at the given path.
    #[error("Workflow file not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("cannot read workflow file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed to a bare `null`.
    #[error("Workflow is null ({})", path.display())]
    NullDocument { path: PathBuf },
}

/// Why a single check failed.
///
/// Always recovered by the check runner; never escapes a suite run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// An expectation about the document was not met.
    #[error("{0}")]
    Assertion(String),

    /// The document failed to load, so there is nothing to inspect.
    #[error("workflow document was not loaded")]
    DocumentUnavailable,
}

impl From<LoadError> for CheckError {
    fn from(err: LoadError) -> Self {
        CheckError::Assertion(err.to_string())
    }
}
