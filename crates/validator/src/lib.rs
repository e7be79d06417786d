//! `validator` crate: structural checks for an n8n workflow document.

pub mod models;
pub mod error;
pub mod loader;
pub mod assertions;
pub mod report;
pub mod runner;
pub mod checks;

pub use models::{Document, Node};
pub use error::{CheckError, LoadError};
pub use loader::{load_document, DEFAULT_WORKFLOW_PATH};
pub use report::{CheckResult, CheckStatus, Report, Summary};
pub use runner::{CheckRunner, Style};
pub use checks::{run_suite, CATALOGUE};
