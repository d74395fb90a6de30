//! Error types for the finreport library.
//!
//! Only hard failures live here. Lines the parser does not recognise become
//! paragraphs, and unbalanced `**` markers are repaired inside the markup
//! renderer; neither is ever reported as an error.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Typst compilation or PDF export failed. No partial document is returned.
    #[error("Report build failed: {0}")]
    Build(String),

    /// A configuration file could not be read or parsed.
    #[error("Invalid configuration '{path}': {reason}")]
    Config { path: PathBuf, reason: String },

    /// The analysis provider returned an error.
    #[error("{provider} API error: {message}")]
    Provider { provider: String, message: String },

    /// The analysis request is missing images or a prompt.
    #[error("Invalid analysis request: {0}")]
    InvalidRequest(String),

    /// An uploaded image was rejected.
    #[error("Invalid image '{name}': {reason}")]
    Image { name: String, reason: String },

    /// An email message could not be composed or delivered.
    #[error("Email delivery failed: {0}")]
    Transport(String),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}
