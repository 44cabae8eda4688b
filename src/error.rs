//! Error types for the mask redaction library.
//!
//! Each variant maps to one failure class of the pipeline: a bad page
//! expression, an unreadable document, a failed page merge, or a failed
//! write/rename of the output.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for redaction operations.
pub type RedactorResult<T> = Result<T, RedactorError>;

/// Which document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// The document being redacted
    Input,

    /// The document providing the redaction mask pages
    Mask,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Mask => f.write_str("mask"),
        }
    }
}

/// Error type for all redaction operations.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// The `--pages` expression could not be parsed
    #[error("Invalid page specification '{spec}': {reason}")]
    InvalidPageSpec { spec: String, reason: String },

    /// An input or mask document could not be opened
    #[error("Failed to open {role} document '{}': {reason}", .path.display())]
    DocumentOpen {
        role: DocumentRole,
        path: PathBuf,
        reason: String,
    },

    /// Appending or merging a page failed (1-based page number)
    #[error("Composition failed on page {page}: {message}")]
    Composition { page: usize, message: String },

    /// Writing or renaming the output failed
    #[error("Failed to write output '{}': {reason}", .path.display())]
    Persist {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<io::Error>,
    },
}

impl RedactorError {
    pub(crate) fn composition(page_index: usize, message: impl Into<String>) -> Self {
        Self::Composition {
            page: page_index + 1,
            message: message.into(),
        }
    }
}
