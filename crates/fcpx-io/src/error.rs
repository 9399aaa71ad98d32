//! Error types for document input and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing FCPXML documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file or bundle member.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file or create a bundle directory.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML itself is broken.
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// A tag outside the closed element vocabulary.
    #[error("unknown element <{tag}>")]
    UnknownElement { tag: String },

    /// The same attribute appeared twice on one element.
    #[error("duplicate attribute `{attribute}` on <{tag}>")]
    DuplicateAttribute { tag: String, attribute: String },

    /// The input ended without any root element.
    #[error("document has no root element")]
    MissingRoot,
}

/// Result type for input and output operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
