//! Error types for version conversion.

use fcpx_model::Version;
use thiserror::Error;

/// Errors raised before any output tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The root element carries no parseable `version` attribute.
    #[error("document declares no parseable schema version")]
    UndeclaredSourceVersion,

    /// The declared source version is not in the known list.
    #[error("source version {version} is not a known schema version")]
    UnknownSourceVersion { version: Version },

    /// The requested target version is not in the known list.
    #[error("target version {version} is not a known schema version")]
    UnknownTargetVersion { version: Version },

    /// Bundle output requested for a version that predates bundles.
    #[error("bundle packaging requires schema version 1.10, target is {version}")]
    BundleUnsupported { version: Version },
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
