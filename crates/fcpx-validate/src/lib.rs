//! Validation of FCPXML documents.
//!
//! Two independent passes: [`StructureValidator`] checks the tree against
//! the grammar and the feature table at one declared version, and
//! [`validate_semantics`] checks version-independent properties (root shape,
//! resource id uniqueness, reference resolution). [`perform_validation`]
//! runs both and pairs the results into a report.

pub mod document;
pub mod semantic;
pub mod structure;

pub use document::perform_validation;
pub use semantic::{resolve, validate_semantics};
pub use structure::StructureValidator;
