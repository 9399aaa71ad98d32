//! Validation findings and the combined document report.
//!
//! Validators never stop at the first problem; they collect every violation
//! they can see into a [`ValidationResult`]. A [`DocumentValidationReport`]
//! pairs the structural and semantic passes and derives the human-readable
//! summaries from them, so the two result sets stay the single source of
//! truth.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known context keys attached to [`ValidationError`]s.
pub mod context {
    /// Element path of the offending node.
    pub const PATH: &str = "path";
    /// Attribute name involved in the finding.
    pub const ATTRIBUTE: &str = "attribute";
    /// Offending attribute value.
    pub const VALUE: &str = "value";
    /// Child or referenced element name.
    pub const ELEMENT: &str = "element";
    /// Schema version the finding was checked against.
    pub const VERSION: &str = "version";
    /// Resource identifier involved in the finding.
    pub const ID: &str = "id";
}

/// Category of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationErrorKind {
    MissingRequiredAttribute,
    UnexpectedAttribute,
    InvalidAttributeValue,
    MissingRequiredChild,
    UnexpectedChild,
    DuplicateResourceId,
    UnresolvedReference,
    InvalidRootElement,
    UnsupportedVersion,
}

impl ValidationErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingRequiredAttribute => "missing-required-attribute",
            Self::UnexpectedAttribute => "unexpected-attribute",
            Self::InvalidAttributeValue => "invalid-attribute-value",
            Self::MissingRequiredChild => "missing-required-child",
            Self::UnexpectedChild => "unexpected-child",
            Self::DuplicateResourceId => "duplicate-resource-id",
            Self::UnresolvedReference => "unresolved-reference",
            Self::InvalidRootElement => "invalid-root-element",
            Self::UnsupportedVersion => "unsupported-version",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violation found by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
    /// Structured details keyed by the [`context`] constants.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_context(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    /// Element path recorded for this finding, if any.
    pub fn path(&self) -> Option<&str> {
        self.context.get(context::PATH).map(String::as_str)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{} at {path}: {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Every violation one validation pass produced, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

/// Outcome of validating one document: structural and semantic passes kept
/// side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentValidationReport {
    /// Version-dependent findings (grammar and feature availability).
    pub structure: ValidationResult,
    /// Version-independent findings (root shape, ids, references).
    pub semantics: ValidationResult,
}

impl DocumentValidationReport {
    pub fn is_valid(&self) -> bool {
        self.structure.is_valid() && self.semantics.is_valid()
    }

    pub fn error_count(&self) -> usize {
        self.structure.len() + self.semantics.len()
    }

    /// One-line outcome, e.g. `2 structural and 1 semantic violation(s)`.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "document is valid".to_string();
        }
        format!(
            "{} structural and {} semantic violation(s)",
            self.structure.len(),
            self.semantics.len()
        )
    }

    /// Multi-line rendering with one finding per line.
    pub fn detailed_description(&self) -> String {
        let mut lines = vec![self.summary()];
        for error in self.structure.iter() {
            lines.push(format!("structure: {error}"));
        }
        for error in self.semantics.iter() {
            lines.push(format!("semantics: {error}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_rate() -> ValidationError {
        ValidationError::new(
            ValidationErrorKind::MissingRequiredAttribute,
            "required attribute `frameDuration` is missing",
        )
        .with_context(context::PATH, "fcpxml/resources/format[1]")
        .with_context(context::ATTRIBUTE, "frameDuration")
    }

    #[test]
    fn display_includes_the_recorded_path() {
        let error = missing_rate();
        assert_eq!(
            error.to_string(),
            "missing-required-attribute at fcpxml/resources/format[1]: \
             required attribute `frameDuration` is missing"
        );
    }

    #[test]
    fn report_summary_counts_both_passes() {
        let mut report = DocumentValidationReport::default();
        assert!(report.is_valid());
        assert_eq!(report.summary(), "document is valid");

        report.structure.push(missing_rate());
        report.semantics.push(ValidationError::new(
            ValidationErrorKind::UnresolvedReference,
            "no resource with id `r99`",
        ));
        assert!(!report.is_valid());
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.summary(), "1 structural and 1 semantic violation(s)");
        let description = report.detailed_description();
        assert!(description.contains("structure: missing-required-attribute"));
        assert!(description.contains("semantics: unresolved-reference"));
    }

    #[test]
    fn kinds_serialize_as_kebab_case() {
        let json = serde_json::to_string(&ValidationErrorKind::DuplicateResourceId).unwrap();
        assert_eq!(json, "\"duplicate-resource-id\"");
    }
}
