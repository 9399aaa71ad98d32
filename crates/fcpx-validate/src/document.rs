//! The combined validation entry point.

use fcpx_model::{Document, DocumentValidationReport, ValidationResult};
use tracing::debug;

use crate::semantic::validate_semantics;
use crate::structure::StructureValidator;

/// Run both validation passes over one document.
///
/// The structural pass is checked at the document's declared version. When
/// no version is declared (or it does not parse) there is nothing to check
/// the structure against; the semantic pass reports the broken declaration
/// and still runs in full.
pub fn perform_validation(doc: &Document) -> DocumentValidationReport {
    let structure = match doc.declared_version() {
        Some(version) => StructureValidator::new(version).validate(doc),
        None => ValidationResult::new(),
    };
    let semantics = validate_semantics(doc);
    debug!(
        structural = structure.len(),
        semantic = semantics.len(),
        "Validated document"
    );
    DocumentValidationReport {
        structure,
        semantics,
    }
}

#[cfg(test)]
mod tests {
    use fcpx_model::{ElementType, ValidationErrorKind};

    use super::*;

    #[test]
    fn a_missing_version_skips_structure_but_not_semantics() {
        let mut doc = Document::new(ElementType::Fcpxml);
        let resources = doc.create_node(ElementType::Resources);
        doc.append_child(doc.root(), resources);
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(doc.root(), clip);
        doc.set_attribute(clip, "ref", Some("r42"));

        let report = perform_validation(&doc);
        assert!(report.structure.is_empty());
        // The broken declaration and the dangling reference are both found.
        assert!(!report.is_valid());
        assert_eq!(report.semantics.len(), 2);
        assert_eq!(
            report.semantics.errors[0].kind,
            ValidationErrorKind::UnsupportedVersion
        );
        assert_eq!(
            report.semantics.errors[1].kind,
            ValidationErrorKind::UnresolvedReference
        );
    }
}
