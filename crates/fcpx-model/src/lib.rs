pub mod element;
pub mod report;
pub mod time;
pub mod tree;
pub mod version;

pub use element::{ElementType, STORY_ELEMENTS};
pub use report::{
    DocumentValidationReport, ValidationError, ValidationErrorKind, ValidationResult, context,
};
pub use time::RationalTime;
pub use tree::{Document, NodeId, VERSION_ATTR};
pub use version::{Version, VersionParseError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_minimal_document_reports_its_version() {
        let mut doc = Document::new(ElementType::Fcpxml);
        doc.set_declared_version(Version::new(1, 11, 0));
        let library = doc.create_node(ElementType::Library);
        doc.append_child(doc.root(), library);
        assert_eq!(doc.declared_version(), Some(Version::new(1, 11, 0)));
        assert_eq!(doc.attribute(doc.root(), VERSION_ATTR), Some("1.11"));
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut report = DocumentValidationReport::default();
        report.semantics.push(
            ValidationError::new(
                ValidationErrorKind::DuplicateResourceId,
                "resource id `r2` is declared twice",
            )
            .with_context(context::ID, "r2"),
        );
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: DocumentValidationReport =
            serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
