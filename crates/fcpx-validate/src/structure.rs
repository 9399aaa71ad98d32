//! Structural validation: the grammar and the feature table applied at one
//! specific schema version.
//!
//! The walk never stops early; every violation in the document is reported.
//! Child order is not checked, only membership and cardinality.

use fcpx_model::{
    Document, ElementType, NodeId, ValidationError, ValidationErrorKind, ValidationResult, Version,
    context,
};
use fcpx_standards::{
    Availability, Cardinality, ChildRule, ElementGrammar, Presence, attribute_availability,
    element_availability, grammar,
};

/// Validates one document against the grammar at a fixed version.
pub struct StructureValidator {
    version: Version,
}

impl StructureValidator {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    /// Walk the whole tree and collect every structural violation.
    ///
    /// An unknown version yields a single `unsupported-version` finding and
    /// no grammar checks, since no grammar exists to check against.
    pub fn validate(&self, doc: &Document) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !self.version.is_known() {
            result.push(
                ValidationError::new(
                    ValidationErrorKind::UnsupportedVersion,
                    format!("`{}` is not a known schema version", self.version),
                )
                .with_context(context::VERSION, self.version.to_string()),
            );
            return result;
        }
        for node in doc.descendants(doc.root()) {
            let rules = grammar(doc.tag(node));
            self.check_attributes(doc, node, rules, &mut result);
            self.check_children(doc, node, rules, &mut result);
        }
        result
    }

    fn check_attributes(
        &self,
        doc: &Document,
        node: NodeId,
        rules: &ElementGrammar,
        out: &mut ValidationResult,
    ) {
        let tag = doc.tag(node);

        for rule in rules.attributes {
            if rule.presence != Presence::Required {
                continue;
            }
            match attribute_availability(tag, rule.name, self.version) {
                // Absent reads as the default, so presence is not required.
                Availability::AvailableWithDefault(_) => continue,
                // An attribute this version does not carry cannot be required.
                Availability::Renamed(_) | Availability::Unavailable => continue,
                Availability::Available => {}
            }
            if doc.attribute(node, rule.name).is_none() {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::MissingRequiredAttribute,
                        format!("required attribute `{}` is missing", rule.name),
                    )
                    .with_context(context::PATH, doc.path(node))
                    .with_context(context::ATTRIBUTE, rule.name),
                );
            }
        }

        for (name, value) in doc.attributes(node) {
            let Some(rule) = rules.attribute(name) else {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::UnexpectedAttribute,
                        format!("attribute `{name}` is not part of `<{tag}>`"),
                    )
                    .with_context(context::PATH, doc.path(node))
                    .with_context(context::ATTRIBUTE, name),
                );
                continue;
            };
            match attribute_availability(tag, name, self.version) {
                Availability::Unavailable => {
                    out.push(
                        ValidationError::new(
                            ValidationErrorKind::UnexpectedAttribute,
                            format!(
                                "attribute `{name}` is not carried by version {}",
                                self.version
                            ),
                        )
                        .with_context(context::PATH, doc.path(node))
                        .with_context(context::ATTRIBUTE, name)
                        .with_context(context::VERSION, self.version.to_string()),
                    );
                }
                Availability::Renamed(replacement) => {
                    out.push(
                        ValidationError::new(
                            ValidationErrorKind::UnexpectedAttribute,
                            format!(
                                "attribute `{name}` is spelled `{replacement}` in version {}",
                                self.version
                            ),
                        )
                        .with_context(context::PATH, doc.path(node))
                        .with_context(context::ATTRIBUTE, name)
                        .with_context(context::VERSION, self.version.to_string()),
                    );
                }
                Availability::Available | Availability::AvailableWithDefault(_) => {
                    if !rule.value.matches(value) {
                        out.push(
                            ValidationError::new(
                                ValidationErrorKind::InvalidAttributeValue,
                                format!("attribute `{name}` has malformed value `{value}`"),
                            )
                            .with_context(context::PATH, doc.path(node))
                            .with_context(context::ATTRIBUTE, name)
                            .with_context(context::VALUE, value),
                        );
                    }
                }
            }
        }
    }

    fn check_children(
        &self,
        doc: &Document,
        node: NodeId,
        rules: &ElementGrammar,
        out: &mut ValidationResult,
    ) {
        let tag = doc.tag(node);

        for child in doc.children(node) {
            let child_tag = doc.tag(*child);
            if rules.child_rule(child_tag).is_none() {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::UnexpectedChild,
                        format!("element `<{child_tag}>` is not allowed inside `<{tag}>`"),
                    )
                    .with_context(context::PATH, doc.path(*child))
                    .with_context(context::ELEMENT, child_tag.name()),
                );
            } else if !element_availability(child_tag, self.version).is_available() {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::UnexpectedChild,
                        format!(
                            "element `<{child_tag}>` is not carried by version {}",
                            self.version
                        ),
                    )
                    .with_context(context::PATH, doc.path(*child))
                    .with_context(context::ELEMENT, child_tag.name())
                    .with_context(context::VERSION, self.version.to_string()),
                );
            }
        }

        for rule in rules.children {
            self.check_cardinality(doc, node, rule, out);
        }
    }

    fn check_cardinality(
        &self,
        doc: &Document,
        node: NodeId,
        rule: &ChildRule,
        out: &mut ValidationResult,
    ) {
        let matching: Vec<NodeId> = doc
            .children(node)
            .iter()
            .copied()
            .filter(|child| rule.elements.contains(&doc.tag(*child)))
            .collect();

        let required = matches!(rule.cardinality, Cardinality::Once | Cardinality::OneOrMore);
        if required && matching.is_empty() {
            // A group no element of which exists at this version cannot be
            // demanded.
            let satisfiable = rule
                .elements
                .iter()
                .any(|element| element_availability(*element, self.version).is_available());
            if satisfiable {
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::MissingRequiredChild,
                        format!("required child {} is missing", describe_group(rule.elements)),
                    )
                    .with_context(context::PATH, doc.path(node)),
                );
            }
        }

        let at_most_one = matches!(rule.cardinality, Cardinality::Once | Cardinality::Optional);
        if at_most_one {
            for extra in matching.iter().skip(1) {
                let extra_tag = doc.tag(*extra);
                out.push(
                    ValidationError::new(
                        ValidationErrorKind::UnexpectedChild,
                        format!(
                            "only one {} is allowed inside `<{}>`",
                            describe_group(rule.elements),
                            doc.tag(node)
                        ),
                    )
                    .with_context(context::PATH, doc.path(*extra))
                    .with_context(context::ELEMENT, extra_tag.name()),
                );
            }
        }
    }
}

fn describe_group(elements: &[ElementType]) -> String {
    match elements {
        [single] => format!("`<{single}>`"),
        _ => {
            let names: Vec<String> = elements
                .iter()
                .map(|element| format!("`<{element}>`"))
                .collect();
            format!("one of {}", names.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use fcpx_views::attr;

    use super::*;

    fn doc_with_sequence(version: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new(ElementType::Fcpxml);
        doc.set_attribute(doc.root(), fcpx_model::VERSION_ATTR, Some(version));
        let resources = doc.create_node(ElementType::Resources);
        doc.append_child(doc.root(), resources);
        let format = doc.create_node(ElementType::Format);
        doc.append_child(resources, format);
        doc.set_attribute(format, attr::ID, Some("r1"));
        let library = doc.create_node(ElementType::Library);
        doc.append_child(doc.root(), library);
        let event = doc.create_node(ElementType::Event);
        doc.append_child(library, event);
        let project = doc.create_node(ElementType::Project);
        doc.append_child(event, project);
        let sequence = doc.create_node(ElementType::Sequence);
        doc.append_child(project, sequence);
        doc.set_attribute(sequence, attr::FORMAT, Some("r1"));
        let spine = doc.create_node(ElementType::Spine);
        doc.append_child(sequence, spine);
        (doc, sequence, spine)
    }

    fn validate(doc: &Document) -> ValidationResult {
        let version = doc.declared_version().expect("declared version");
        StructureValidator::new(version).validate(doc)
    }

    #[test]
    fn a_well_formed_document_has_no_findings() {
        let (doc, _, _) = doc_with_sequence("1.11");
        let result = validate(&doc);
        assert!(result.is_valid(), "unexpected findings: {:?}", result.errors);
    }

    #[test]
    fn every_missing_required_attribute_is_reported() {
        let (mut doc, sequence, spine) = doc_with_sequence("1.11");
        doc.set_attribute(sequence, attr::FORMAT, None);
        let marker = doc.create_node(ElementType::Marker);
        doc.append_child(spine, marker);
        // Markers require both start and value; neither is set.
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);

        let result = validate(&doc);
        let missing: Vec<_> = result
            .iter()
            .filter(|error| error.kind == ValidationErrorKind::MissingRequiredAttribute)
            .collect();
        // sequence format, marker start, marker value, asset-clip ref.
        assert_eq!(missing.len(), 4, "findings: {:?}", result.errors);
        // The marker itself is not an allowed spine child on top of that.
        assert!(
            result
                .iter()
                .any(|error| error.kind == ValidationErrorKind::UnexpectedChild)
        );
    }

    #[test]
    fn unknown_attributes_and_children_are_flagged_with_paths() {
        let (mut doc, _, spine) = doc_with_sequence("1.11");
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);
        doc.set_attribute(clip, attr::REF, Some("r1"));
        doc.set_attribute(clip, "wobble", Some("3"));
        let text = doc.create_node(ElementType::Text);
        doc.append_child(clip, text);

        let result = validate(&doc);
        assert_eq!(result.len(), 2, "findings: {:?}", result.errors);
        let attribute = &result.errors[0];
        assert_eq!(attribute.kind, ValidationErrorKind::UnexpectedAttribute);
        assert_eq!(
            attribute.path(),
            Some("fcpxml/library/event/project/sequence/spine/asset-clip")
        );
        let child = &result.errors[1];
        assert_eq!(child.kind, ValidationErrorKind::UnexpectedChild);
        assert_eq!(
            child.path(),
            Some("fcpxml/library/event/project/sequence/spine/asset-clip/text")
        );
    }

    #[test]
    fn malformed_values_are_flagged_per_kind() {
        let (mut doc, sequence, spine) = doc_with_sequence("1.11");
        doc.set_attribute(sequence, attr::TC_FORMAT, Some("df"));
        let gap = doc.create_node(ElementType::Gap);
        doc.append_child(spine, gap);
        doc.set_attribute(gap, attr::DURATION, Some("1/0s"));

        let result = validate(&doc);
        assert_eq!(result.len(), 2, "findings: {:?}", result.errors);
        assert!(
            result
                .iter()
                .all(|error| error.kind == ValidationErrorKind::InvalidAttributeValue)
        );
    }

    #[test]
    fn version_gated_attributes_are_rejected_below_introduction() {
        let (mut doc, _, spine) = doc_with_sequence("1.9");
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);
        doc.set_attribute(clip, attr::REF, Some("r1"));
        doc.set_attribute(clip, attr::HERO_EYE_OVERRIDE, Some("left"));

        let result = validate(&doc);
        assert_eq!(result.len(), 1, "findings: {:?}", result.errors);
        let error = &result.errors[0];
        assert_eq!(error.kind, ValidationErrorKind::UnexpectedAttribute);
        assert_eq!(error.context.get(context::VERSION).map(String::as_str), Some("1.9"));
    }

    #[test]
    fn renamed_attributes_name_their_replacement() {
        let (mut doc, _, spine) = doc_with_sequence("1.10");
        let sync = doc.create_node(ElementType::SyncClip);
        doc.append_child(spine, sync);
        doc.set_attribute(sync, "syncOffset", Some("2s"));

        let result = validate(&doc);
        assert_eq!(result.len(), 1);
        assert!(result.errors[0].message.contains("contentSyncOffset"));
    }

    #[test]
    fn version_gated_children_are_rejected_below_introduction() {
        let (mut doc, _, spine) = doc_with_sequence("1.12");
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);
        doc.set_attribute(clip, attr::REF, Some("r1"));
        let hidden = doc.create_node(ElementType::HiddenClipMarker);
        doc.append_child(clip, hidden);
        doc.set_attribute(hidden, attr::START, Some("0s"));

        let result = validate(&doc);
        assert_eq!(result.len(), 1, "findings: {:?}", result.errors);
        assert_eq!(result.errors[0].kind, ValidationErrorKind::UnexpectedChild);
    }

    #[test]
    fn cardinality_violations_are_reported_both_ways() {
        let (mut doc, sequence, _) = doc_with_sequence("1.11");
        // A second spine on the sequence.
        let second_spine = doc.create_node(ElementType::Spine);
        doc.append_child(sequence, second_spine);
        // A project with no sequence at all.
        let library = doc.first_child(doc.root(), ElementType::Library).unwrap();
        let event = doc.first_child(library, ElementType::Event).unwrap();
        let empty_project = doc.create_node(ElementType::Project);
        doc.append_child(event, empty_project);

        let result = validate(&doc);
        assert!(
            result
                .iter()
                .any(|error| error.kind == ValidationErrorKind::UnexpectedChild
                    && error.message.contains("only one"))
        );
        assert!(
            result
                .iter()
                .any(|error| error.kind == ValidationErrorKind::MissingRequiredChild
                    && error.path() == Some("fcpxml/library/event/project[1]"))
        );
    }

    #[test]
    fn unknown_versions_yield_a_single_finding() {
        let (mut doc, _, _) = doc_with_sequence("1.11");
        doc.set_attribute(doc.root(), fcpx_model::VERSION_ATTR, Some("2.0"));
        let result = StructureValidator::new(Version::new(2, 0, 0)).validate(&doc);
        assert_eq!(result.len(), 1);
        assert_eq!(result.errors[0].kind, ValidationErrorKind::UnsupportedVersion);
    }
}
