//! End-to-end validation over realistic documents: both passes combined
//! into one report.

use fcpx_model::{Document, ElementType, NodeId, ValidationErrorKind, VERSION_ATTR, context};
use fcpx_validate::perform_validation;
use fcpx_views::attr;

struct Timeline {
    doc: Document,
    resources: NodeId,
    spine: NodeId,
}

fn make_timeline(version: &str) -> Timeline {
    let mut doc = Document::new(ElementType::Fcpxml);
    doc.set_attribute(doc.root(), VERSION_ATTR, Some(version));
    let resources = doc.create_node(ElementType::Resources);
    doc.append_child(doc.root(), resources);
    let format = doc.create_node(ElementType::Format);
    doc.append_child(resources, format);
    doc.set_attribute(format, attr::ID, Some("r1"));
    doc.set_attribute(format, attr::FRAME_DURATION, Some("1001/30000s"));
    let asset = doc.create_node(ElementType::Asset);
    doc.append_child(resources, asset);
    doc.set_attribute(asset, attr::ID, Some("r2"));
    doc.set_attribute(asset, attr::FORMAT, Some("r1"));

    let library = doc.create_node(ElementType::Library);
    doc.append_child(doc.root(), library);
    let event = doc.create_node(ElementType::Event);
    doc.append_child(library, event);
    doc.set_attribute(event, attr::NAME, Some("Dailies"));
    let project = doc.create_node(ElementType::Project);
    doc.append_child(event, project);
    doc.set_attribute(project, attr::NAME, Some("Cut 01"));
    let sequence = doc.create_node(ElementType::Sequence);
    doc.append_child(project, sequence);
    doc.set_attribute(sequence, attr::FORMAT, Some("r1"));
    let spine = doc.create_node(ElementType::Spine);
    doc.append_child(sequence, spine);

    Timeline {
        doc,
        resources,
        spine,
    }
}

fn add_clip(timeline: &mut Timeline, reference: &str) -> NodeId {
    let clip = timeline.doc.create_node(ElementType::AssetClip);
    timeline.doc.append_child(timeline.spine, clip);
    timeline.doc.set_attribute(clip, attr::REF, Some(reference));
    timeline
        .doc
        .set_attribute(clip, attr::DURATION, Some("4s"));
    clip
}

#[test]
fn a_complete_document_is_valid() {
    let mut timeline = make_timeline("1.13");
    add_clip(&mut timeline, "r2");
    let report = perform_validation(&timeline.doc);
    assert!(report.is_valid(), "{}", report.detailed_description());
    assert_eq!(report.summary(), "document is valid");
}

#[test]
fn structural_and_semantic_findings_land_in_their_own_buckets() {
    let mut timeline = make_timeline("1.13");
    let clip = add_clip(&mut timeline, "r99");
    timeline.doc.set_attribute(clip, attr::ENABLED, Some("maybe"));

    let report = perform_validation(&timeline.doc);
    assert_eq!(report.structure.len(), 1);
    assert_eq!(
        report.structure.errors[0].kind,
        ValidationErrorKind::InvalidAttributeValue
    );
    assert_eq!(report.semantics.len(), 1);
    let dangling = &report.semantics.errors[0];
    assert_eq!(dangling.kind, ValidationErrorKind::UnresolvedReference);
    assert_eq!(
        dangling.context.get(context::ID).map(String::as_str),
        Some("r99")
    );
    assert_eq!(report.summary(), "1 structural and 1 semantic violation(s)");
}

#[test]
fn an_old_version_rejects_features_from_newer_schemas() {
    let mut timeline = make_timeline("1.7");
    let clip = add_clip(&mut timeline, "r2");
    timeline
        .doc
        .set_attribute(clip, attr::HERO_EYE_OVERRIDE, Some("left"));
    let caption = timeline.doc.create_node(ElementType::Caption);
    timeline.doc.append_child(clip, caption);

    let report = perform_validation(&timeline.doc);
    assert_eq!(report.structure.len(), 2, "{}", report.detailed_description());
    let kinds: Vec<_> = report
        .structure
        .iter()
        .map(|error| error.kind)
        .collect();
    assert!(kinds.contains(&ValidationErrorKind::UnexpectedAttribute));
    assert!(kinds.contains(&ValidationErrorKind::UnexpectedChild));
    assert!(report.semantics.is_valid());
}

#[test]
fn duplicate_ids_and_missing_attributes_accumulate() {
    let mut timeline = make_timeline("1.13");
    add_clip(&mut timeline, "r2");
    // A second resource reusing r2, itself missing its required src.
    let duplicate = timeline.doc.create_node(ElementType::Asset);
    timeline.doc.append_child(timeline.resources, duplicate);
    timeline.doc.set_attribute(duplicate, attr::ID, Some("r2"));
    let rep = timeline.doc.create_node(ElementType::MediaRep);
    timeline.doc.append_child(duplicate, rep);

    let report = perform_validation(&timeline.doc);
    assert_eq!(report.structure.len(), 1);
    assert_eq!(
        report.structure.errors[0].kind,
        ValidationErrorKind::MissingRequiredAttribute
    );
    assert_eq!(report.semantics.len(), 1);
    assert_eq!(
        report.semantics.errors[0].kind,
        ValidationErrorKind::DuplicateResourceId
    );
    assert!(!report.is_valid());
    assert_eq!(report.error_count(), 2);
}

#[test]
fn findings_quote_full_element_paths() {
    let mut timeline = make_timeline("1.13");
    add_clip(&mut timeline, "r2");
    let second = add_clip(&mut timeline, "r2");
    let marker = timeline.doc.create_node(ElementType::Marker);
    timeline.doc.append_child(second, marker);
    timeline.doc.set_attribute(marker, attr::START, Some("1s"));
    // value is required on markers and deliberately left off.

    let report = perform_validation(&timeline.doc);
    assert_eq!(report.structure.len(), 1);
    assert_eq!(
        report.structure.errors[0].path(),
        Some("fcpxml/library/event/project/sequence/spine/asset-clip[1]/marker")
    );
}
