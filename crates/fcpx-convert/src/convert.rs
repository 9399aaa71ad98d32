//! Stepwise version conversion.
//!
//! A conversion never jumps between distant versions. It walks the known
//! list one adjacent pair at a time, and every step rebuilds a fresh tree in
//! document order while consulting the feature table for the step target.
//! The input tree is never touched.

use fcpx_model::{Document, NodeId, Version};
use fcpx_standards::{
    AttributeResolution, StructuralFeature, attribute_availability, defaults_introduced_at,
    element_availability, is_tracked, resolve_attribute, structural_availability,
};
use tracing::debug;

use crate::changes::{AppliedChange, Conversion, ConvertOptions, Packaging};
use crate::error::{ConversionError, Result};

/// Convert `document` to `target` with default options.
pub fn convert(document: &Document, target: Version) -> Result<Conversion> {
    convert_with_options(document, target, &ConvertOptions::default())
}

/// Convert `document` to `target`.
///
/// Preconditions fail before any output exists: the source must declare a
/// known version, the target must be known, and bundle packaging needs a
/// target of 1.10 or later. Converting a document to its own version is the
/// structural identity and logs nothing.
pub fn convert_with_options(
    document: &Document,
    target: Version,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let source = document
        .declared_version()
        .ok_or(ConversionError::UndeclaredSourceVersion)?;
    let source_index = source
        .known_index()
        .ok_or(ConversionError::UnknownSourceVersion { version: source })?;
    let target_index = target
        .known_index()
        .ok_or(ConversionError::UnknownTargetVersion { version: target })?;
    if options.packaging == Packaging::Bundle
        && !structural_availability(StructuralFeature::BundlePackaging, target).is_available()
    {
        return Err(ConversionError::BundleUnsupported { version: target });
    }

    let mut changes = Vec::new();
    let mut output = document.clone();
    for step in steps_between(source_index, target_index) {
        output = apply_step(&output, step, &mut changes);
    }
    debug!(
        source = %source,
        target = %target,
        changes = changes.len(),
        "Converted document"
    );
    Ok(Conversion {
        document: output,
        source,
        target,
        changes,
    })
}

/// One hop between adjacent known versions.
#[derive(Debug, Clone, Copy)]
struct Step {
    from: Version,
    to: Version,
}

fn steps_between(source_index: usize, target_index: usize) -> Vec<Step> {
    let known = &Version::KNOWN;
    let mut steps = Vec::new();
    if source_index < target_index {
        for index in source_index..target_index {
            steps.push(Step {
                from: known[index],
                to: known[index + 1],
            });
        }
    } else {
        for index in (target_index..source_index).rev() {
            steps.push(Step {
                from: known[index + 1],
                to: known[index],
            });
        }
    }
    steps
}

/// Rebuild `source` as it reads under `step.to`, recording every delta.
fn apply_step(source: &Document, step: Step, changes: &mut Vec<AppliedChange>) -> Document {
    let mut output = Document::new(source.tag(source.root()));
    let root = output.root();
    copy_node(source, source.root(), &mut output, root, step, changes);
    output.set_declared_version(step.to);
    output
}

fn copy_node(
    source: &Document,
    from: NodeId,
    output: &mut Document,
    to: NodeId,
    step: Step,
    changes: &mut Vec<AppliedChange>,
) {
    let element = source.tag(from);
    for (name, value) in source.attributes(from) {
        match resolve_attribute(element, name, step.to) {
            AttributeResolution::Keep => output.set_attribute(to, name, Some(value)),
            AttributeResolution::RenameTo(renamed) => {
                output.set_attribute(to, renamed, Some(value));
                changes.push(AppliedChange::RenamedAttribute {
                    path: source.path(from),
                    from: name.to_string(),
                    to: renamed.to_string(),
                    version: step.to,
                });
            }
            AttributeResolution::Drop => {
                changes.push(AppliedChange::StrippedAttribute {
                    path: source.path(from),
                    attribute: name.to_string(),
                    version: step.to,
                });
            }
        }
    }
    // An attribute crossing its introduction boundary gets its schema
    // default written out, so downstream readers see the same picture the
    // older document implied.
    for (name, default) in defaults_introduced_at(element, step.to) {
        if !attribute_availability(element, name, step.from).is_available()
            && output.attribute(to, name).is_none()
        {
            output.set_attribute(to, name, Some(default));
            changes.push(AppliedChange::SynthesizedAttribute {
                path: source.path(from),
                attribute: name.to_string(),
                value: default.to_string(),
                version: step.to,
            });
        }
    }
    if let Some(text) = source.text(from) {
        output.set_text(to, Some(text.to_string()));
    }
    for &child in source.children(from) {
        let child_tag = source.tag(child);
        if !element_availability(child_tag, step.to).is_available() {
            changes.push(AppliedChange::StrippedElement {
                path: source.path(child),
                element: child_tag,
                version: step.to,
            });
            continue;
        }
        if subtree_is_stable(source, child) {
            let copy = output.clone_subtree(source, child);
            output.append_child(to, copy);
            continue;
        }
        let copy = output.create_node(child_tag);
        output.append_child(to, copy);
        copy_node(source, child, output, copy, step, changes);
    }
}

/// True when nothing in the subtree has a feature-table row, so no step can
/// touch it and it copies over wholesale.
fn subtree_is_stable(source: &Document, node: NodeId) -> bool {
    source
        .descendants(node)
        .all(|id| !is_tracked(source.tag(id)))
}

#[cfg(test)]
mod tests {
    use fcpx_model::ElementType;
    use fcpx_views::attr;

    use super::*;

    const V1_7: Version = Version::new(1, 7, 0);
    const V1_8: Version = Version::new(1, 8, 0);
    const V1_9: Version = Version::new(1, 9, 0);
    const V1_10: Version = Version::new(1, 10, 0);
    const V1_12: Version = Version::new(1, 12, 0);
    const V1_13: Version = Version::new(1, 13, 0);

    struct Timeline {
        doc: Document,
        resources: NodeId,
        spine: NodeId,
    }

    fn make_timeline(version: &str) -> Timeline {
        let mut doc = Document::new(ElementType::Fcpxml);
        doc.set_attribute(doc.root(), fcpx_model::VERSION_ATTR, Some(version));
        let resources = doc.create_node(ElementType::Resources);
        doc.append_child(doc.root(), resources);
        let format = doc.create_node(ElementType::Format);
        doc.set_attribute(format, attr::ID, Some("r1"));
        doc.append_child(resources, format);
        let asset = doc.create_node(ElementType::Asset);
        doc.set_attribute(asset, attr::ID, Some("r2"));
        doc.append_child(resources, asset);

        let library = doc.create_node(ElementType::Library);
        doc.append_child(doc.root(), library);
        let event = doc.create_node(ElementType::Event);
        doc.append_child(library, event);
        let project = doc.create_node(ElementType::Project);
        doc.append_child(event, project);
        let sequence = doc.create_node(ElementType::Sequence);
        doc.set_attribute(sequence, attr::FORMAT, Some("r1"));
        doc.append_child(project, sequence);
        let spine = doc.create_node(ElementType::Spine);
        doc.append_child(sequence, spine);
        Timeline {
            doc,
            resources,
            spine,
        }
    }

    fn add_clip(timeline: &mut Timeline) -> NodeId {
        let clip = timeline.doc.create_node(ElementType::AssetClip);
        timeline.doc.set_attribute(clip, attr::REF, Some("r2"));
        timeline.doc.append_child(timeline.spine, clip);
        clip
    }

    fn assert_same_tree(left: &Document, right: &Document) {
        assert_same_node(left, left.root(), right, right.root());
    }

    fn assert_same_node(left: &Document, l: NodeId, right: &Document, r: NodeId) {
        assert_eq!(left.tag(l), right.tag(r), "tag at {}", left.path(l));
        let left_attrs: Vec<_> = left.attributes(l).collect();
        let right_attrs: Vec<_> = right.attributes(r).collect();
        assert_eq!(left_attrs, right_attrs, "attributes at {}", left.path(l));
        assert_eq!(left.text(l), right.text(r), "text at {}", left.path(l));
        assert_eq!(
            left.children(l).len(),
            right.children(r).len(),
            "children at {}",
            left.path(l)
        );
        for (lc, rc) in left.children(l).iter().zip(right.children(r)) {
            assert_same_node(left, *lc, right, *rc);
        }
    }

    #[test]
    fn same_version_is_the_identity() {
        let mut timeline = make_timeline("1.13");
        add_clip(&mut timeline);
        let conversion = convert(&timeline.doc, V1_13).unwrap();
        assert!(conversion.changes.is_empty());
        assert_eq!(conversion.source, V1_13);
        assert_eq!(conversion.target, V1_13);
        assert_same_tree(&timeline.doc, &conversion.document);
    }

    #[test]
    fn downgrade_strips_elements_the_target_lacks() {
        let mut timeline = make_timeline("1.13");
        let clip = add_clip(&mut timeline);
        let hidden = timeline.doc.create_node(ElementType::HiddenClipMarker);
        timeline.doc.set_attribute(hidden, attr::START, Some("4s"));
        timeline.doc.append_child(clip, hidden);

        let conversion = convert(&timeline.doc, V1_12).unwrap();
        let converted_clip = walk_to_clip(&conversion.document);
        assert!(conversion.document.children(converted_clip).is_empty());
        assert_eq!(conversion.changes.len(), 1);
        let AppliedChange::StrippedElement {
            path,
            element,
            version,
        } = &conversion.changes[0]
        else {
            panic!("expected a stripped element, got {:?}", conversion.changes);
        };
        assert_eq!(*element, ElementType::HiddenClipMarker);
        assert_eq!(*version, V1_12);
        assert_eq!(
            path,
            "fcpxml/library/event/project/sequence/spine/asset-clip/hidden-clip-marker"
        );
        assert!(!conversion.is_lossless());
    }

    #[test]
    fn upgrade_materializes_introduced_defaults() {
        let mut timeline = make_timeline("1.7");
        let media_rep = timeline.doc.create_node(ElementType::MediaRep);
        timeline
            .doc
            .set_attribute(media_rep, attr::SRC, Some("file:///movie.mov"));
        let asset = timeline.doc.children(timeline.resources)[1];
        timeline.doc.append_child(asset, media_rep);

        let conversion = convert(&timeline.doc, V1_9).unwrap();
        let converted_rep = {
            let resources = conversion.document.children(conversion.document.root())[0];
            let asset = conversion.document.children(resources)[1];
            conversion.document.children(asset)[0]
        };
        assert_eq!(
            conversion.document.attribute(converted_rep, attr::KIND),
            Some("original-media")
        );
        assert!(conversion.changes.iter().any(|change| matches!(
            change,
            AppliedChange::SynthesizedAttribute { attribute, version, .. }
                if attribute == "kind" && *version == V1_8
        )));
        assert!(conversion.is_lossless());
    }

    #[test]
    fn present_values_suppress_synthesis() {
        let mut timeline = make_timeline("1.7");
        let media_rep = timeline.doc.create_node(ElementType::MediaRep);
        timeline
            .doc
            .set_attribute(media_rep, attr::KIND, Some("proxy-media"));
        let asset = timeline.doc.children(timeline.resources)[1];
        timeline.doc.append_child(asset, media_rep);

        let conversion = convert(&timeline.doc, V1_9).unwrap();
        // The hand-written value wins and nothing is logged for it.
        assert!(conversion.changes.is_empty());
    }

    #[test]
    fn downgrade_to_the_introduction_version_synthesizes_nothing() {
        let mut timeline = make_timeline("1.9");
        let media_rep = timeline.doc.create_node(ElementType::MediaRep);
        timeline
            .doc
            .set_attribute(media_rep, attr::SRC, Some("file:///movie.mov"));
        let asset = timeline.doc.children(timeline.resources)[1];
        timeline.doc.append_child(asset, media_rep);

        let conversion = convert(&timeline.doc, V1_8).unwrap();
        assert!(conversion.changes.is_empty());
    }

    #[test]
    fn renames_carry_the_value_forward() {
        let mut timeline = make_timeline("1.8");
        let sync = timeline.doc.create_node(ElementType::SyncClip);
        timeline
            .doc
            .set_attribute(sync, "syncOffset", Some("3600/2500s"));
        timeline.doc.append_child(timeline.spine, sync);

        let conversion = convert(&timeline.doc, V1_10).unwrap();
        let converted_sync = walk_to_clip(&conversion.document);
        assert_eq!(
            conversion
                .document
                .attribute(converted_sync, attr::CONTENT_SYNC_OFFSET),
            Some("3600/2500s")
        );
        assert_eq!(
            conversion.document.attribute(converted_sync, "syncOffset"),
            None
        );
        assert!(conversion.changes.iter().any(|change| matches!(
            change,
            AppliedChange::RenamedAttribute { from, to, version, .. }
                if from == "syncOffset" && to == "contentSyncOffset" && *version == V1_9
        )));
        assert!(conversion.is_lossless());
    }

    #[test]
    fn renames_resolve_backward_on_downgrade() {
        let mut timeline = make_timeline("1.10");
        let sync = timeline.doc.create_node(ElementType::SyncClip);
        timeline
            .doc
            .set_attribute(sync, attr::CONTENT_SYNC_OFFSET, Some("1s"));
        timeline.doc.append_child(timeline.spine, sync);

        let conversion = convert(&timeline.doc, V1_8).unwrap();
        let converted_sync = walk_to_clip(&conversion.document);
        assert_eq!(
            conversion.document.attribute(converted_sync, "syncOffset"),
            Some("1s")
        );
        assert_eq!(
            conversion
                .document
                .attribute(converted_sync, attr::CONTENT_SYNC_OFFSET),
            None
        );
    }

    #[test]
    fn a_rename_chain_dies_once_every_spelling_is_gone() {
        let mut timeline = make_timeline("1.8");
        let sync = timeline.doc.create_node(ElementType::SyncClip);
        timeline.doc.set_attribute(sync, "syncOffset", Some("2s"));
        timeline.doc.append_child(timeline.spine, sync);

        let conversion = convert(&timeline.doc, V1_13).unwrap();
        let converted_sync = walk_to_clip(&conversion.document);
        assert_eq!(
            conversion.document.attribute(converted_sync, "syncOffset"),
            None
        );
        assert_eq!(
            conversion
                .document
                .attribute(converted_sync, attr::CONTENT_SYNC_OFFSET),
            None
        );
        let kinds: Vec<_> = conversion
            .changes
            .iter()
            .map(|change| (change.kind_name(), change.version()))
            .collect();
        assert_eq!(
            kinds,
            vec![("rename-attribute", V1_9), ("strip-attribute", V1_12)]
        );
    }

    #[test]
    fn bundle_packaging_needs_1_10() {
        let timeline = make_timeline("1.13");
        let options = ConvertOptions {
            packaging: Packaging::Bundle,
        };
        let err = convert_with_options(&timeline.doc, V1_9, &options).unwrap_err();
        assert_eq!(err, ConversionError::BundleUnsupported { version: V1_9 });
        assert!(convert_with_options(&timeline.doc, V1_10, &options).is_ok());
    }

    #[test]
    fn unknown_versions_are_refused_up_front() {
        let mut timeline = make_timeline("1.13");
        assert_eq!(
            convert(&timeline.doc, Version::new(2, 0, 0)).unwrap_err(),
            ConversionError::UnknownTargetVersion {
                version: Version::new(2, 0, 0)
            }
        );
        timeline
            .doc
            .set_attribute(timeline.doc.root(), fcpx_model::VERSION_ATTR, Some("1.4"));
        assert_eq!(
            convert(&timeline.doc, V1_13).unwrap_err(),
            ConversionError::UnknownSourceVersion {
                version: Version::new(1, 4, 0)
            }
        );
        timeline
            .doc
            .set_attribute(timeline.doc.root(), fcpx_model::VERSION_ATTR, None);
        assert_eq!(
            convert(&timeline.doc, V1_13).unwrap_err(),
            ConversionError::UndeclaredSourceVersion
        );
    }

    #[test]
    fn untracked_subtrees_survive_many_steps_untouched() {
        let mut timeline = make_timeline("1.13");
        let clip = add_clip(&mut timeline);
        let note = timeline.doc.create_node(ElementType::Note);
        timeline
            .doc
            .set_text(note, Some("pull the b-roll earlier".to_string()));
        timeline.doc.append_child(clip, note);
        let marker = timeline.doc.create_node(ElementType::Marker);
        timeline.doc.set_attribute(marker, attr::START, Some("2s"));
        timeline
            .doc
            .set_attribute(marker, attr::VALUE, Some("recheck color"));
        timeline.doc.append_child(clip, marker);

        let conversion = convert(&timeline.doc, V1_7).unwrap();
        let converted_clip = walk_to_clip(&conversion.document);
        let converted_note = conversion
            .document
            .first_child(converted_clip, ElementType::Note)
            .unwrap();
        assert_eq!(
            conversion.document.text(converted_note),
            Some("pull the b-roll earlier")
        );
        let converted_marker = conversion
            .document
            .first_child(converted_clip, ElementType::Marker)
            .unwrap();
        assert_eq!(
            conversion.document.attribute(converted_marker, attr::VALUE),
            Some("recheck color")
        );
    }

    /// First story element of the first spine.
    fn walk_to_clip(doc: &Document) -> NodeId {
        let library = doc.children(doc.root())[1];
        let event = doc.children(library)[0];
        let project = doc.children(event)[0];
        let sequence = doc.children(project)[0];
        let spine = doc.children(sequence)[0];
        doc.children(spine)[0]
    }
}
