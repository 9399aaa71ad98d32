//! Capability traits shared across views.
//!
//! Each trait captures one recurring attribute or child-element pattern and
//! carries its accessors as default methods, so a view opts in with a single
//! empty `impl`. The conventions:
//!
//! - required timing attributes (`start`, `offset`) default to zero when
//!   absent and the setter always writes;
//! - optional attributes return `Option` and a `None` setter removes them;
//! - malformed values read as absent, never as errors.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use fcpx_model::{Document, ElementType, RationalTime};

use crate::annotations::{ChapterMarkerView, KeywordView, MarkerView, RatingView};
use crate::attr;
use crate::resources::MediaRepView;
use crate::view::{TypedView, bool_attr, int_attr, set_bool_attr, typed_children};

/// Required `start` attribute; absent reads as zero.
pub trait HasStart: TypedView {
    fn start(self, doc: &Document) -> RationalTime {
        doc.attribute(self.id(), attr::START)
            .and_then(RationalTime::parse)
            .unwrap_or_default()
    }

    fn set_start(self, doc: &mut Document, value: RationalTime) {
        let rendered = value.to_string();
        doc.set_attribute(self.id(), attr::START, Some(&rendered));
    }
}

/// Required `offset` attribute; absent reads as zero.
pub trait HasOffset: TypedView {
    fn offset(self, doc: &Document) -> RationalTime {
        doc.attribute(self.id(), attr::OFFSET)
            .and_then(RationalTime::parse)
            .unwrap_or_default()
    }

    fn set_offset(self, doc: &mut Document, value: RationalTime) {
        let rendered = value.to_string();
        doc.set_attribute(self.id(), attr::OFFSET, Some(&rendered));
    }
}

/// Optional `duration` attribute.
pub trait HasDuration: TypedView {
    fn duration(self, doc: &Document) -> Option<RationalTime> {
        doc.attribute(self.id(), attr::DURATION)
            .and_then(RationalTime::parse)
    }

    fn set_duration(self, doc: &mut Document, value: Option<RationalTime>) {
        let rendered = value.map(|time| time.to_string());
        doc.set_attribute(self.id(), attr::DURATION, rendered.as_deref());
    }
}

/// Optional `name` attribute.
pub trait HasName: TypedView {
    fn name(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.id(), attr::NAME)
    }

    fn set_name(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.id(), attr::NAME, value);
    }
}

/// Optional `lane` attribute.
pub trait HasLane: TypedView {
    fn lane(self, doc: &Document) -> Option<i64> {
        int_attr(doc, self.id(), attr::LANE)
    }

    fn set_lane(self, doc: &mut Document, value: Option<i64>) {
        let rendered = value.map(|lane| lane.to_string());
        doc.set_attribute(self.id(), attr::LANE, rendered.as_deref());
    }
}

/// `enabled` flag; absent means enabled, and setting the default removes the
/// attribute.
pub trait HasEnabled: TypedView {
    fn enabled(self, doc: &Document) -> bool {
        bool_attr(doc, self.id(), attr::ENABLED).unwrap_or(true)
    }

    fn set_enabled(self, doc: &mut Document, value: bool) {
        let stored = if value { None } else { Some(false) };
        set_bool_attr(doc, self.id(), attr::ENABLED, stored);
    }
}

/// `ref` attribute pointing at a resource id.
pub trait HasRef: TypedView {
    fn ref_id(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.id(), attr::REF)
    }

    fn set_ref_id(self, doc: &mut Document, value: &str) {
        doc.set_attribute(self.id(), attr::REF, Some(value));
    }
}

/// `format` attribute pointing at a format resource.
pub trait HasFormatRef: TypedView {
    fn format_ref(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.id(), attr::FORMAT)
    }

    fn set_format_ref(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.id(), attr::FORMAT, value);
    }
}

/// Free-text `note` child element.
pub trait HasNote: TypedView {
    fn note(self, doc: &Document) -> Option<&str> {
        let note = doc.first_child(self.id(), ElementType::Note)?;
        doc.text(note)
    }

    fn set_note(self, doc: &mut Document, value: Option<&str>) {
        match value {
            Some(text) => {
                let note = match doc.first_child(self.id(), ElementType::Note) {
                    Some(existing) => existing,
                    None => {
                        let created = doc.create_node(ElementType::Note);
                        doc.append_child(self.id(), created);
                        created
                    }
                };
                doc.set_text(note, Some(text.to_string()));
            }
            None => {
                doc.remove_children(self.id(), |doc, child| {
                    doc.tag(child) == ElementType::Note
                });
            }
        }
    }
}

/// Security-scoped `bookmark` child holding a base64 payload.
///
/// A payload that fails to decode reads as absent.
pub trait HasBookmark: TypedView {
    fn bookmark(self, doc: &Document) -> Option<Vec<u8>> {
        let bookmark = doc.first_child(self.id(), ElementType::Bookmark)?;
        let encoded = doc.text(bookmark)?;
        BASE64.decode(encoded.trim().as_bytes()).ok()
    }

    fn set_bookmark(self, doc: &mut Document, payload: Option<&[u8]>) {
        match payload {
            Some(bytes) => {
                let bookmark = match doc.first_child(self.id(), ElementType::Bookmark) {
                    Some(existing) => existing,
                    None => {
                        let created = doc.create_node(ElementType::Bookmark);
                        doc.append_child(self.id(), created);
                        created
                    }
                };
                doc.set_text(bookmark, Some(BASE64.encode(bytes)));
            }
            None => {
                doc.remove_children(self.id(), |doc, child| {
                    doc.tag(child) == ElementType::Bookmark
                });
            }
        }
    }
}

/// `metadata` child holding `md` key/value entries.
pub trait HasMetadata: TypedView {
    fn metadata_value<'a>(self, doc: &'a Document, key: &str) -> Option<&'a str> {
        let metadata = doc.first_child(self.id(), ElementType::Metadata)?;
        doc.children(metadata)
            .iter()
            .copied()
            .filter(|entry| doc.tag(*entry) == ElementType::MetadataEntry)
            .find(|entry| doc.attribute(*entry, attr::KEY) == Some(key))
            .and_then(|entry| doc.attribute(entry, attr::VALUE))
    }

    /// Writes one entry, creating the `metadata` container and the `md`
    /// entry on first use.
    fn set_metadata_value(self, doc: &mut Document, key: &str, value: &str) {
        let metadata = match doc.first_child(self.id(), ElementType::Metadata) {
            Some(existing) => existing,
            None => {
                let created = doc.create_node(ElementType::Metadata);
                doc.append_child(self.id(), created);
                created
            }
        };
        let entry = doc
            .children(metadata)
            .iter()
            .copied()
            .filter(|entry| doc.tag(*entry) == ElementType::MetadataEntry)
            .find(|entry| doc.attribute(*entry, attr::KEY) == Some(key));
        let entry = match entry {
            Some(existing) => existing,
            None => {
                let created = doc.create_node(ElementType::MetadataEntry);
                doc.append_child(metadata, created);
                doc.set_attribute(created, attr::KEY, Some(key));
                created
            }
        };
        doc.set_attribute(entry, attr::VALUE, Some(value));
    }
}

/// Views whose children may include annotations.
pub trait HasAnnotations: TypedView {
    fn markers(self, doc: &Document) -> Vec<MarkerView> {
        typed_children(doc, self.id())
    }

    fn chapter_markers(self, doc: &Document) -> Vec<ChapterMarkerView> {
        typed_children(doc, self.id())
    }

    fn keywords(self, doc: &Document) -> Vec<KeywordView> {
        typed_children(doc, self.id())
    }

    fn ratings(self, doc: &Document) -> Vec<RatingView> {
        typed_children(doc, self.id())
    }
}

/// Views whose children may include `media-rep` representations.
pub trait HasMediaReps: TypedView {
    fn media_reps(self, doc: &Document) -> Vec<MediaRepView> {
        typed_children(doc, self.id())
    }
}
