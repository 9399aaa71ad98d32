//! Views over the shared resource definitions: assets, effects, formats,
//! media containers, and their media representations.

use fcpx_model::{Document, NodeId, RationalTime};

use crate::attr;
use crate::caps::{
    HasBookmark, HasDuration, HasFormatRef, HasMediaReps, HasMetadata, HasName, HasNote, HasStart,
};
use crate::view::{TypedView, bool_attr, int_attr, set_bool_attr, typed_children, typed_view};

/// `kind` a `media-rep` takes when the attribute is absent.
pub const DEFAULT_MEDIA_REP_KIND: &str = "original-media";

typed_view! {
    /// A file-backed media resource.
    AssetView => Asset
}

impl HasName for AssetView {}
impl HasStart for AssetView {}
impl HasDuration for AssetView {}
impl HasFormatRef for AssetView {}
impl HasNote for AssetView {}
impl HasMetadata for AssetView {}
impl HasMediaReps for AssetView {}

impl AssetView {
    pub fn resource_id(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ID)
    }

    pub fn set_resource_id(self, doc: &mut Document, id: &str) {
        doc.set_attribute(self.0, attr::ID, Some(id));
    }

    pub fn uid(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::UID)
    }

    pub fn set_uid(self, doc: &mut Document, uid: Option<&str>) {
        doc.set_attribute(self.0, attr::UID, uid);
    }

    pub fn has_video(self, doc: &Document) -> bool {
        bool_attr(doc, self.0, attr::HAS_VIDEO).unwrap_or(false)
    }

    pub fn set_has_video(self, doc: &mut Document, value: Option<bool>) {
        set_bool_attr(doc, self.0, attr::HAS_VIDEO, value);
    }

    pub fn has_audio(self, doc: &Document) -> bool {
        bool_attr(doc, self.0, attr::HAS_AUDIO).unwrap_or(false)
    }

    pub fn set_has_audio(self, doc: &mut Document, value: Option<bool>) {
        set_bool_attr(doc, self.0, attr::HAS_AUDIO, value);
    }

    pub fn audio_channels(self, doc: &Document) -> Option<i64> {
        int_attr(doc, self.0, attr::AUDIO_CHANNELS)
    }

    pub fn audio_rate(self, doc: &Document) -> Option<i64> {
        int_attr(doc, self.0, attr::AUDIO_RATE)
    }

    /// Stereoscopic hero-eye override, carried by newer schema versions.
    pub fn hero_eye_override(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::HERO_EYE_OVERRIDE)
    }

    pub fn set_hero_eye_override(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::HERO_EYE_OVERRIDE, value);
    }
}

typed_view! {
    /// A reusable effect definition.
    EffectView => Effect
}

impl HasName for EffectView {}

impl EffectView {
    pub fn resource_id(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ID)
    }

    pub fn uid(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::UID)
    }

    pub fn src(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::SRC)
    }
}

typed_view! {
    /// A video format description (frame size and timing).
    FormatView => Format
}

impl HasName for FormatView {}

impl FormatView {
    pub fn resource_id(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ID)
    }

    pub fn frame_duration(self, doc: &Document) -> Option<RationalTime> {
        doc.attribute(self.0, attr::FRAME_DURATION)
            .and_then(RationalTime::parse)
    }

    pub fn set_frame_duration(self, doc: &mut Document, value: Option<RationalTime>) {
        let rendered = value.map(|time| time.to_string());
        doc.set_attribute(self.0, attr::FRAME_DURATION, rendered.as_deref());
    }

    pub fn width(self, doc: &Document) -> Option<i64> {
        int_attr(doc, self.0, attr::WIDTH)
    }

    pub fn height(self, doc: &Document) -> Option<i64> {
        int_attr(doc, self.0, attr::HEIGHT)
    }

    pub fn color_space(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::COLOR_SPACE)
    }

    /// Stereoscopic hero eye selection, carried by newer schema versions.
    pub fn hero_eye(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::HERO_EYE)
    }

    pub fn set_hero_eye(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::HERO_EYE, value);
    }
}

typed_view! {
    /// A compound media resource wrapping a multicam or a nested sequence.
    MediaView => Media
}

impl HasName for MediaView {}

impl MediaView {
    pub fn resource_id(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ID)
    }

    pub fn uid(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::UID)
    }

    pub fn multicam(self, doc: &Document) -> Option<MulticamView> {
        crate::view::first_typed_child(doc, self.0)
    }
}

typed_view! {
    /// The multicam body of a `media` resource.
    MulticamView => Multicam
}

impl HasFormatRef for MulticamView {}

impl MulticamView {
    pub fn tc_start(self, doc: &Document) -> RationalTime {
        doc.attribute(self.0, attr::TC_START)
            .and_then(RationalTime::parse)
            .unwrap_or_default()
    }

    pub fn angles(self, doc: &Document) -> Vec<McAngleView> {
        typed_children(doc, self.0)
    }
}

typed_view! {
    /// One camera angle inside a multicam.
    McAngleView => McAngle
}

impl HasName for McAngleView {}

impl McAngleView {
    pub fn angle_id(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ANGLE_ID)
    }
}

typed_view! {
    /// One on-disk representation of an asset.
    MediaRepView => MediaRep
}

impl HasBookmark for MediaRepView {}

impl MediaRepView {
    /// Representation kind; absent reads as [`DEFAULT_MEDIA_REP_KIND`].
    pub fn kind(self, doc: &Document) -> &str {
        doc.attribute(self.0, attr::KIND)
            .unwrap_or(DEFAULT_MEDIA_REP_KIND)
    }

    pub fn set_kind(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::KIND, value);
    }

    pub fn src(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::SRC)
    }

    pub fn set_src(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::SRC, value);
    }

    pub fn sig(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::SIG)
    }
}

#[cfg(test)]
mod tests {
    use fcpx_model::ElementType;

    use super::*;
    use crate::caps::{HasDuration, HasStart};

    fn asset_doc() -> (Document, NodeId) {
        let mut doc = Document::new(ElementType::Fcpxml);
        let resources = doc.create_node(ElementType::Resources);
        doc.append_child(doc.root(), resources);
        let asset = doc.create_node(ElementType::Asset);
        doc.append_child(resources, asset);
        (doc, asset)
    }

    #[test]
    fn construction_is_tag_checked() {
        let (doc, asset) = asset_doc();
        assert!(AssetView::from_node(&doc, asset).is_some());
        assert!(FormatView::from_node(&doc, asset).is_none());
    }

    #[test]
    fn start_defaults_to_zero_and_duration_is_optional() {
        let (mut doc, asset) = asset_doc();
        let view = AssetView::from_node(&doc, asset).unwrap();
        assert!(view.start(&doc).is_zero());
        assert_eq!(view.duration(&doc), None);

        view.set_start(&mut doc, RationalTime::new(1001, 30000).unwrap());
        assert_eq!(doc.attribute(asset, attr::START), Some("1001/30000s"));

        view.set_duration(&mut doc, Some(RationalTime::from_seconds(5)));
        assert_eq!(doc.attribute(asset, attr::DURATION), Some("5s"));
        view.set_duration(&mut doc, None);
        assert_eq!(doc.attribute(asset, attr::DURATION), None);
    }

    #[test]
    fn malformed_timing_reads_as_absent() {
        let (mut doc, asset) = asset_doc();
        doc.set_attribute(asset, attr::START, Some("not-a-time"));
        doc.set_attribute(asset, attr::DURATION, Some("1/0s"));
        let view = AssetView::from_node(&doc, asset).unwrap();
        assert!(view.start(&doc).is_zero());
        assert_eq!(view.duration(&doc), None);
    }

    #[test]
    fn media_rep_kind_falls_back_to_original_media() {
        let (mut doc, asset) = asset_doc();
        let rep = doc.create_node(ElementType::MediaRep);
        doc.append_child(asset, rep);
        let view = MediaRepView::from_node(&doc, rep).unwrap();
        assert_eq!(view.kind(&doc), "original-media");
        view.set_kind(&mut doc, Some("proxy-media"));
        assert_eq!(view.kind(&doc), "proxy-media");
    }

    #[test]
    fn bookmark_round_trips_and_bad_payloads_read_as_absent() {
        let (mut doc, asset) = asset_doc();
        let rep = doc.create_node(ElementType::MediaRep);
        doc.append_child(asset, rep);
        let view = MediaRepView::from_node(&doc, rep).unwrap();

        assert_eq!(view.bookmark(&doc), None);
        view.set_bookmark(&mut doc, Some(b"bookmarkdata"));
        assert_eq!(view.bookmark(&doc), Some(b"bookmarkdata".to_vec()));

        let child = doc.first_child(rep, ElementType::Bookmark).unwrap();
        doc.set_text(child, Some("%%% not base64 %%%".to_string()));
        assert_eq!(view.bookmark(&doc), None);

        view.set_bookmark(&mut doc, None);
        assert_eq!(doc.first_child(rep, ElementType::Bookmark), None);
    }
}
