//! Views over timeline content: the sequence, its spine, the clip family,
//! and the timing elements clips carry inside them.

use fcpx_model::{Document, ElementType, NodeId, RationalTime};

use crate::attr;
use crate::caps::{
    HasAnnotations, HasDuration, HasEnabled, HasFormatRef, HasLane, HasMetadata, HasName, HasNote,
    HasOffset, HasRef, HasStart,
};
use crate::view::{TypedView, bool_attr, first_typed_child, typed_children, typed_view};

typed_view! {
    /// A project timeline.
    SequenceView => Sequence
}

impl HasDuration for SequenceView {}
impl HasFormatRef for SequenceView {}
impl HasNote for SequenceView {}
impl HasMetadata for SequenceView {}

impl SequenceView {
    pub fn tc_start(self, doc: &Document) -> RationalTime {
        doc.attribute(self.0, attr::TC_START)
            .and_then(RationalTime::parse)
            .unwrap_or_default()
    }

    pub fn set_tc_start(self, doc: &mut Document, value: RationalTime) {
        let rendered = value.to_string();
        doc.set_attribute(self.0, attr::TC_START, Some(&rendered));
    }

    /// Drop-frame flag, `"DF"` or `"NDF"`.
    pub fn tc_format(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::TC_FORMAT)
    }

    pub fn audio_layout(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::AUDIO_LAYOUT)
    }

    pub fn audio_rate(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::AUDIO_RATE)
    }

    pub fn spine(self, doc: &Document) -> Option<SpineView> {
        first_typed_child(doc, self.0)
    }
}

typed_view! {
    /// The primary storyline container.
    SpineView => Spine
}

impl HasName for SpineView {}
impl HasLane for SpineView {}
impl HasOffset for SpineView {}
impl HasFormatRef for SpineView {}

impl SpineView {
    /// Direct story-element children, in timeline order.
    pub fn items(self, doc: &Document) -> Vec<NodeId> {
        doc.children(self.0)
            .iter()
            .copied()
            .filter(|child| doc.tag(*child).is_story_element())
            .collect()
    }
}

typed_view! {
    /// A clip backed directly by an asset resource.
    AssetClipView => AssetClip
}

impl HasRef for AssetClipView {}
impl HasName for AssetClipView {}
impl HasOffset for AssetClipView {}
impl HasStart for AssetClipView {}
impl HasDuration for AssetClipView {}
impl HasEnabled for AssetClipView {}
impl HasLane for AssetClipView {}
impl HasFormatRef for AssetClipView {}
impl HasNote for AssetClipView {}
impl HasMetadata for AssetClipView {}
impl HasAnnotations for AssetClipView {}

impl AssetClipView {
    pub fn audio_role(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::AUDIO_ROLE)
    }

    pub fn set_audio_role(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::AUDIO_ROLE, value);
    }
}

typed_view! {
    /// A container clip with its own internal timeline.
    ClipView => Clip
}

impl HasName for ClipView {}
impl HasOffset for ClipView {}
impl HasStart for ClipView {}
impl HasDuration for ClipView {}
impl HasEnabled for ClipView {}
impl HasLane for ClipView {}
impl HasFormatRef for ClipView {}
impl HasNote for ClipView {}
impl HasMetadata for ClipView {}
impl HasAnnotations for ClipView {}

typed_view! {
    /// Empty timeline space.
    GapView => Gap
}

impl HasName for GapView {}
impl HasOffset for GapView {}
impl HasStart for GapView {}
impl HasDuration for GapView {}
impl HasNote for GapView {}
impl HasAnnotations for GapView {}

typed_view! {
    /// A clip referencing a compound `media` resource.
    RefClipView => RefClip
}

impl HasRef for RefClipView {}
impl HasName for RefClipView {}
impl HasOffset for RefClipView {}
impl HasStart for RefClipView {}
impl HasDuration for RefClipView {}
impl HasEnabled for RefClipView {}
impl HasLane for RefClipView {}
impl HasNote for RefClipView {}
impl HasMetadata for RefClipView {}
impl HasAnnotations for RefClipView {}

typed_view! {
    /// A synchronized clip grouping separately recorded media.
    SyncClipView => SyncClip
}

impl HasName for SyncClipView {}
impl HasOffset for SyncClipView {}
impl HasStart for SyncClipView {}
impl HasDuration for SyncClipView {}
impl HasEnabled for SyncClipView {}
impl HasLane for SyncClipView {}
impl HasFormatRef for SyncClipView {}
impl HasNote for SyncClipView {}
impl HasMetadata for SyncClipView {}
impl HasAnnotations for SyncClipView {}

impl SyncClipView {
    pub fn content_sync_offset(self, doc: &Document) -> Option<RationalTime> {
        doc.attribute(self.0, attr::CONTENT_SYNC_OFFSET)
            .and_then(RationalTime::parse)
    }

    pub fn set_content_sync_offset(self, doc: &mut Document, value: Option<RationalTime>) {
        let rendered = value.map(|time| time.to_string());
        doc.set_attribute(self.0, attr::CONTENT_SYNC_OFFSET, rendered.as_deref());
    }
}

typed_view! {
    /// A clip referencing a multicam `media` resource.
    McClipView => McClip
}

impl HasRef for McClipView {}
impl HasName for McClipView {}
impl HasOffset for McClipView {}
impl HasStart for McClipView {}
impl HasDuration for McClipView {}
impl HasEnabled for McClipView {}
impl HasLane for McClipView {}
impl HasNote for McClipView {}
impl HasMetadata for McClipView {}
impl HasAnnotations for McClipView {}

impl McClipView {
    /// `mc-source` children selecting active angles.
    pub fn sources(self, doc: &Document) -> Vec<NodeId> {
        doc.children(self.0)
            .iter()
            .copied()
            .filter(|child| doc.tag(*child) == ElementType::McSource)
            .collect()
    }
}

typed_view! {
    /// A pick container holding alternative takes.
    AuditionView => Audition
}

impl HasLane for AuditionView {}
impl HasOffset for AuditionView {}

impl AuditionView {
    /// The contained takes; the first one is the active pick.
    pub fn items(self, doc: &Document) -> Vec<NodeId> {
        doc.children(self.0)
            .iter()
            .copied()
            .filter(|child| doc.tag(*child).is_story_element())
            .collect()
    }
}

typed_view! {
    /// A transition joining adjacent spine items.
    TransitionView => Transition
}

impl HasName for TransitionView {}
impl HasOffset for TransitionView {}
impl HasDuration for TransitionView {}

typed_view! {
    /// A title clip backed by a text effect.
    TitleView => Title
}

impl HasRef for TitleView {}
impl HasName for TitleView {}
impl HasOffset for TitleView {}
impl HasStart for TitleView {}
impl HasDuration for TitleView {}
impl HasEnabled for TitleView {}
impl HasLane for TitleView {}
impl HasNote for TitleView {}
impl HasAnnotations for TitleView {}

typed_view! {
    /// A bare video component.
    VideoView => Video
}

impl HasRef for VideoView {}
impl HasName for VideoView {}
impl HasOffset for VideoView {}
impl HasStart for VideoView {}
impl HasDuration for VideoView {}
impl HasEnabled for VideoView {}
impl HasLane for VideoView {}
impl HasAnnotations for VideoView {}

impl VideoView {
    pub fn role(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ROLE)
    }
}

typed_view! {
    /// A bare audio component.
    AudioView => Audio
}

impl HasRef for AudioView {}
impl HasName for AudioView {}
impl HasOffset for AudioView {}
impl HasStart for AudioView {}
impl HasDuration for AudioView {}
impl HasEnabled for AudioView {}
impl HasLane for AudioView {}
impl HasAnnotations for AudioView {}

impl AudioView {
    pub fn role(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ROLE)
    }

    pub fn set_role(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::ROLE, value);
    }
}

typed_view! {
    /// A closed caption attached to a clip.
    CaptionView => Caption
}

impl HasName for CaptionView {}
impl HasLane for CaptionView {}
impl HasOffset for CaptionView {}
impl HasStart for CaptionView {}
impl HasDuration for CaptionView {}
impl HasEnabled for CaptionView {}

impl CaptionView {
    pub fn role(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::ROLE)
    }

    pub fn set_role(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::ROLE, value);
    }
}

typed_view! {
    /// An effect parameter, possibly nested.
    ParamView => Param
}

impl HasName for ParamView {}
impl HasEnabled for ParamView {}

impl ParamView {
    pub fn key(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::KEY)
    }

    pub fn value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::VALUE)
    }

    pub fn set_value(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::VALUE, value);
    }

    /// Secondary value, carried by newer schema versions.
    pub fn aux_value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::AUX_VALUE)
    }

    pub fn set_aux_value(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::AUX_VALUE, value);
    }

    pub fn params(self, doc: &Document) -> Vec<ParamView> {
        typed_children(doc, self.0)
    }
}

typed_view! {
    /// Frame-rate conformance settings on a clip.
    ConformRateView => ConformRate
}

impl ConformRateView {
    pub fn src_frame_rate(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::SRC_FRAME_RATE)
    }

    pub fn scale_enabled(self, doc: &Document) -> bool {
        bool_attr(doc, self.0, attr::SCALE_ENABLED).unwrap_or(true)
    }
}

typed_view! {
    /// A retiming curve on a clip.
    TimeMapView => TimeMap
}

impl TimeMapView {
    pub fn time_points(self, doc: &Document) -> Vec<TimePointView> {
        typed_children(doc, self.0)
    }
}

typed_view! {
    /// One keyframe of a retiming curve.
    TimePointView => TimePoint
}

impl TimePointView {
    pub fn time(self, doc: &Document) -> RationalTime {
        doc.attribute(self.0, attr::TIME)
            .and_then(RationalTime::parse)
            .unwrap_or_default()
    }

    pub fn value(self, doc: &Document) -> Option<RationalTime> {
        doc.attribute(self.0, attr::VALUE)
            .and_then(RationalTime::parse)
    }

    pub fn interp(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::INTERP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> (Document, NodeId) {
        let mut doc = Document::new(ElementType::Fcpxml);
        let library = doc.create_node(ElementType::Library);
        doc.append_child(doc.root(), library);
        let event = doc.create_node(ElementType::Event);
        doc.append_child(library, event);
        let project = doc.create_node(ElementType::Project);
        doc.append_child(event, project);
        let sequence = doc.create_node(ElementType::Sequence);
        doc.append_child(project, sequence);
        let spine = doc.create_node(ElementType::Spine);
        doc.append_child(sequence, spine);
        (doc, spine)
    }

    #[test]
    fn spine_items_skip_non_story_children() {
        let (mut doc, spine) = timeline();
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);
        let gap = doc.create_node(ElementType::Gap);
        doc.append_child(spine, gap);
        let marker = doc.create_node(ElementType::Marker);
        doc.append_child(clip, marker);

        let view = SpineView::from_node(&doc, spine).unwrap();
        assert_eq!(view.items(&doc), vec![clip, gap]);
    }

    #[test]
    fn enabled_setter_removes_the_default() {
        let (mut doc, spine) = timeline();
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);
        let view = AssetClipView::from_node(&doc, clip).unwrap();

        assert!(view.enabled(&doc));
        view.set_enabled(&mut doc, false);
        assert_eq!(doc.attribute(clip, attr::ENABLED), Some("0"));
        view.set_enabled(&mut doc, true);
        assert_eq!(doc.attribute(clip, attr::ENABLED), None);
    }

    #[test]
    fn metadata_entries_are_created_once_and_updated() {
        let (mut doc, spine) = timeline();
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(spine, clip);
        let view = AssetClipView::from_node(&doc, clip).unwrap();

        assert_eq!(view.metadata_value(&doc, "com.example.reel"), None);
        view.set_metadata_value(&mut doc, "com.example.reel", "A001");
        view.set_metadata_value(&mut doc, "com.example.reel", "A002");
        assert_eq!(view.metadata_value(&doc, "com.example.reel"), Some("A002"));

        let metadata = doc.first_child(clip, ElementType::Metadata).unwrap();
        assert_eq!(doc.children(metadata).len(), 1);
    }

    #[test]
    fn note_child_is_shared_plumbing() {
        let (mut doc, spine) = timeline();
        let gap = doc.create_node(ElementType::Gap);
        doc.append_child(spine, gap);
        let view = GapView::from_node(&doc, gap).unwrap();

        view.set_note(&mut doc, Some("placeholder until reshoot"));
        assert_eq!(view.note(&doc), Some("placeholder until reshoot"));
        view.set_note(&mut doc, None);
        assert_eq!(view.note(&doc), None);
    }
}
