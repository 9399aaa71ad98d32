//! Views over annotations that ride along inside clips: markers, keywords,
//! and ratings.

use fcpx_model::{Document, RationalTime};

use crate::attr;
use crate::caps::{HasDuration, HasName, HasStart};
use crate::view::{TypedView, bool_attr, set_bool_attr, typed_view};

typed_view! {
    /// A plain or to-do marker.
    MarkerView => Marker
}

impl HasStart for MarkerView {}
impl HasDuration for MarkerView {}

impl MarkerView {
    pub fn value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::VALUE)
    }

    pub fn set_value(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::VALUE, value);
    }

    /// `Some` only for to-do markers; plain markers carry no flag.
    pub fn completed(self, doc: &Document) -> Option<bool> {
        bool_attr(doc, self.0, attr::COMPLETED)
    }

    pub fn set_completed(self, doc: &mut Document, value: Option<bool>) {
        set_bool_attr(doc, self.0, attr::COMPLETED, value);
    }
}

typed_view! {
    /// A chapter marker with an optional poster frame.
    ChapterMarkerView => ChapterMarker
}

impl HasStart for ChapterMarkerView {}
impl HasDuration for ChapterMarkerView {}

impl ChapterMarkerView {
    pub fn value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::VALUE)
    }

    pub fn poster_offset(self, doc: &Document) -> Option<RationalTime> {
        doc.attribute(self.0, attr::POSTER_OFFSET)
            .and_then(RationalTime::parse)
    }
}

typed_view! {
    /// An application-internal marker hidden from the timeline ruler.
    HiddenClipMarkerView => HiddenClipMarker
}

impl HasStart for HiddenClipMarkerView {}
impl HasDuration for HiddenClipMarkerView {}

impl HiddenClipMarkerView {
    pub fn value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::VALUE)
    }
}

typed_view! {
    /// A marker produced by media analysis.
    AnalysisMarkerView => AnalysisMarker
}

impl HasStart for AnalysisMarkerView {}
impl HasDuration for AnalysisMarkerView {}

typed_view! {
    /// A keyword range applied to a clip.
    KeywordView => Keyword
}

impl HasStart for KeywordView {}
impl HasDuration for KeywordView {}

impl KeywordView {
    pub fn value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::VALUE)
    }

    pub fn set_value(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::VALUE, value);
    }
}

typed_view! {
    /// A favorite or reject range.
    RatingView => Rating
}

impl HasName for RatingView {}
impl HasStart for RatingView {}
impl HasDuration for RatingView {}

impl RatingView {
    /// `"favorite"` or `"reject"`.
    pub fn value(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::VALUE)
    }
}

#[cfg(test)]
mod tests {
    use fcpx_model::ElementType;

    use super::*;
    use crate::caps::HasAnnotations;
    use crate::story::AssetClipView;

    #[test]
    fn markers_surface_through_the_annotation_capability() {
        let mut doc = Document::new(ElementType::Fcpxml);
        let clip = doc.create_node(ElementType::AssetClip);
        doc.append_child(doc.root(), clip);
        let marker = doc.create_node(ElementType::Marker);
        doc.append_child(clip, marker);
        doc.set_attribute(marker, attr::START, Some("2s"));
        doc.set_attribute(marker, attr::VALUE, Some("fix color"));
        doc.set_attribute(marker, attr::COMPLETED, Some("0"));
        let keyword = doc.create_node(ElementType::Keyword);
        doc.append_child(clip, keyword);
        doc.set_attribute(keyword, attr::VALUE, Some("interview"));

        let clip_view = AssetClipView::from_node(&doc, clip).unwrap();
        let markers = clip_view.markers(&doc);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].value(&doc), Some("fix color"));
        assert_eq!(markers[0].completed(&doc), Some(false));
        assert_eq!(markers[0].start(&doc), RationalTime::from_seconds(2));

        let keywords = clip_view.keywords(&doc);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].value(&doc), Some("interview"));
    }

    #[test]
    fn completed_flag_is_tri_state() {
        let mut doc = Document::new(ElementType::Fcpxml);
        let marker = doc.create_node(ElementType::Marker);
        doc.append_child(doc.root(), marker);
        let view = MarkerView::from_node(&doc, marker).unwrap();

        assert_eq!(view.completed(&doc), None);
        view.set_completed(&mut doc, Some(true));
        assert_eq!(doc.attribute(marker, attr::COMPLETED), Some("1"));
        view.set_completed(&mut doc, None);
        assert_eq!(view.completed(&doc), None);
    }
}
