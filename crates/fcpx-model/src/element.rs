//! Closed registry of FCPXML element types.
//!
//! Every tag name a document may legally contain is listed here; the tree
//! stores `ElementType` values directly, so an unknown tag cannot be
//! represented. Typed views declare which of these types they accept, and
//! the structural grammar is keyed by them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One legal FCPXML tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementType {
    // Document structure
    Fcpxml,
    ImportOptions,
    #[serde(rename = "option")]
    ImportOption,
    Resources,
    Library,
    Event,
    Project,

    // Resources and media descriptors
    Asset,
    Effect,
    Format,
    Media,
    Multicam,
    McAngle,
    MediaRep,
    Bookmark,

    // Story elements
    Sequence,
    Spine,
    Clip,
    AssetClip,
    McClip,
    RefClip,
    SyncClip,
    Gap,
    Audition,
    Transition,
    Title,
    Video,
    Audio,
    Caption,

    // Clip internals
    ConformRate,
    #[serde(rename = "timeMap")]
    TimeMap,
    #[serde(rename = "timept")]
    TimePoint,
    AudioChannelSource,
    AudioRoleSource,
    McSource,
    SyncSource,
    Param,
    FilterVideo,
    FilterAudio,
    FilterVideoMask,
    AdjustCrop,
    AdjustTransform,
    AdjustVolume,

    // Annotations
    Marker,
    ChapterMarker,
    HiddenClipMarker,
    AnalysisMarker,
    Keyword,
    Rating,
    Note,

    // Text and captions
    Text,
    TextStyle,
    TextStyleDef,

    // Metadata
    Metadata,
    #[serde(rename = "md")]
    MetadataEntry,

    // Collections
    KeywordCollection,
    SmartCollection,
    CollectionFolder,
    MatchClip,
    MatchTime,
    MatchText,
    MatchRatings,
    MatchKeywords,
}

impl ElementType {
    /// Every registered element type, in declaration order.
    pub const ALL: &'static [ElementType] = &[
        ElementType::Fcpxml,
        ElementType::ImportOptions,
        ElementType::ImportOption,
        ElementType::Resources,
        ElementType::Library,
        ElementType::Event,
        ElementType::Project,
        ElementType::Asset,
        ElementType::Effect,
        ElementType::Format,
        ElementType::Media,
        ElementType::Multicam,
        ElementType::McAngle,
        ElementType::MediaRep,
        ElementType::Bookmark,
        ElementType::Sequence,
        ElementType::Spine,
        ElementType::Clip,
        ElementType::AssetClip,
        ElementType::McClip,
        ElementType::RefClip,
        ElementType::SyncClip,
        ElementType::Gap,
        ElementType::Audition,
        ElementType::Transition,
        ElementType::Title,
        ElementType::Video,
        ElementType::Audio,
        ElementType::Caption,
        ElementType::ConformRate,
        ElementType::TimeMap,
        ElementType::TimePoint,
        ElementType::AudioChannelSource,
        ElementType::AudioRoleSource,
        ElementType::McSource,
        ElementType::SyncSource,
        ElementType::Param,
        ElementType::FilterVideo,
        ElementType::FilterAudio,
        ElementType::FilterVideoMask,
        ElementType::AdjustCrop,
        ElementType::AdjustTransform,
        ElementType::AdjustVolume,
        ElementType::Marker,
        ElementType::ChapterMarker,
        ElementType::HiddenClipMarker,
        ElementType::AnalysisMarker,
        ElementType::Keyword,
        ElementType::Rating,
        ElementType::Note,
        ElementType::Text,
        ElementType::TextStyle,
        ElementType::TextStyleDef,
        ElementType::Metadata,
        ElementType::MetadataEntry,
        ElementType::KeywordCollection,
        ElementType::SmartCollection,
        ElementType::CollectionFolder,
        ElementType::MatchClip,
        ElementType::MatchTime,
        ElementType::MatchText,
        ElementType::MatchRatings,
        ElementType::MatchKeywords,
    ];

    /// The tag name as it appears in a document.
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Fcpxml => "fcpxml",
            ElementType::ImportOptions => "import-options",
            ElementType::ImportOption => "option",
            ElementType::Resources => "resources",
            ElementType::Library => "library",
            ElementType::Event => "event",
            ElementType::Project => "project",
            ElementType::Asset => "asset",
            ElementType::Effect => "effect",
            ElementType::Format => "format",
            ElementType::Media => "media",
            ElementType::Multicam => "multicam",
            ElementType::McAngle => "mc-angle",
            ElementType::MediaRep => "media-rep",
            ElementType::Bookmark => "bookmark",
            ElementType::Sequence => "sequence",
            ElementType::Spine => "spine",
            ElementType::Clip => "clip",
            ElementType::AssetClip => "asset-clip",
            ElementType::McClip => "mc-clip",
            ElementType::RefClip => "ref-clip",
            ElementType::SyncClip => "sync-clip",
            ElementType::Gap => "gap",
            ElementType::Audition => "audition",
            ElementType::Transition => "transition",
            ElementType::Title => "title",
            ElementType::Video => "video",
            ElementType::Audio => "audio",
            ElementType::Caption => "caption",
            ElementType::ConformRate => "conform-rate",
            ElementType::TimeMap => "timeMap",
            ElementType::TimePoint => "timept",
            ElementType::AudioChannelSource => "audio-channel-source",
            ElementType::AudioRoleSource => "audio-role-source",
            ElementType::McSource => "mc-source",
            ElementType::SyncSource => "sync-source",
            ElementType::Param => "param",
            ElementType::FilterVideo => "filter-video",
            ElementType::FilterAudio => "filter-audio",
            ElementType::FilterVideoMask => "filter-video-mask",
            ElementType::AdjustCrop => "adjust-crop",
            ElementType::AdjustTransform => "adjust-transform",
            ElementType::AdjustVolume => "adjust-volume",
            ElementType::Marker => "marker",
            ElementType::ChapterMarker => "chapter-marker",
            ElementType::HiddenClipMarker => "hidden-clip-marker",
            ElementType::AnalysisMarker => "analysis-marker",
            ElementType::Keyword => "keyword",
            ElementType::Rating => "rating",
            ElementType::Note => "note",
            ElementType::Text => "text",
            ElementType::TextStyle => "text-style",
            ElementType::TextStyleDef => "text-style-def",
            ElementType::Metadata => "metadata",
            ElementType::MetadataEntry => "md",
            ElementType::KeywordCollection => "keyword-collection",
            ElementType::SmartCollection => "smart-collection",
            ElementType::CollectionFolder => "collection-folder",
            ElementType::MatchClip => "match-clip",
            ElementType::MatchTime => "match-time",
            ElementType::MatchText => "match-text",
            ElementType::MatchRatings => "match-ratings",
            ElementType::MatchKeywords => "match-keywords",
        }
    }

    /// Look up a tag name in the registry.
    pub fn from_name(name: &str) -> Option<ElementType> {
        let found = match name {
            "fcpxml" => ElementType::Fcpxml,
            "import-options" => ElementType::ImportOptions,
            "option" => ElementType::ImportOption,
            "resources" => ElementType::Resources,
            "library" => ElementType::Library,
            "event" => ElementType::Event,
            "project" => ElementType::Project,
            "asset" => ElementType::Asset,
            "effect" => ElementType::Effect,
            "format" => ElementType::Format,
            "media" => ElementType::Media,
            "multicam" => ElementType::Multicam,
            "mc-angle" => ElementType::McAngle,
            "media-rep" => ElementType::MediaRep,
            "bookmark" => ElementType::Bookmark,
            "sequence" => ElementType::Sequence,
            "spine" => ElementType::Spine,
            "clip" => ElementType::Clip,
            "asset-clip" => ElementType::AssetClip,
            "mc-clip" => ElementType::McClip,
            "ref-clip" => ElementType::RefClip,
            "sync-clip" => ElementType::SyncClip,
            "gap" => ElementType::Gap,
            "audition" => ElementType::Audition,
            "transition" => ElementType::Transition,
            "title" => ElementType::Title,
            "video" => ElementType::Video,
            "audio" => ElementType::Audio,
            "caption" => ElementType::Caption,
            "conform-rate" => ElementType::ConformRate,
            "timeMap" => ElementType::TimeMap,
            "timept" => ElementType::TimePoint,
            "audio-channel-source" => ElementType::AudioChannelSource,
            "audio-role-source" => ElementType::AudioRoleSource,
            "mc-source" => ElementType::McSource,
            "sync-source" => ElementType::SyncSource,
            "param" => ElementType::Param,
            "filter-video" => ElementType::FilterVideo,
            "filter-audio" => ElementType::FilterAudio,
            "filter-video-mask" => ElementType::FilterVideoMask,
            "adjust-crop" => ElementType::AdjustCrop,
            "adjust-transform" => ElementType::AdjustTransform,
            "adjust-volume" => ElementType::AdjustVolume,
            "marker" => ElementType::Marker,
            "chapter-marker" => ElementType::ChapterMarker,
            "hidden-clip-marker" => ElementType::HiddenClipMarker,
            "analysis-marker" => ElementType::AnalysisMarker,
            "keyword" => ElementType::Keyword,
            "rating" => ElementType::Rating,
            "note" => ElementType::Note,
            "text" => ElementType::Text,
            "text-style" => ElementType::TextStyle,
            "text-style-def" => ElementType::TextStyleDef,
            "metadata" => ElementType::Metadata,
            "md" => ElementType::MetadataEntry,
            "keyword-collection" => ElementType::KeywordCollection,
            "smart-collection" => ElementType::SmartCollection,
            "collection-folder" => ElementType::CollectionFolder,
            "match-clip" => ElementType::MatchClip,
            "match-time" => ElementType::MatchTime,
            "match-text" => ElementType::MatchText,
            "match-ratings" => ElementType::MatchRatings,
            "match-keywords" => ElementType::MatchKeywords,
            _ => return None,
        };
        Some(found)
    }

    /// True for the id-bearing resource definitions under `resources`.
    pub fn is_resource(&self) -> bool {
        matches!(
            self,
            ElementType::Asset | ElementType::Effect | ElementType::Format | ElementType::Media
        )
    }

    /// True for elements that may appear directly inside a spine.
    pub fn is_story_element(&self) -> bool {
        STORY_ELEMENTS.contains(self)
    }

    /// True for the marker/keyword/rating annotation family.
    pub fn is_annotation(&self) -> bool {
        self.is_marker() || matches!(self, ElementType::Keyword | ElementType::Rating)
    }

    /// True for the marker family (timed annotations with a start attribute).
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            ElementType::Marker
                | ElementType::ChapterMarker
                | ElementType::HiddenClipMarker
                | ElementType::AnalysisMarker
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Elements legal as direct children of a `spine` (and as anchored items).
pub const STORY_ELEMENTS: &[ElementType] = &[
    ElementType::Clip,
    ElementType::AssetClip,
    ElementType::McClip,
    ElementType::RefClip,
    ElementType::SyncClip,
    ElementType::Gap,
    ElementType::Audition,
    ElementType::Transition,
    ElementType::Title,
    ElementType::Video,
    ElementType::Audio,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_name() {
        for element in ElementType::ALL {
            assert_eq!(ElementType::from_name(element.name()), Some(*element));
        }
    }

    #[test]
    fn serialized_names_match_tag_names() {
        for element in ElementType::ALL {
            let json = serde_json::to_string(element).unwrap();
            assert_eq!(json, format!("\"{}\"", element.name()));
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert_eq!(ElementType::from_name("spline"), None);
        assert_eq!(ElementType::from_name(""), None);
        assert_eq!(ElementType::from_name("ASSET"), None);
    }

    #[test]
    fn category_predicates() {
        assert!(ElementType::Asset.is_resource());
        assert!(!ElementType::AssetClip.is_resource());
        assert!(ElementType::AssetClip.is_story_element());
        assert!(!ElementType::Marker.is_story_element());
        assert!(ElementType::HiddenClipMarker.is_marker());
        assert!(ElementType::Keyword.is_annotation());
        assert!(!ElementType::Keyword.is_marker());
    }
}
