//! The element grammar: which attributes and children each element admits.
//!
//! One [`ElementGrammar`] row exists for every registered element, in
//! registry declaration order, so lookups are a plain index. The grammar is
//! version-blind; the feature table says when a listed construct exists, and
//! the structural validator combines the two. Child order is not checked,
//! only membership and cardinality.

use fcpx_model::{ElementType, RationalTime, STORY_ELEMENTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Implied,
}

/// Lexical shape an attribute value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Any,
    RationalTime,
    Bool,
    Integer,
    /// Must name a resource; whether it resolves is a semantic question.
    ResourceRef,
    Enumerated(&'static [&'static str]),
}

impl ValueKind {
    pub fn matches(self, raw: &str) -> bool {
        match self {
            Self::Any => true,
            Self::RationalTime => RationalTime::parse(raw).is_some(),
            Self::Bool => matches!(raw, "0" | "1"),
            Self::Integer => raw.parse::<i64>().is_ok(),
            Self::ResourceRef => !raw.is_empty(),
            Self::Enumerated(options) => options.contains(&raw),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttributeRule {
    pub name: &'static str,
    pub presence: Presence,
    pub value: ValueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Once,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

/// One group of admissible children with a shared cardinality.
#[derive(Debug, Clone, Copy)]
pub struct ChildRule {
    pub elements: &'static [ElementType],
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone, Copy)]
pub struct ElementGrammar {
    pub element: ElementType,
    pub attributes: &'static [AttributeRule],
    pub children: &'static [ChildRule],
    /// Whether the element carries character data.
    pub allows_text: bool,
}

impl ElementGrammar {
    pub fn attribute(&self, name: &str) -> Option<&AttributeRule> {
        self.attributes.iter().find(|rule| rule.name == name)
    }

    /// The child rule admitting `element`, if any.
    pub fn child_rule(&self, element: ElementType) -> Option<&ChildRule> {
        self.children
            .iter()
            .find(|rule| rule.elements.contains(&element))
    }
}

/// Grammar row for `element`.
pub fn grammar(element: ElementType) -> &'static ElementGrammar {
    // GRAMMARS mirrors the registry declaration order; a test pins this.
    &GRAMMARS[element as usize]
}

const fn required(name: &'static str, value: ValueKind) -> AttributeRule {
    AttributeRule {
        name,
        presence: Presence::Required,
        value,
    }
}

const fn implied(name: &'static str, value: ValueKind) -> AttributeRule {
    AttributeRule {
        name,
        presence: Presence::Implied,
        value,
    }
}

const fn child(elements: &'static [ElementType], cardinality: Cardinality) -> ChildRule {
    ChildRule {
        elements,
        cardinality,
    }
}

const fn leaf(element: ElementType, attributes: &'static [AttributeRule]) -> ElementGrammar {
    ElementGrammar {
        element,
        attributes,
        children: &[],
        allows_text: false,
    }
}

const fn text_leaf(element: ElementType, attributes: &'static [AttributeRule]) -> ElementGrammar {
    ElementGrammar {
        element,
        attributes,
        children: &[],
        allows_text: true,
    }
}

const TC_FORMATS: &[&str] = &["DF", "NDF"];
const BOOL: ValueKind = ValueKind::Bool;
const TIME: ValueKind = ValueKind::RationalTime;
const REF: ValueKind = ValueKind::ResourceRef;
const ANY: ValueKind = ValueKind::Any;
const INT: ValueKind = ValueKind::Integer;

const ANNOTATIONS: &[ElementType] = &[
    ElementType::Marker,
    ElementType::ChapterMarker,
    ElementType::HiddenClipMarker,
    ElementType::AnalysisMarker,
    ElementType::Keyword,
    ElementType::Rating,
];

/// Items a clip may anchor: story elements plus captions.
const ANCHORED_ITEMS: &[ElementType] = &[
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
];

const CLIP_EFFECTS: &[ElementType] = &[
    ElementType::FilterVideo,
    ElementType::FilterAudio,
    ElementType::FilterVideoMask,
    ElementType::AdjustCrop,
    ElementType::AdjustTransform,
    ElementType::AdjustVolume,
];

const AUDIO_SOURCES: &[ElementType] = &[
    ElementType::AudioChannelSource,
    ElementType::AudioRoleSource,
];

const AUDIO_EFFECTS: &[ElementType] = &[ElementType::FilterAudio, ElementType::AdjustVolume];

const COLLECTION_KINDS: &[ElementType] = &[
    ElementType::KeywordCollection,
    ElementType::SmartCollection,
    ElementType::CollectionFolder,
];

const MATCH_RULES: &[ElementType] = &[
    ElementType::MatchClip,
    ElementType::MatchTime,
    ElementType::MatchText,
    ElementType::MatchRatings,
    ElementType::MatchKeywords,
];

static GRAMMARS: [ElementGrammar; 63] = [
    ElementGrammar {
        element: ElementType::Fcpxml,
        attributes: &[required("version", ANY)],
        children: &[
            child(&[ElementType::ImportOptions], Cardinality::Optional),
            child(&[ElementType::Resources], Cardinality::Optional),
            child(&[ElementType::Library], Cardinality::Optional),
            child(&[ElementType::Event], Cardinality::ZeroOrMore),
            child(&[ElementType::Project], Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::ImportOptions,
        attributes: &[],
        children: &[child(&[ElementType::ImportOption], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    leaf(
        ElementType::ImportOption,
        &[required("key", ANY), required("value", ANY)],
    ),
    ElementGrammar {
        element: ElementType::Resources,
        attributes: &[],
        children: &[child(
            &[
                ElementType::Asset,
                ElementType::Effect,
                ElementType::Format,
                ElementType::Media,
            ],
            Cardinality::ZeroOrMore,
        )],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Library,
        attributes: &[
            implied("location", ANY),
            implied(
                "colorProcessing",
                ValueKind::Enumerated(&["standard", "wide", "wide-hdr"]),
            ),
        ],
        children: &[
            child(&[ElementType::Event], Cardinality::ZeroOrMore),
            child(COLLECTION_KINDS, Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Event,
        attributes: &[implied("name", ANY), implied("uid", ANY)],
        children: &[
            child(&[ElementType::Project], Cardinality::ZeroOrMore),
            child(STORY_ELEMENTS, Cardinality::ZeroOrMore),
            child(COLLECTION_KINDS, Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Project,
        attributes: &[
            implied("name", ANY),
            implied("uid", ANY),
            implied("id", ANY),
            implied("modDate", ANY),
        ],
        children: &[child(&[ElementType::Sequence], Cardinality::Once)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Asset,
        attributes: &[
            required("id", ANY),
            implied("name", ANY),
            implied("uid", ANY),
            implied("start", TIME),
            implied("duration", TIME),
            implied("format", REF),
            implied("hasVideo", BOOL),
            implied("hasAudio", BOOL),
            implied("audioSources", INT),
            implied("audioChannels", INT),
            implied("audioRate", INT),
            implied("heroEyeOverride", ValueKind::Enumerated(&["left", "right"])),
        ],
        children: &[
            child(&[ElementType::MediaRep], Cardinality::ZeroOrMore),
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    leaf(
        ElementType::Effect,
        &[
            required("id", ANY),
            implied("name", ANY),
            required("uid", ANY),
            implied("src", ANY),
        ],
    ),
    leaf(
        ElementType::Format,
        &[
            required("id", ANY),
            implied("name", ANY),
            implied("frameDuration", TIME),
            implied("width", INT),
            implied("height", INT),
            implied("colorSpace", ANY),
            implied("heroEye", ValueKind::Enumerated(&["left", "right"])),
        ],
    ),
    ElementGrammar {
        element: ElementType::Media,
        attributes: &[
            required("id", ANY),
            implied("name", ANY),
            implied("uid", ANY),
            implied("modDate", ANY),
        ],
        children: &[child(
            &[ElementType::Multicam, ElementType::Sequence],
            Cardinality::Once,
        )],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Multicam,
        attributes: &[
            required("format", REF),
            implied("tcStart", TIME),
            implied("tcFormat", ValueKind::Enumerated(TC_FORMATS)),
        ],
        children: &[
            child(&[ElementType::McAngle], Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::McAngle,
        attributes: &[implied("name", ANY), required("angleID", ANY)],
        children: &[child(STORY_ELEMENTS, Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::MediaRep,
        attributes: &[
            implied(
                "kind",
                ValueKind::Enumerated(&["original-media", "proxy-media"]),
            ),
            implied("sig", ANY),
            required("src", ANY),
        ],
        children: &[child(&[ElementType::Bookmark], Cardinality::Optional)],
        allows_text: false,
    },
    text_leaf(ElementType::Bookmark, &[]),
    ElementGrammar {
        element: ElementType::Sequence,
        attributes: &[
            required("format", REF),
            implied("duration", TIME),
            implied("tcStart", TIME),
            implied("tcFormat", ValueKind::Enumerated(TC_FORMATS)),
            implied(
                "audioLayout",
                ValueKind::Enumerated(&["mono", "stereo", "surround"]),
            ),
            implied("audioRate", ANY),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::Spine], Cardinality::Once),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Spine,
        attributes: &[
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("format", REF),
        ],
        children: &[child(STORY_ELEMENTS, Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Clip,
        attributes: &[
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("format", REF),
            implied("heroEyeOverride", ValueKind::Enumerated(&["left", "right"])),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::ConformRate], Cardinality::Optional),
            child(&[ElementType::TimeMap], Cardinality::Optional),
            child(&[ElementType::Spine], Cardinality::ZeroOrMore),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(AUDIO_SOURCES, Cardinality::ZeroOrMore),
            child(CLIP_EFFECTS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::AssetClip,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("format", REF),
            implied("audioRole", ANY),
            implied("videoRole", ANY),
            implied("heroEyeOverride", ValueKind::Enumerated(&["left", "right"])),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::ConformRate], Cardinality::Optional),
            child(&[ElementType::TimeMap], Cardinality::Optional),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(AUDIO_SOURCES, Cardinality::ZeroOrMore),
            child(CLIP_EFFECTS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::McClip,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("heroEyeOverride", ValueKind::Enumerated(&["left", "right"])),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::ConformRate], Cardinality::Optional),
            child(&[ElementType::TimeMap], Cardinality::Optional),
            child(&[ElementType::McSource], Cardinality::ZeroOrMore),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::RefClip,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("useAudioSubroles", BOOL),
            implied("heroEyeOverride", ValueKind::Enumerated(&["left", "right"])),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::ConformRate], Cardinality::Optional),
            child(&[ElementType::TimeMap], Cardinality::Optional),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(&[ElementType::AudioRoleSource], Cardinality::ZeroOrMore),
            child(CLIP_EFFECTS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::SyncClip,
        attributes: &[
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("format", REF),
            implied("syncOffset", TIME),
            implied("contentSyncOffset", TIME),
            implied("heroEyeOverride", ValueKind::Enumerated(&["left", "right"])),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::ConformRate], Cardinality::Optional),
            child(&[ElementType::TimeMap], Cardinality::Optional),
            child(&[ElementType::Spine], Cardinality::ZeroOrMore),
            child(&[ElementType::SyncSource], Cardinality::ZeroOrMore),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(CLIP_EFFECTS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Gap,
        attributes: &[
            implied("name", ANY),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Audition,
        attributes: &[implied("lane", INT), implied("offset", TIME)],
        children: &[child(STORY_ELEMENTS, Cardinality::OneOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Transition,
        attributes: &[
            implied("name", ANY),
            implied("offset", TIME),
            required("duration", TIME),
        ],
        children: &[
            child(
                &[ElementType::FilterVideo, ElementType::FilterAudio],
                Cardinality::ZeroOrMore,
            ),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Title,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("role", ANY),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::Param], Cardinality::ZeroOrMore),
            child(&[ElementType::Text], Cardinality::ZeroOrMore),
            child(&[ElementType::TextStyleDef], Cardinality::ZeroOrMore),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
            child(&[ElementType::Metadata], Cardinality::Optional),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Video,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("role", ANY),
        ],
        children: &[
            child(&[ElementType::Param], Cardinality::ZeroOrMore),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(CLIP_EFFECTS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Audio,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("role", ANY),
            implied("srcCh", ANY),
        ],
        children: &[
            child(&[ElementType::Param], Cardinality::ZeroOrMore),
            child(ANCHORED_ITEMS, Cardinality::ZeroOrMore),
            child(AUDIO_EFFECTS, Cardinality::ZeroOrMore),
            child(ANNOTATIONS, Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Caption,
        attributes: &[
            implied("name", ANY),
            implied("lane", INT),
            implied("offset", TIME),
            implied("start", TIME),
            implied("duration", TIME),
            implied("enabled", BOOL),
            implied("role", ANY),
        ],
        children: &[
            child(&[ElementType::Note], Cardinality::Optional),
            child(&[ElementType::Text], Cardinality::ZeroOrMore),
            child(&[ElementType::TextStyleDef], Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    leaf(
        ElementType::ConformRate,
        &[
            implied("scaleEnabled", BOOL),
            implied("srcFrameRate", ANY),
            implied("frameRate", ANY),
        ],
    ),
    ElementGrammar {
        element: ElementType::TimeMap,
        attributes: &[],
        children: &[child(&[ElementType::TimePoint], Cardinality::OneOrMore)],
        allows_text: false,
    },
    leaf(
        ElementType::TimePoint,
        &[
            required("time", TIME),
            required("value", TIME),
            implied(
                "interp",
                ValueKind::Enumerated(&["linear", "smooth", "smooth2"]),
            ),
        ],
    ),
    ElementGrammar {
        element: ElementType::AudioChannelSource,
        attributes: &[
            required("srcCh", ANY),
            implied("role", ANY),
            implied("active", BOOL),
        ],
        children: &[child(AUDIO_EFFECTS, Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::AudioRoleSource,
        attributes: &[required("role", ANY), implied("active", BOOL)],
        children: &[child(AUDIO_EFFECTS, Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::McSource,
        attributes: &[
            required("angleID", ANY),
            implied(
                "srcEnable",
                ValueKind::Enumerated(&["audio", "video", "all", "none"]),
            ),
        ],
        children: &[
            child(&[ElementType::AudioRoleSource], Cardinality::ZeroOrMore),
            child(CLIP_EFFECTS, Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::SyncSource,
        attributes: &[required(
            "sourceID",
            ValueKind::Enumerated(&["storyline", "connected"]),
        )],
        children: &[child(&[ElementType::AudioRoleSource], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Param,
        attributes: &[
            required("name", ANY),
            implied("key", ANY),
            implied("value", ANY),
            implied("auxValue", ANY),
            implied("enabled", BOOL),
        ],
        children: &[child(&[ElementType::Param], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::FilterVideo,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("enabled", BOOL),
        ],
        children: &[child(&[ElementType::Param], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::FilterAudio,
        attributes: &[
            required("ref", REF),
            implied("name", ANY),
            implied("enabled", BOOL),
        ],
        children: &[child(&[ElementType::Param], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::FilterVideoMask,
        attributes: &[implied("enabled", BOOL), implied("inverted", BOOL)],
        children: &[
            child(&[ElementType::FilterVideo], Cardinality::OneOrMore),
            child(&[ElementType::Param], Cardinality::ZeroOrMore),
        ],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::AdjustCrop,
        attributes: &[
            required("mode", ValueKind::Enumerated(&["trim", "crop", "pan"])),
            implied("enabled", BOOL),
        ],
        children: &[child(&[ElementType::Param], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::AdjustTransform,
        attributes: &[
            implied("position", ANY),
            implied("scale", ANY),
            implied("rotation", ANY),
            implied("anchor", ANY),
            implied("enabled", BOOL),
        ],
        children: &[child(&[ElementType::Param], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::AdjustVolume,
        attributes: &[implied("amount", ANY)],
        children: &[child(&[ElementType::Param], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    leaf(
        ElementType::Marker,
        &[
            required("start", TIME),
            implied("duration", TIME),
            required("value", ANY),
            implied("completed", BOOL),
        ],
    ),
    leaf(
        ElementType::ChapterMarker,
        &[
            required("start", TIME),
            implied("duration", TIME),
            required("value", ANY),
            implied("posterOffset", TIME),
        ],
    ),
    leaf(
        ElementType::HiddenClipMarker,
        &[
            required("start", TIME),
            implied("duration", TIME),
            implied("value", ANY),
        ],
    ),
    leaf(
        ElementType::AnalysisMarker,
        &[required("start", TIME), implied("duration", TIME)],
    ),
    leaf(
        ElementType::Keyword,
        &[
            implied("start", TIME),
            implied("duration", TIME),
            required("value", ANY),
        ],
    ),
    leaf(
        ElementType::Rating,
        &[
            implied("name", ANY),
            implied("start", TIME),
            implied("duration", TIME),
            required("value", ValueKind::Enumerated(&["favorite", "reject"])),
        ],
    ),
    text_leaf(ElementType::Note, &[]),
    ElementGrammar {
        element: ElementType::Text,
        attributes: &[],
        children: &[child(&[ElementType::TextStyle], Cardinality::ZeroOrMore)],
        allows_text: true,
    },
    text_leaf(
        ElementType::TextStyle,
        &[
            // Points at a sibling text-style-def id, not at a resource.
            implied("ref", ANY),
            implied("font", ANY),
            implied("fontSize", ANY),
            implied("fontColor", ANY),
            implied("bold", BOOL),
            implied("italic", BOOL),
        ],
    ),
    ElementGrammar {
        element: ElementType::TextStyleDef,
        attributes: &[required("id", ANY), implied("name", ANY)],
        children: &[child(&[ElementType::TextStyle], Cardinality::OneOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::Metadata,
        attributes: &[],
        children: &[child(&[ElementType::MetadataEntry], Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    leaf(
        ElementType::MetadataEntry,
        &[
            required("key", ANY),
            implied("value", ANY),
            implied("editable", BOOL),
        ],
    ),
    leaf(ElementType::KeywordCollection, &[required("name", ANY)]),
    ElementGrammar {
        element: ElementType::SmartCollection,
        attributes: &[
            required("name", ANY),
            required("match", ValueKind::Enumerated(&["any", "all"])),
        ],
        children: &[child(MATCH_RULES, Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    ElementGrammar {
        element: ElementType::CollectionFolder,
        attributes: &[required("name", ANY)],
        children: &[child(COLLECTION_KINDS, Cardinality::ZeroOrMore)],
        allows_text: false,
    },
    leaf(
        ElementType::MatchClip,
        &[
            required("rule", ANY),
            implied("type", ANY),
            implied("enabled", BOOL),
        ],
    ),
    leaf(
        ElementType::MatchTime,
        &[
            required("rule", ANY),
            required("type", ANY),
            required("value", ANY),
            implied("enabled", BOOL),
        ],
    ),
    leaf(
        ElementType::MatchText,
        &[
            required("rule", ANY),
            implied("value", ANY),
            implied("enabled", BOOL),
        ],
    ),
    leaf(
        ElementType::MatchRatings,
        &[
            required("value", ValueKind::Enumerated(&["favorites", "rejected"])),
            implied("enabled", BOOL),
        ],
    ),
    leaf(
        ElementType::MatchKeywords,
        &[required("rule", ANY), implied("enabled", BOOL)],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_the_registry_in_declaration_order() {
        assert_eq!(GRAMMARS.len(), ElementType::ALL.len());
        for (row, element) in GRAMMARS.iter().zip(ElementType::ALL) {
            assert_eq!(row.element, *element, "row out of order for {element}");
        }
    }

    #[test]
    fn lookup_is_keyed_by_element() {
        assert_eq!(grammar(ElementType::Marker).element, ElementType::Marker);
        assert_eq!(
            grammar(ElementType::MatchKeywords).element,
            ElementType::MatchKeywords
        );
    }

    #[test]
    fn sequences_require_a_format_and_one_spine() {
        let sequence = grammar(ElementType::Sequence);
        let format = sequence.attribute("format").unwrap();
        assert_eq!(format.presence, Presence::Required);
        let spine = sequence.child_rule(ElementType::Spine).unwrap();
        assert_eq!(spine.cardinality, Cardinality::Once);
    }

    #[test]
    fn both_sync_offset_spellings_stay_lexically_legal() {
        // Version gating is the feature table's job, not the grammar's.
        let sync_clip = grammar(ElementType::SyncClip);
        assert!(sync_clip.attribute("syncOffset").is_some());
        assert!(sync_clip.attribute("contentSyncOffset").is_some());
    }

    #[test]
    fn value_kinds_check_lexical_shape() {
        assert!(ValueKind::RationalTime.matches("1001/30000s"));
        assert!(!ValueKind::RationalTime.matches("fast"));
        assert!(ValueKind::Bool.matches("0"));
        assert!(!ValueKind::Bool.matches("true"));
        assert!(ValueKind::Integer.matches("-3"));
        assert!(!ValueKind::Integer.matches("3.5"));
        assert!(ValueKind::Enumerated(&["DF", "NDF"]).matches("DF"));
        assert!(!ValueKind::Enumerated(&["DF", "NDF"]).matches("df"));
        assert!(!ValueKind::ResourceRef.matches(""));
    }

    #[test]
    fn annotation_groups_admit_the_whole_marker_family() {
        let clip = grammar(ElementType::AssetClip);
        for marker in [
            ElementType::Marker,
            ElementType::ChapterMarker,
            ElementType::HiddenClipMarker,
            ElementType::AnalysisMarker,
        ] {
            assert!(clip.child_rule(marker).is_some(), "missing rule for {marker}");
        }
    }
}
