//! Typed views over the FCPXML document tree.
//!
//! The tree itself is schema-agnostic; this crate layers element-specific
//! accessors on top of it. Views are cheap `Copy` handles constructed
//! fallibly with [`TypedView::from_node`], and the recurring attribute
//! patterns (timing, naming, references, payload children) live in the
//! capability traits under [`caps`].

pub mod annotations;
pub mod attr;
pub mod caps;
pub mod resources;
pub mod story;
pub mod structure;
pub mod view;

pub use annotations::{
    AnalysisMarkerView, ChapterMarkerView, HiddenClipMarkerView, KeywordView, MarkerView,
    RatingView,
};
pub use caps::{
    HasAnnotations, HasBookmark, HasDuration, HasEnabled, HasFormatRef, HasLane, HasMediaReps,
    HasMetadata, HasName, HasNote, HasOffset, HasRef, HasStart,
};
pub use resources::{
    AssetView, DEFAULT_MEDIA_REP_KIND, EffectView, FormatView, McAngleView, MediaRepView,
    MediaView, MulticamView,
};
pub use story::{
    AssetClipView, AudioView, AuditionView, CaptionView, ClipView, ConformRateView, GapView,
    McClipView, ParamView, RefClipView, SequenceView, SpineView, SyncClipView, TimeMapView,
    TimePointView, TitleView, TransitionView, VideoView,
};
pub use structure::{
    CollectionFolderView, EventView, FcpxmlView, KeywordCollectionView, LibraryView, ProjectView,
    ResourcesView, SmartCollectionView,
};
pub use view::{TypedView, first_typed_child, typed_children};
