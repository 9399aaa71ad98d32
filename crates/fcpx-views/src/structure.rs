//! Views over the document skeleton: the root element, the resource table,
//! and the library / event / project hierarchy.

use fcpx_model::{Document, ElementType, NodeId, Version};

use crate::attr;
use crate::caps::{HasName, HasNote};
use crate::story::SequenceView;
use crate::view::{TypedView, first_typed_child, typed_children, typed_view};

typed_view! {
    /// The document root.
    FcpxmlView => Fcpxml
}

impl FcpxmlView {
    /// View over the root of `doc`; `None` when the root is not `fcpxml`.
    pub fn of(doc: &Document) -> Option<Self> {
        Self::from_node(doc, doc.root())
    }

    pub fn version(self, doc: &Document) -> Option<Version> {
        doc.declared_version()
    }

    pub fn set_version(self, doc: &mut Document, version: Version) {
        doc.set_declared_version(version);
    }

    pub fn resources(self, doc: &Document) -> Option<ResourcesView> {
        first_typed_child(doc, self.0)
    }

    pub fn library(self, doc: &Document) -> Option<LibraryView> {
        first_typed_child(doc, self.0)
    }

    /// Events placed directly under the root, outside any library.
    pub fn events(self, doc: &Document) -> Vec<EventView> {
        typed_children(doc, self.0)
    }

    /// Projects placed directly under the root, outside any library.
    pub fn projects(self, doc: &Document) -> Vec<ProjectView> {
        typed_children(doc, self.0)
    }
}

typed_view! {
    /// The shared resource table.
    ResourcesView => Resources
}

impl ResourcesView {
    pub fn assets(self, doc: &Document) -> Vec<crate::resources::AssetView> {
        typed_children(doc, self.0)
    }

    pub fn effects(self, doc: &Document) -> Vec<crate::resources::EffectView> {
        typed_children(doc, self.0)
    }

    pub fn formats(self, doc: &Document) -> Vec<crate::resources::FormatView> {
        typed_children(doc, self.0)
    }

    pub fn media(self, doc: &Document) -> Vec<crate::resources::MediaView> {
        typed_children(doc, self.0)
    }

    /// The resource child carrying the given `id` attribute, if any.
    pub fn resource_with_id(self, doc: &Document, id: &str) -> Option<NodeId> {
        doc.children(self.0)
            .iter()
            .copied()
            .filter(|child| doc.tag(*child).is_resource())
            .find(|child| doc.attribute(*child, attr::ID) == Some(id))
    }
}

typed_view! {
    /// An event library.
    LibraryView => Library
}

impl LibraryView {
    pub fn location(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::LOCATION)
    }

    /// Wide-gamut switch, carried since libraries learned color management.
    pub fn color_processing(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::COLOR_PROCESSING)
    }

    pub fn set_color_processing(self, doc: &mut Document, value: Option<&str>) {
        doc.set_attribute(self.0, attr::COLOR_PROCESSING, value);
    }

    pub fn events(self, doc: &Document) -> Vec<EventView> {
        typed_children(doc, self.0)
    }

    pub fn smart_collections(self, doc: &Document) -> Vec<SmartCollectionView> {
        typed_children(doc, self.0)
    }
}

typed_view! {
    /// One event inside a library.
    EventView => Event
}

impl HasName for EventView {}

impl EventView {
    pub fn uid(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::UID)
    }

    pub fn projects(self, doc: &Document) -> Vec<ProjectView> {
        typed_children(doc, self.0)
    }

    pub fn keyword_collections(self, doc: &Document) -> Vec<KeywordCollectionView> {
        typed_children(doc, self.0)
    }

    /// Loose clips stored in the event alongside projects.
    pub fn clips(self, doc: &Document) -> Vec<NodeId> {
        doc.children(self.0)
            .iter()
            .copied()
            .filter(|child| doc.tag(*child).is_story_element())
            .collect()
    }
}

typed_view! {
    /// A project wrapping one timeline sequence.
    ProjectView => Project
}

impl HasName for ProjectView {}
impl HasNote for ProjectView {}

impl ProjectView {
    pub fn uid(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::UID)
    }

    pub fn mod_date(self, doc: &Document) -> Option<&str> {
        doc.attribute(self.0, attr::MOD_DATE)
    }

    pub fn sequence(self, doc: &Document) -> Option<SequenceView> {
        first_typed_child(doc, self.0)
    }
}

typed_view! {
    /// A keyword collection inside an event.
    KeywordCollectionView => KeywordCollection
}

impl HasName for KeywordCollectionView {}

typed_view! {
    /// A smart collection with match rules.
    SmartCollectionView => SmartCollection
}

impl HasName for SmartCollectionView {}

impl SmartCollectionView {
    pub fn match_rules(self, doc: &Document) -> Vec<NodeId> {
        doc.children(self.0).to_vec()
    }
}

typed_view! {
    /// A folder grouping collections.
    CollectionFolderView => CollectionFolder
}

impl HasName for CollectionFolderView {}
