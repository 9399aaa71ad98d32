//! The fallible typed-view construction protocol.
//!
//! A view is a `Copy` handle wrapper; all data access goes back through the
//! [`Document`]. Construction checks the node's element type, so holding a
//! view proves the tag but nothing more. Attribute values are re-read on
//! every call and malformed values read as absent.

use fcpx_model::{Document, ElementType, NodeId};

/// A typed wrapper over a node of one (or a few closely related) element
/// types.
pub trait TypedView: Copy {
    /// Element types this view accepts.
    const SUPPORTED: &'static [ElementType];

    /// Wrap `id`, or `None` when the node's tag is not in [`Self::SUPPORTED`].
    fn from_node(doc: &Document, id: NodeId) -> Option<Self>;

    /// The wrapped node.
    fn id(self) -> NodeId;
}

macro_rules! typed_view {
    ($(#[$meta:meta])* $name:ident => $($tag:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub(crate) fcpx_model::NodeId);

        impl $crate::view::TypedView for $name {
            const SUPPORTED: &'static [fcpx_model::ElementType] =
                &[$(fcpx_model::ElementType::$tag),+];

            fn from_node(doc: &fcpx_model::Document, id: fcpx_model::NodeId) -> Option<Self> {
                Self::SUPPORTED.contains(&doc.tag(id)).then_some(Self(id))
            }

            fn id(self) -> fcpx_model::NodeId {
                self.0
            }
        }
    };
}
pub(crate) use typed_view;

/// All direct children of `id` that construct as `V`, in document order.
pub fn typed_children<V: TypedView>(doc: &Document, id: NodeId) -> Vec<V> {
    doc.children(id)
        .iter()
        .filter_map(|child| V::from_node(doc, *child))
        .collect()
}

/// First direct child of `id` that constructs as `V`.
pub fn first_typed_child<V: TypedView>(doc: &Document, id: NodeId) -> Option<V> {
    doc.children(id)
        .iter()
        .find_map(|child| V::from_node(doc, *child))
}

/// `"1"`/`"0"` attribute as a bool; anything else reads as absent.
pub(crate) fn bool_attr(doc: &Document, id: NodeId, name: &str) -> Option<bool> {
    match doc.attribute(id, name)? {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn set_bool_attr(doc: &mut Document, id: NodeId, name: &str, value: Option<bool>) {
    let rendered = value.map(|flag| if flag { "1" } else { "0" });
    doc.set_attribute(id, name, rendered);
}

pub(crate) fn int_attr(doc: &Document, id: NodeId, name: &str) -> Option<i64> {
    doc.attribute(id, name)?.parse().ok()
}
