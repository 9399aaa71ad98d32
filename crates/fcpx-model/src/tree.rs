//! The generic document tree.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by stable
//! [`NodeId`] handles; children are ordered handle lists and every non-root
//! node records its parent handle. That layout keeps the tree acyclic with
//! single ownership and no dangling parents, and it makes subtree moves a
//! matter of handle bookkeeping.
//!
//! No validation happens at this layer. Attribute values are plain strings;
//! the typed view layer parses them and treats malformed values as absent,
//! and conformance checking is an explicit separate pass.

use crate::element::ElementType;
use crate::version::Version;

/// Name of the schema-version attribute on the document root.
pub const VERSION_ATTR: &str = "version";

/// Stable handle to a node within one [`Document`].
///
/// Handles are only meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Clone)]
struct NodeData {
    tag: ElementType,
    attributes: Vec<(String, String)>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    text: Option<String>,
}

impl NodeData {
    fn new(tag: ElementType) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
            text: None,
        }
    }
}

/// One parsed document: an ordered, attributed tree of registered elements.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl Document {
    /// Create a document holding only a root node of the given type.
    pub fn new(root_tag: ElementType) -> Self {
        Self {
            nodes: vec![NodeData::new(root_tag)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a detached node; attach it with [`Document::append_child`].
    pub fn create_node(&mut self, tag: ElementType) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(tag));
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// A node that already has a parent is moved, not duplicated. Attempts
    /// to attach the root or to attach a node beneath its own descendant are
    /// ignored (they would break the tree invariants).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == self.root || child == parent {
            debug_assert!(false, "refusing append of {child:?} under {parent:?}");
            return;
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                debug_assert!(false, "refusing cycle: {child:?} is an ancestor of {parent:?}");
                return;
            }
            cursor = self.node(ancestor).parent;
        }
        if let Some(old_parent) = self.node(child).parent {
            self.node_mut(old_parent).children.retain(|c| *c != child);
        }
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    pub fn tag(&self, id: NodeId) -> ElementType {
        self.node(id).tag
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// First child with the given tag, if any.
    pub fn first_child(&self, id: NodeId, tag: ElementType) -> Option<NodeId> {
        self.node(id)
            .children
            .iter()
            .copied()
            .find(|child| self.tag(*child) == tag)
    }

    /// Detach every direct child for which the predicate holds.
    ///
    /// Detached subtrees stay allocated in the arena but are no longer
    /// reachable from the root.
    pub fn remove_children<F>(&mut self, id: NodeId, mut predicate: F)
    where
        F: FnMut(&Document, NodeId) -> bool,
    {
        let candidates = self.node(id).children.clone();
        let mut kept = Vec::with_capacity(candidates.len());
        for child in candidates {
            if predicate(self, child) {
                self.node_mut(child).parent = None;
            } else {
                kept.push(child);
            }
        }
        self.node_mut(id).children = kept;
    }

    /// Deep-copy `node` and everything below it from `source` into this
    /// document. The copy comes back detached; append it where it belongs.
    pub fn clone_subtree(&mut self, source: &Document, node: NodeId) -> NodeId {
        let copy = self.create_node(source.tag(node));
        for (name, value) in source.attributes(node) {
            self.set_attribute(copy, name, Some(value));
        }
        if let Some(text) = source.text(node) {
            self.set_text(copy, Some(text.to_string()));
        }
        for &child in source.children(node) {
            let child_copy = self.clone_subtree(source, child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Set (`Some`) or remove (`None`) an attribute, preserving the position
    /// of an existing key.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: Option<&str>) {
        let attributes = &mut self.node_mut(id).attributes;
        match value {
            Some(value) => match attributes.iter_mut().find(|(key, _)| key == name) {
                Some(entry) => entry.1 = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            },
            None => attributes.retain(|(key, _)| key != name),
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.node(id)
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: Option<String>) {
        self.node_mut(id).text = text;
    }

    /// Number of nodes ever allocated, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Preorder traversal of the subtree rooted at `id`, `id` first.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: vec![id],
        }
    }

    /// Element path from the root, e.g.
    /// `fcpxml/library/event[0]/project/sequence/spine/asset-clip[2]`.
    ///
    /// The `[i]` index is emitted only when the node has same-tag siblings.
    pub fn path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            segments.push(self.path_segment(node));
            cursor = self.node(node).parent;
        }
        segments.reverse();
        segments.join("/")
    }

    fn path_segment(&self, id: NodeId) -> String {
        let tag = self.tag(id);
        let Some(parent) = self.node(id).parent else {
            return tag.name().to_string();
        };
        let mut index = 0;
        let mut same_tag = 0;
        for sibling in &self.node(parent).children {
            if self.tag(*sibling) == tag {
                if *sibling == id {
                    index = same_tag;
                }
                same_tag += 1;
            }
        }
        if same_tag > 1 {
            format!("{}[{index}]", tag.name())
        } else {
            tag.name().to_string()
        }
    }

    /// The root `version` attribute, when present and parseable.
    pub fn declared_version(&self) -> Option<Version> {
        self.attribute(self.root, VERSION_ATTR)?.parse().ok()
    }

    pub fn set_declared_version(&mut self, version: Version) {
        let value = version.to_string();
        self.set_attribute(self.root, VERSION_ATTR, Some(&value));
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0 as usize]
    }
}

/// Iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        let children = self.document.children(next);
        self.stack.extend(children.iter().rev().copied());
        Some(next)
    }
}
