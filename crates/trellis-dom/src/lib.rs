//! Element tree for the Trellis document builder.
//!
//! This crate provides an arena-based tree of elements and text, together
//! with the tag catalog, the attribute normalizer and the markup renderer.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! A parent owns its children through the ordered `children` list; the
//! `parent` link is a plain index, so there are no ownership cycles.

#[macro_use]
pub mod attributes;
pub mod error;
pub mod render;
pub mod tags;

pub use attributes::{AttrValue, AttributesMap, normalize_attributes, normalize_key};
pub use error::TagError;
pub use render::{DOCTYPE, render_attributes};

use trellis_common::warning::warn_once;

/// Tag used by [`ElementData::wrapper`].
const WRAPPER_TAG: &str = "div";

/// Warning text for content appended beneath a childless tag.
fn childless_warning(tag: &str) -> String {
    format!(
        "<{tag}> is a {} element; appended children are not rendered",
        tags::category(tag)
    )
}

/// A type-safe index into a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the tree: its payload plus its place in the hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    /// Element or text payload.
    pub node_type: NodeType,

    /// The element this node was appended to, if any.
    pub parent: Option<NodeId>,

    /// Ordered children. Text nodes never have any.
    pub children: Vec<NodeId>,
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// A tagged node with attributes.
    Element(ElementData),
    /// Literal text, emitted verbatim.
    Text(String),
}

/// Element-specific data.
///
/// Fields are private: the only way to get one is [`ElementData::new`], which
/// validates the tag and normalizes the attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    tag_name: String,
    attrs: AttributesMap,
}

impl ElementData {
    /// Validate `tag` against the catalog and normalize `attrs`.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Deprecated`] or [`TagError::Invalid`] when the tag
    /// cannot be constructed.
    pub fn new<K, V, I>(tag: &str, attrs: I) -> Result<Self, TagError>
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        tags::validate(tag)?;
        Ok(Self {
            tag_name: tag.to_string(),
            attrs: normalize_attributes(attrs),
        })
    }

    /// The implicit document root, `<html>` with the given attributes.
    pub fn document_root<K, V, I>(attrs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            tag_name: tags::ROOT_TAG.to_string(),
            attrs: normalize_attributes(attrs),
        }
    }

    /// A `<div>` carrying only `class`, used for builder-generated wrappers.
    pub fn wrapper(class: &str) -> Self {
        Self::wrapper_with(class, attrs![])
    }

    /// A wrapper `<div>` with extra attributes. `class` always ends up as
    /// the given wrapper class, whatever `attrs` supplies for it.
    pub fn wrapper_with<K, V, I>(class: &str, attrs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut attrs = normalize_attributes(attrs);
        let _ = attrs.insert("class".to_string(), class.into());
        Self {
            tag_name: WRAPPER_TAG.to_string(),
            attrs,
        }
    }

    /// The element's tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The element's canonical attributes.
    pub const fn attrs(&self) -> &AttributesMap {
        &self.attrs
    }

    /// Look up a single attribute by canonical key.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Returns the element's id attribute value if present.
    pub fn id(&self) -> Option<&AttrValue> {
        self.attrs.get("id")
    }

    /// Whether this element is self-closing.
    pub fn is_void(&self) -> bool {
        tags::is_void(&self.tag_name)
    }
}

/// Arena-based element tree with O(1) node access and traversal.
///
/// The root element is allocated first and lives at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding just `root`.
    pub fn new(root: ElementData) -> Self {
        Self {
            nodes: vec![Node {
                node_type: NodeType::Element(root),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get the root element ID.
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// Void elements accept children but never render them; a warning is
    /// printed the first time that happens for a given tag.
    ///
    /// # Panics
    ///
    /// Panics if either ID does not belong to this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(data) = self.as_element(parent) {
            if data.is_void() {
                warn_once("DOM", &childless_warning(data.tag_name()));
            }
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Allocate `element` and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> NodeId {
        let id = self.alloc(NodeType::Element(element));
        self.append_child(parent, id);
        id
    }

    /// Wrap `text` in a text node and append it under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.alloc(NodeType::Text(text.into()));
        self.append_child(parent, id);
        id
    }

    /// Deep-copy the subtree rooted at `from` in `source` into this arena.
    ///
    /// Returns the ID of the copied root, which is left unattached. The
    /// subtree root keeps its own tag and attributes.
    pub fn import_subtree(&mut self, source: &Self, from: NodeId) -> Option<NodeId> {
        let node = source.get(from)?;
        let id = self.alloc(node.node_type.clone());
        for &child in &node.children {
            if let Some(copied) = self.import_subtree(source, child) {
                self.nodes[id.0].children.push(copied);
                self.nodes[copied.0].parent = Some(id);
            }
        }
        Some(id)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the last child of a node.
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Concatenated text of a node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(text)) => out.push_str(text),
            Some(NodeType::Element(_)) => {
                for &child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
