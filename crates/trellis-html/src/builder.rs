//! Document and fragment builders.
//!
//! A [`Builder`] owns an element tree and a cursor: the element that receives
//! newly created nodes. [`Document`] and [`Fragment`] are the two flavors and
//! deref to the shared builder.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::debug;
use trellis_dom::{
    AttrValue, DOCTYPE, DomTree, ElementData, NodeId, TagError, attrs, tags,
};

use crate::markdown;
use crate::scope::Scope;
use crate::sparkline::{self, SparklineOptions};

/// Class carried by the default fragment wrapper.
const FRAGMENT_CLASS: &str = "fragment";

/// Which flavor of builder produced a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderKind {
    /// Full page: rendered with the doctype preamble, markdown kept as given.
    Document,
    /// Detachable subtree: rendered bare, markdown dedented first.
    Fragment,
}

/// Something that can be attached at a builder's cursor.
#[derive(Debug, Clone)]
pub enum Attachment<'a> {
    /// Another builder's whole tree, root element included.
    Tree(&'a Builder),
    /// Literal text.
    Text(String),
}

impl<'a> From<&'a Builder> for Attachment<'a> {
    fn from(builder: &'a Builder) -> Self {
        Self::Tree(builder)
    }
}

impl<'a> From<&'a Document> for Attachment<'a> {
    fn from(document: &'a Document) -> Self {
        Self::Tree(&document.0)
    }
}

impl<'a> From<&'a Fragment> for Attachment<'a> {
    fn from(fragment: &'a Fragment) -> Self {
        Self::Tree(&fragment.0)
    }
}

impl From<&str> for Attachment<'_> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Attachment<'_> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Element tree plus the cursor that receives new children.
#[derive(Debug, Clone)]
pub struct Builder {
    tree: DomTree,
    cursor: NodeId,
    kind: BuilderKind,
}

impl Builder {
    fn from_root(root: ElementData, kind: BuilderKind) -> Self {
        let tree = DomTree::new(root);
        let cursor = tree.root();
        Self { tree, cursor, kind }
    }

    /// The tree built so far.
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The root element.
    pub const fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The element currently receiving new children.
    pub const fn cursor(&self) -> NodeId {
        self.cursor
    }

    /// Which flavor of builder this is.
    pub const fn kind(&self) -> BuilderKind {
        self.kind
    }

    /// Create an element at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Deprecated`] or [`TagError::Invalid`] if `name`
    /// cannot be constructed; nothing is appended in that case.
    pub fn tag<K, V, I>(&mut self, name: &str, attrs: I) -> Result<NodeId, TagError>
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.tag_with(name, std::iter::empty::<&str>(), attrs)
    }

    /// Create an element at the cursor holding `content` as text.
    ///
    /// Content items are concatenated into a single text child. No text node
    /// is added when `content` yields nothing.
    ///
    /// # Errors
    ///
    /// Same as [`Builder::tag`].
    pub fn tag_with<C, T, K, V, I>(
        &mut self,
        name: &str,
        content: C,
        attrs: I,
    ) -> Result<NodeId, TagError>
    where
        C: IntoIterator<Item = T>,
        T: fmt::Display,
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let element = ElementData::new(name, attrs)?;
        let id = self.tree.append_element(self.cursor, element);

        let mut content = content.into_iter().peekable();
        if content.peek().is_some() {
            let text: String = content.map(|item| item.to_string()).collect();
            let _ = self.tree.append_text(id, text);
        }
        Ok(id)
    }

    /// Append text at the cursor.
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        let _ = self.tree.append_text(self.cursor, text);
        self
    }

    /// Move the cursor into `element` until the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::VoidScope`] for void elements and
    /// [`TagError::NotAnElement`] when `element` is not an element of this
    /// tree. The cursor does not move on error.
    pub fn open_scope(&mut self, element: NodeId) -> Result<Scope<'_>, TagError> {
        let data = self
            .tree
            .as_element(element)
            .ok_or(TagError::NotAnElement { id: element.0 })?;
        if data.is_void() {
            return Err(TagError::VoidScope {
                tag: data.tag_name().to_string(),
            });
        }
        Ok(Scope::new(self, element))
    }

    /// Create an element at the cursor and open a scope on it.
    ///
    /// # Errors
    ///
    /// Same as [`Builder::tag`], plus [`TagError::VoidScope`] for void tags;
    /// in that case the void element has already been appended.
    pub fn enter<K, V, I>(&mut self, name: &str, attrs: I) -> Result<Scope<'_>, TagError>
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let id = self.tag(name, attrs)?;
        self.open_scope(id)
    }

    /// Create an element at the cursor and run `block` with the cursor inside it.
    ///
    /// The cursor is restored before any error from `block` is returned.
    ///
    /// # Errors
    ///
    /// Propagates [`Builder::enter`] failures and whatever `block` returns.
    pub fn within<K, V, I, F, E>(&mut self, name: &str, attrs: I, block: F) -> Result<NodeId, E>
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
        F: FnOnce(&mut Self) -> Result<(), E>,
        E: From<TagError>,
    {
        let mut scope = self.enter(name, attrs)?;
        let id = scope.element();
        block(&mut *scope)?;
        Ok(id)
    }

    /// Move the cursor back to the root.
    pub fn reset(&mut self) -> &mut Self {
        self.cursor = self.root();
        self
    }

    /// Attach another builder's tree or a piece of text at the cursor.
    ///
    /// Trees are copied with their root element intact, so a fragment keeps
    /// its wrapper.
    pub fn attach<'a>(&mut self, item: impl Into<Attachment<'a>>) -> &mut Self {
        match item.into() {
            Attachment::Tree(other) => {
                if let Some(copied) = self.tree.import_subtree(&other.tree, other.root()) {
                    self.tree.append_child(self.cursor, copied);
                    debug!(
                        nodes = other.tree.len(),
                        cursor = self.cursor.0,
                        "attached subtree"
                    );
                }
            }
            Attachment::Text(text) => {
                let _ = self.tree.append_text(self.cursor, text);
            }
        }
        self
    }

    /// Render markdown and attach it at the cursor inside
    /// `<div class="markdown">`.
    ///
    /// Fragments strip the common leading whitespace from `text` first;
    /// documents pass it through unchanged.
    pub fn markdown(&mut self, text: &str) -> &mut Self {
        let block = match self.kind {
            BuilderKind::Document => markdown::block(text),
            BuilderKind::Fragment => markdown::block(&markdown::dedent(text)),
        };
        self.attach(&block)
    }

    /// Append an SVG sparkline for `data` at the cursor.
    pub fn sparkline(&mut self, data: &[f64], options: &SparklineOptions) -> &mut Self {
        self.text(sparkline::render(data, options))
    }

    /// Serialize the tree. Documents are prefixed with the doctype.
    pub fn render(&self) -> String {
        let markup = self.tree.render(self.root());
        match self.kind {
            BuilderKind::Document => format!("{DOCTYPE}{markup}"),
            BuilderKind::Fragment => markup,
        }
    }

    pub(crate) fn move_cursor(&mut self, element: NodeId) {
        self.cursor = element;
    }

    /// Close the scope on `element`: the cursor goes to its parent element,
    /// or to the root when it has none.
    pub(crate) fn release(&mut self, element: NodeId) {
        self.cursor = match self.tree.parent(element) {
            Some(parent) if self.tree.as_element(parent).is_some() => parent,
            _ => self.root(),
        };
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A full page rooted at `<html>`.
#[derive(Debug, Clone)]
pub struct Document(Builder);

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::with_attrs(attrs![])
    }

    /// An empty document whose `<html>` root carries `attrs`.
    pub fn with_attrs<K, V, I>(attrs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(Builder::from_root(
            ElementData::document_root(attrs),
            BuilderKind::Document,
        ))
    }

    /// Give up the document wrapper and keep the builder.
    pub fn into_builder(self) -> Builder {
        self.0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Document {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        &self.0
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Builder {
        &mut self.0
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A detachable subtree with its own root element.
#[derive(Debug, Clone)]
pub struct Fragment(Builder);

impl Fragment {
    /// A fragment wrapped in `<div class="fragment">`.
    pub fn new() -> Self {
        Self::with_attrs(attrs![])
    }

    /// A fragment wrapped in `<div class="fragment">` that also carries
    /// `attrs`. The wrapper class cannot be overridden.
    pub fn with_attrs<K, V, I>(attrs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_element(ElementData::wrapper_with(FRAGMENT_CLASS, attrs))
    }

    /// A fragment rooted at `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Deprecated`] or [`TagError::Invalid`] when `tag`
    /// is not a permitted, non-deprecated tag. `html` is rejected too.
    pub fn with_root<K, V, I>(tag: &str, attrs: I) -> Result<Self, TagError>
    where
        K: AsRef<str>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        tags::validate_fragment_root(tag)?;
        Ok(Self::from_element(ElementData::new(tag, attrs)?))
    }

    pub(crate) fn from_element(root: ElementData) -> Self {
        Self(Builder::from_root(root, BuilderKind::Fragment))
    }

    /// Give up the fragment wrapper and keep the builder.
    pub fn into_builder(self) -> Builder {
        self.0
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Fragment {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        &self.0
    }
}

impl DerefMut for Fragment {
    fn deref_mut(&mut self) -> &mut Builder {
        &mut self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_falls_back_to_root_for_detached_element() {
        let mut doc = Document::new();
        let div = doc.tag("div", attrs![]).unwrap();
        doc.move_cursor(div);
        doc.release(NodeId::ROOT);
        assert_eq!(doc.cursor(), NodeId::ROOT);
    }

    #[test]
    fn test_open_scope_rejects_text_nodes() {
        let mut doc = Document::new();
        let _ = doc.text("loose");
        let text = doc.tree().last_child(NodeId::ROOT).unwrap();
        assert!(matches!(
            doc.open_scope(text),
            Err(TagError::NotAnElement { .. })
        ));
        assert_eq!(doc.cursor(), NodeId::ROOT);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Document::new().kind(), BuilderKind::Document);
        assert_eq!(Fragment::new().kind(), BuilderKind::Fragment);
    }
}
