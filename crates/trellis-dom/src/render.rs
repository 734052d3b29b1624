//! Markup serialization.
//!
//! Text is emitted verbatim and attribute values are interpolated as-is: no
//! escaping is performed, callers are expected to pass trusted content.

use crate::attributes::{AttrValue, AttributesMap};
use crate::{DomTree, NodeId, NodeType};

/// Preamble emitted in front of a full document.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Prefix that selects the always-valued attribute group.
const DATA_PREFIX: &str = "data-";

/// Serialize an attribute map, including the leading space.
///
/// Non-`data-` attributes come first, sorted by key: `true` renders as a bare
/// key and `false` is dropped. `data-` attributes follow, sorted by key, and
/// always render as `key="value"`. An empty map yields an empty string.
pub fn render_attributes(attrs: &AttributesMap) -> String {
    let mut regular: Vec<(&String, &AttrValue)> = Vec::new();
    let mut data: Vec<(&String, &AttrValue)> = Vec::new();
    for (key, value) in attrs {
        if key.starts_with(DATA_PREFIX) {
            data.push((key, value));
        } else {
            regular.push((key, value));
        }
    }
    regular.sort_by(|a, b| a.0.cmp(b.0));
    data.sort_by(|a, b| a.0.cmp(b.0));

    let mut parts: Vec<String> = Vec::with_capacity(attrs.len());
    for (key, value) in regular {
        match value {
            AttrValue::Bool(true) => parts.push(key.clone()),
            AttrValue::Bool(false) => {}
            other => parts.push(format!("{key}=\"{other}\"")),
        }
    }
    parts.extend(data.into_iter().map(|(key, value)| format!("{key}=\"{value}\"")));

    if parts.is_empty() {
        String::new()
    } else {
        format!(" {}", parts.join(" "))
    }
}

impl DomTree {
    /// Serialize the subtree rooted at `id`.
    ///
    /// Void elements render as `<tag/>` and drop any children they were given.
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Text(text) => out.push_str(text),
            NodeType::Element(data) => {
                let tag = data.tag_name();
                out.push('<');
                out.push_str(tag);
                out.push_str(&render_attributes(data.attrs()));
                if data.is_void() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &child in &node.children {
                    self.render_into(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementData, normalize_attributes};

    fn tree(tag: &str) -> DomTree {
        DomTree::new(ElementData::new(tag, attrs![]).unwrap())
    }

    #[test]
    fn test_empty_attributes_render_nothing() {
        assert_eq!(render_attributes(&AttributesMap::new()), "");
        assert_eq!(render_attributes(&normalize_attributes(attrs![hidden = false])), "");
    }

    #[test]
    fn test_attribute_order() {
        let attrs = normalize_attributes(attrs![
            style = "color: red",
            id = "test",
            cls = "main",
            data_value = "1",
            data_attr = "2",
        ]);
        assert_eq!(
            render_attributes(&attrs),
            r#" class="main" id="test" style="color: red" data-attr="2" data-value="1""#
        );
    }

    #[test]
    fn test_data_booleans_always_render() {
        let attrs = normalize_attributes(attrs![data_on = true, data_off = false]);
        assert_eq!(render_attributes(&attrs), r#" data-off="False" data-on="True""#);
    }

    #[test]
    fn test_void_drops_children() {
        let mut t = tree("img");
        let _ = t.append_text(NodeId::ROOT, "ignored");
        assert_eq!(t.render(NodeId::ROOT), "<img/>");
    }

    #[test]
    fn test_text_is_verbatim() {
        let mut t = tree("p");
        let _ = t.append_text(NodeId::ROOT, "<b>&</b>");
        assert_eq!(t.render(NodeId::ROOT), "<p><b>&</b></p>");
    }
}
