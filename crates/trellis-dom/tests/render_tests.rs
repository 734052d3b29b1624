//! Integration tests for element construction and rendering.

use trellis_dom::tags::{DEPRECATED_TAGS, TAGS, VOID_TAGS};
use trellis_dom::{AttrValue, DomTree, ElementData, NodeId, TagError, attrs};

/// Helper to build a single-element tree.
fn single(tag: &str, raw: Vec<(&'static str, AttrValue)>) -> DomTree {
    DomTree::new(ElementData::new(tag, raw).expect("tag should be permitted"))
}

#[test]
fn test_every_non_void_tag_renders_open_close() {
    for tag in TAGS.iter().filter(|t| !VOID_TAGS.contains(*t)) {
        let tree = single(tag, attrs![]);
        assert_eq!(tree.render(NodeId::ROOT), format!("<{tag}></{tag}>"));
    }
}

#[test]
fn test_every_void_tag_self_closes_despite_children() {
    for tag in VOID_TAGS {
        let mut tree = single(tag, attrs![]);
        let child = tree.append_element(NodeId::ROOT, ElementData::new("span", attrs![]).unwrap());
        let _ = tree.append_text(child, "lost");
        assert_eq!(tree.render(NodeId::ROOT), format!("<{tag}/>"));
    }
}

#[test]
fn test_void_tag_keeps_attributes() {
    let tree = single("img", attrs![src = "test.jpg", alt = "Test"]);
    assert_eq!(tree.render(NodeId::ROOT), r#"<img alt="Test" src="test.jpg"/>"#);
}

#[test]
fn test_every_deprecated_tag_is_rejected() {
    for tag in DEPRECATED_TAGS {
        assert_eq!(
            ElementData::new(tag, attrs![]),
            Err(TagError::Deprecated {
                tag: (*tag).to_string()
            })
        );
    }
}

#[test]
fn test_unknown_tag_is_rejected() {
    let err = ElementData::new("invalidtag", attrs![]).unwrap_err();
    assert_eq!(err.to_string(), "invalidtag is not a valid HTML tag");
    assert_eq!(err.tag(), Some("invalidtag"));
}

#[test]
fn test_attribute_normalization_variations() {
    let tree = single(
        "div",
        attrs![
            cls_ = "main",
            data_test = "1",
            aria_label = "test",
            my_attr_name = "val",
            class_ = "ignored",
        ],
    );
    assert_eq!(
        tree.render(NodeId::ROOT),
        r#"<div aria-label="test" class="main" my-attr-name="val" data-test="1"></div>"#
    );
}

#[test]
fn test_boolean_attributes() {
    let tree = single("div", attrs![hidden = true, data_expanded = false]);
    assert_eq!(tree.render(NodeId::ROOT), r#"<div hidden data-expanded="False"></div>"#);
}

#[test]
fn test_mixed_attribute_types() {
    let tree = single("div", attrs![id = 1, cls = ["a", "b"], data_count = 42]);
    assert_eq!(
        tree.render(NodeId::ROOT),
        r#"<div class="a b" id="1" data-count="42"></div>"#
    );
}

#[test]
fn test_float_attribute() {
    let tree = single("meter", attrs![value = 0.5, max = 1.0]);
    assert_eq!(tree.render(NodeId::ROOT), r#"<meter max="1.0" value="0.5"></meter>"#);
}

#[test]
fn test_nested_render_order() {
    let mut tree = single("div", attrs![]);
    let span = tree.append_element(NodeId::ROOT, ElementData::new("span", attrs![]).unwrap());
    let _ = tree.append_text(span, "inline");
    let p = tree.append_element(NodeId::ROOT, ElementData::new("p", attrs![]).unwrap());
    let em = tree.append_element(p, ElementData::new("em", attrs![]).unwrap());
    let _ = tree.append_text(em, "emphasized");
    assert_eq!(
        tree.render(NodeId::ROOT),
        "<div><span>inline</span><p><em>emphasized</em></p></div>"
    );
    assert_eq!(tree.render(p), "<p><em>emphasized</em></p>");
}
