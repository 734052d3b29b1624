//! JSON view of a built tree, for `--json`.

use serde_json::{Map, Value, json};
use trellis_dom::{DomTree, NodeId, NodeType};

/// Convert the subtree at `id` into nested JSON objects.
///
/// Elements carry `tagName`, `attributes` and `children`; text nodes carry
/// `content`.
pub fn tree_to_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    let mut obj = Map::new();

    match &node.node_type {
        NodeType::Element(data) => {
            let _ = obj.insert("type".to_string(), json!("element"));
            let _ = obj.insert("tagName".to_string(), json!(data.tag_name()));
            let attrs: Map<String, Value> = data
                .attrs()
                .iter()
                .map(|(k, v)| (k.clone(), json!(v)))
                .collect();
            let _ = obj.insert("attributes".to_string(), Value::Object(attrs));
        }
        NodeType::Text(text) => {
            let _ = obj.insert("type".to_string(), json!("text"));
            let _ = obj.insert("content".to_string(), json!(text));
        }
    }

    if !node.children.is_empty() {
        let children: Vec<Value> = node
            .children
            .iter()
            .map(|&child| tree_to_json(tree, child))
            .collect();
        let _ = obj.insert("children".to_string(), Value::Array(children));
    }

    Value::Object(obj)
}
