//! Conversion from JSON documents into [`ConfigNode`] trees.
//!
//! Objects become nodes, arrays repeat their key once per element, and every
//! other JSON scalar is stored as its textual form. `null` entries are
//! dropped.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::ConfigNode;
use crate::{BindError, BindResult};

impl ConfigNode {
    /// Builds a node named `name` from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Tree`] when `value` is not an object or when an
    /// array directly contains another array, which has no tree equivalent.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodebind::ConfigNode;
    /// use serde_json::json;
    ///
    /// let node = ConfigNode::from_json("Mods", json!({
    ///     "VertexHeightNoise": [{ "deformity": 200 }, { "deformity": 50 }],
    ///     "enabled": true,
    /// }))?;
    ///
    /// assert_eq!(node.nodes_named("VertexHeightNoise").count(), 2);
    /// assert_eq!(node.value("enabled"), Some("true"));
    /// # Ok::<_, std::sync::Arc<nodebind::BindError>>(())
    /// ```
    pub fn from_json(name: impl Into<String>, value: Value) -> BindResult<Self> {
        let node_name: String = name.into();
        match value {
            Value::Object(map) => from_map(node_name, map),
            other => Err(shape_error(&node_name, &other)),
        }
    }
}

fn from_map(name: String, map: Map<String, Value>) -> BindResult<ConfigNode> {
    let mut node = ConfigNode::new(name);
    for (key, value) in map {
        push_entry(&mut node, key, value)?;
    }
    Ok(node)
}

fn push_entry(node: &mut ConfigNode, key: String, value: Value) -> BindResult<()> {
    match value {
        Value::Null => {}
        Value::Object(map) => node.push_node(from_map(key, map)?),
        Value::Array(items) => {
            for item in items {
                if item.is_array() {
                    return Err(Arc::new(BindError::Tree {
                        message: format!("array under '{key}' contains a nested array"),
                    }));
                }
                push_entry(node, key.clone(), item)?;
            }
        }
        Value::String(text) => node.push_value(key, text),
        Value::Bool(flag) => node.push_value(key, flag.to_string()),
        Value::Number(number) => node.push_value(key, number.to_string()),
    }
    Ok(())
}

fn shape_error(name: &str, value: &Value) -> Arc<BindError> {
    let value_kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Arc::new(BindError::Tree {
        message: format!("node '{name}' must be built from an object, found {value_kind}"),
    })
}
