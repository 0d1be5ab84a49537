use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// A decoded node: its tag and an attribute-to-value mapping.
///
/// Typed nodes are immutable value trees in practice: the decoder builds
/// them once and client code reads them through the accessors. The
/// `with` builder supports hand construction for encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedNode {
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, Value>,
}

impl TypedNode {
    /// Creates an empty node with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            attrs: BTreeMap::new(),
        }
    }

    /// Creates an empty node that prints without a wrapping tag.
    pub fn tagless() -> Self {
        Self {
            tag: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Sets an attribute, consuming and returning the node for chaining.
    pub fn with(mut self, attr: &str, value: impl Into<Value>) -> Self {
        self.set(attr, value);
        self
    }

    /// Sets an attribute in place.
    pub fn set(&mut self, attr: &str, value: impl Into<Value>) {
        self.attrs.insert(attr.to_string(), value.into());
    }

    /// Returns the attribute's value, if present.
    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.attrs.get(attr)
    }

    /// Returns the node's tag, if any.
    pub fn tag_str(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns a numeric attribute; integer values promote to f64.
    pub fn number(&self, attr: &str) -> Option<f64> {
        self.get(attr).and_then(Value::as_number)
    }

    pub fn integer(&self, attr: &str) -> Option<i64> {
        self.get(attr).and_then(Value::as_integer)
    }

    pub fn text(&self, attr: &str) -> Option<&str> {
        self.get(attr).and_then(Value::as_text)
    }

    pub fn boolean(&self, attr: &str) -> Option<bool> {
        self.get(attr).and_then(Value::as_boolean)
    }

    pub fn node(&self, attr: &str) -> Option<&TypedNode> {
        self.get(attr).and_then(Value::as_node)
    }

    pub fn list(&self, attr: &str) -> Option<&[Value]> {
        self.get(attr).and_then(Value::as_list)
    }
}
