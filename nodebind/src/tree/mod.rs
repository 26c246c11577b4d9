//! Read-only hierarchical configuration tree consumed by the binder.
//!
//! A [`ConfigNode`] carries named scalar values and named child nodes. Names
//! are not unique: the same key may repeat, which is how ordered lists of
//! like-typed children are expressed. The binder only relies on the query
//! surface exposed here; producing a tree from text is the job of an external
//! parser.

mod json;

use std::fmt;

/// Distinguishes the two shapes a key can take inside a [`ConfigNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A named string payload.
    Scalar,
    /// A named child node.
    Node,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Node => f.write_str("node"),
        }
    }
}

/// A parsed configuration node.
///
/// # Examples
///
/// ```
/// use nodebind::ConfigNode;
///
/// let body = ConfigNode::new("Body")
///     .with_value("name", "Kerbin")
///     .with_node(ConfigNode::new("Properties").with_value("radius", "600000"));
///
/// assert_eq!(body.value("name"), Some("Kerbin"));
/// assert!(body.has_node("Properties"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    name: String,
    values: Vec<(String, String)>,
    nodes: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Creates an empty node with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Returns the node's own name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a scalar value, returning the node for chaining.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_value(key, value);
        self
    }

    /// Appends a child node, returning the node for chaining.
    #[must_use]
    pub fn with_node(mut self, node: Self) -> Self {
        self.push_node(node);
        self
    }

    /// Appends a scalar value in place.
    pub fn push_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    /// Appends a child node in place.
    pub fn push_node(&mut self, node: Self) {
        self.nodes.push(node);
    }

    /// Returns `true` when at least one scalar is stored under `key`.
    #[must_use]
    pub fn has_value(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| k == key)
    }

    /// Returns `true` when at least one child node is named `key`.
    #[must_use]
    pub fn has_node(&self, key: &str) -> bool {
        self.nodes.iter().any(|n| n.name == key)
    }

    /// Returns the first scalar stored under `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every scalar stored under `key`, in declaration order.
    pub fn values_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every `(key, value)` pair in declaration order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the first child node named `key`.
    #[must_use]
    pub fn node(&self, key: &str) -> Option<&Self> {
        self.nodes.iter().find(|n| n.name == key)
    }

    /// Returns every child node in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[Self] {
        &self.nodes
    }

    /// Returns every child node named `key`, in declaration order.
    pub fn nodes_named<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.nodes.iter().filter(move |n| n.name == key)
    }

    /// Reports which shapes are present under `key`.
    ///
    /// A key may legitimately exist as both a scalar and a node; callers
    /// decide which one wins.
    #[must_use]
    pub fn presence(&self, key: &str) -> Presence {
        Presence {
            scalar: self.has_value(key),
            node: self.has_node(key),
        }
    }

    /// Returns `true` when the node holds neither values nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nodes.is_empty()
    }
}

/// Shapes found under a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presence {
    /// A scalar exists under the key.
    pub scalar: bool,
    /// A child node exists under the key.
    pub node: bool,
}

impl Presence {
    /// Returns `true` when neither a scalar nor a node exists.
    #[must_use]
    pub const fn is_absent(self) -> bool {
        !self.scalar && !self.node
    }

    /// The kind that was found, scalar first when both exist.
    #[must_use]
    pub const fn found(self) -> Option<NodeKind> {
        if self.scalar {
            Some(NodeKind::Scalar)
        } else if self.node {
            Some(NodeKind::Node)
        } else {
            None
        }
    }

    /// Returns `true` when the given kind is available.
    #[must_use]
    pub const fn offers(self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Scalar => self.scalar,
            NodeKind::Node => self.node,
        }
    }
}

#[cfg(test)]
mod tests;
