//! Per-member binding metadata.
//!
//! Descriptors are plain `const` data. `#[derive(Target)]` emits one per
//! bound field; hand-written targets build them with the `const` builder
//! methods below.
//!
//! ```
//! use nodebind::{MemberDescriptor, NodeKind};
//!
//! const NAME: MemberDescriptor = MemberDescriptor::new("name").required().early();
//! const ATMOSPHERE: MemberDescriptor = MemberDescriptor::new("Atmosphere")
//!     .merge()
//!     .kind(NodeKind::Node);
//!
//! assert!(!NAME.optional && NAME.early);
//! assert_eq!(ATMOSPHERE.required_kind, Some(NodeKind::Node));
//! ```

use crate::NodeKind;

/// Collection key that reads elements directly from the owning node.
pub const SELF_KEY: &str = "self";

/// Which lifecycle phase a member resolves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Members that must be resolved before the early lifecycle hook.
    Early,
    /// Every other member.
    Normal,
}

impl Phase {
    /// Whether a member declared with `early` resolves in this phase.
    #[must_use]
    pub const fn admits(self, early: bool) -> bool {
        matches!((self, early), (Self::Early, true) | (Self::Normal, false))
    }
}

/// How the names of a collection node's children select element instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameSignificance {
    /// Child names are irrelevant; every child node becomes an element.
    #[default]
    None,
    /// Child names select the element's concrete type through the registry.
    Type,
    /// Only entries named by the element key are elements.
    Key,
}

/// Collection-specific metadata on a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionDescriptor {
    /// How children select element instances.
    pub significance: NameSignificance,
    /// Prefix joined to child names before registry lookup.
    pub type_prefix: &'static str,
    /// Entry name that marks elements under [`NameSignificance::Key`].
    pub element_key: &'static str,
}

impl CollectionDescriptor {
    /// A collection with no name significance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            significance: NameSignificance::None,
            type_prefix: "",
            element_key: "key",
        }
    }

    /// Sets the name significance.
    #[must_use]
    pub const fn significance(mut self, significance: NameSignificance) -> Self {
        self.significance = significance;
        self
    }

    /// Sets the registry prefix for type-significant children.
    #[must_use]
    pub const fn prefix(mut self, prefix: &'static str) -> Self {
        self.type_prefix = prefix;
        self
    }

    /// Sets the element key for key-significant collections.
    #[must_use]
    pub const fn element(mut self, key: &'static str) -> Self {
        self.element_key = key;
        self
    }
}

impl Default for CollectionDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata attached to one bindable member of a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Configuration key the member is bound from.
    pub key: &'static str,
    /// Whether absence of the key is acceptable.
    pub optional: bool,
    /// Whether a present sub-object is merged into instead of replaced.
    pub allow_merge: bool,
    /// Whether the member resolves before the early lifecycle hook.
    pub early: bool,
    /// Shape the entry must have, if constrained.
    pub required_kind: Option<NodeKind>,
    /// Separator used to join every repeated scalar under the key.
    pub join: Option<&'static str>,
    /// Collection metadata for collection members.
    pub collection: Option<CollectionDescriptor>,
}

impl MemberDescriptor {
    /// An optional, replace-mode member with no shape constraint.
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            optional: true,
            allow_merge: false,
            early: false,
            required_kind: None,
            join: None,
            collection: None,
        }
    }

    /// Marks the member as non-optional.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    /// Allows merging into an existing value.
    #[must_use]
    pub const fn merge(mut self) -> Self {
        self.allow_merge = true;
        self
    }

    /// Resolves the member before the early lifecycle hook.
    #[must_use]
    pub const fn early(mut self) -> Self {
        self.early = true;
        self
    }

    /// Requires the entry to have the given shape.
    #[must_use]
    pub const fn kind(mut self, kind: NodeKind) -> Self {
        self.required_kind = Some(kind);
        self
    }

    /// Joins every scalar under the key with `separator` before parsing.
    #[must_use]
    pub const fn join(mut self, separator: &'static str) -> Self {
        self.join = Some(separator);
        self
    }

    /// Declares the member as a collection.
    #[must_use]
    pub const fn collection(mut self, collection: CollectionDescriptor) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Whether this member is resolved in `phase`.
    #[must_use]
    pub const fn resolves_in(&self, phase: Phase) -> bool {
        phase.admits(self.early)
    }

    /// Whether a collection reads its elements from the owning node.
    #[must_use]
    pub fn reads_self(&self) -> bool {
        self.key == SELF_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_optional_replace_normal_phase() {
        let d = MemberDescriptor::new("radius");
        assert!(d.optional);
        assert!(!d.allow_merge);
        assert!(d.resolves_in(Phase::Normal));
        assert!(!d.resolves_in(Phase::Early));
    }

    #[rstest]
    #[case(true, Phase::Early, true)]
    #[case(true, Phase::Normal, false)]
    #[case(false, Phase::Early, false)]
    #[case(false, Phase::Normal, true)]
    fn phases_partition_members(#[case] early: bool, #[case] phase: Phase, #[case] expected: bool) {
        assert_eq!(phase.admits(early), expected);
    }

    #[test]
    fn collection_builder_sets_metadata() {
        let d = MemberDescriptor::new("self").collection(
            CollectionDescriptor::new()
                .significance(NameSignificance::Key)
                .element("key"),
        );
        assert!(d.reads_self());
        let c = d.collection.expect("collection metadata");
        assert_eq!(c.significance, NameSignificance::Key);
        assert_eq!(c.element_key, "key");
    }
}
