//! Resolution of a single member against the node that owns it.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use super::Binder;
use crate::{
    BindError, BindResult, Collection, ConfigNode, Field, MemberDescriptor, NameSignificance,
    NodeKind, Phase,
};

/// Whether `node` holds any entry a `self` collection would read.
fn offers_elements(node: &ConfigNode, descriptor: &MemberDescriptor) -> bool {
    let layout = descriptor.collection.unwrap_or_default();
    match layout.significance {
        NameSignificance::Key => !node.presence(layout.element_key).is_absent(),
        NameSignificance::None | NameSignificance::Type => !node.nodes().is_empty(),
    }
}

impl Binder<'_> {
    /// Resolves one member slot from `node`.
    ///
    /// Members outside `phase` are skipped. An absent key leaves the slot
    /// untouched unless the member is required. When a key holds both a
    /// scalar and a node and the member declares no kind, the scalar wins.
    ///
    /// # Errors
    ///
    /// * [`BindError::MissingRequiredField`] for an absent required key;
    /// * [`BindError::KindMismatch`] when the entry's shape contradicts the
    ///   declared kind;
    /// * [`BindError::ScalarFormat`] when the value parser rejects the
    ///   literal;
    /// * [`BindError::UnsupportedFieldType`] under a `deny` policy;
    /// * any error raised while binding a nested target.
    pub fn resolve_member<F: Field>(
        &mut self,
        slot: &mut F,
        descriptor: &MemberDescriptor,
        phase: Phase,
        node: &ConfigNode,
    ) -> BindResult<()> {
        if !descriptor.resolves_in(phase) {
            return Ok(());
        }
        let Some(kind) = self.entry_kind(descriptor, node)? else {
            return Ok(());
        };
        if self.options.log_members {
            debug!(
                key = descriptor.key,
                member_type = F::type_name(),
                %kind,
                path = %self.path(),
                "binding member"
            );
        }
        match kind {
            NodeKind::Scalar => self.assign_scalar(slot, descriptor, node),
            NodeKind::Node => match node.node(descriptor.key) {
                Some(child) => self.assign_node(slot, descriptor, child),
                None => Ok(()),
            },
        }
    }

    /// Resolves a collection member from `node`.
    ///
    /// A collection keyed `self` reads its elements from `node` itself and
    /// is skipped when `node` offers none. Otherwise the key must name a
    /// child node.
    ///
    /// # Errors
    ///
    /// * [`BindError::MissingRequiredField`] for an absent required key;
    /// * [`BindError::KindMismatch`] when the key only names a scalar;
    /// * any error raised by [`Binder::bind_collection`].
    pub fn resolve_collection<C: Collection>(
        &mut self,
        container: &mut C,
        descriptor: &MemberDescriptor,
        phase: Phase,
        node: &ConfigNode,
    ) -> BindResult<()> {
        if !descriptor.resolves_in(phase) {
            return Ok(());
        }
        if !descriptor.reads_self() {
            let presence = node.presence(descriptor.key);
            if presence.is_absent() {
                return self.check_optional(descriptor);
            }
            if !presence.node {
                return Err(Arc::new(BindError::KindMismatch {
                    key: descriptor.key.to_owned(),
                    expected: NodeKind::Node,
                    found: NodeKind::Scalar,
                    path: self.path(),
                }));
            }
        }
        if self.options.log_members {
            debug!(key = descriptor.key, path = %self.path(), "binding collection");
        }
        self.bind_collection(container, node, descriptor)
    }

    /// Binds the elements under `parent`'s collection node into `container`.
    ///
    /// The collection node is the child of `parent` named by the descriptor's
    /// key, or `parent` itself for the key `self`. A missing collection node,
    /// or a `self` node without any element entries, leaves the container
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates element failures and invalid collection declarations.
    pub fn bind_collection<C: Collection>(
        &mut self,
        container: &mut C,
        parent: &ConfigNode,
        descriptor: &MemberDescriptor,
    ) -> BindResult<()> {
        if descriptor.reads_self() {
            if !offers_elements(parent, descriptor) {
                return Ok(());
            }
            return container.bind_elements(parent, descriptor, self);
        }
        match parent.node(descriptor.key) {
            Some(source) => container.bind_elements(source, descriptor, self),
            None => Ok(()),
        }
    }

    /// Works out which shape to bind from, or `None` to skip the member.
    fn entry_kind(
        &self,
        descriptor: &MemberDescriptor,
        node: &ConfigNode,
    ) -> BindResult<Option<NodeKind>> {
        let presence = node.presence(descriptor.key);
        let Some(found) = presence.found() else {
            return self.check_optional(descriptor).map(|()| None);
        };
        match descriptor.required_kind {
            None => Ok(Some(found)),
            Some(expected) if presence.offers(expected) => Ok(Some(expected)),
            Some(expected) => Err(Arc::new(BindError::KindMismatch {
                key: descriptor.key.to_owned(),
                expected,
                found,
                path: self.path(),
            })),
        }
    }

    fn check_optional(&self, descriptor: &MemberDescriptor) -> BindResult<()> {
        if descriptor.optional {
            Ok(())
        } else {
            Err(Arc::new(BindError::MissingRequiredField {
                target: self.current_target(),
                key: descriptor.key.to_owned(),
                path: self.path(),
            }))
        }
    }

    fn assign_scalar<F: Field>(
        &mut self,
        slot: &mut F,
        descriptor: &MemberDescriptor,
        node: &ConfigNode,
    ) -> BindResult<()> {
        let raw = match descriptor.join {
            Some(separator) => Cow::Owned(
                node.values_named(descriptor.key)
                    .collect::<Vec<_>>()
                    .join(separator),
            ),
            None => Cow::Borrowed(node.value(descriptor.key).unwrap_or_default()),
        };
        match F::from_scalar(&raw) {
            Some(Ok(value)) => {
                *slot = value;
                Ok(())
            }
            Some(Err(source)) => Err(Arc::new(BindError::ScalarFormat {
                key: descriptor.key.to_owned(),
                path: self.path(),
                source,
            })),
            None => self.unsupported_field(descriptor.key, F::type_name(), NodeKind::Scalar),
        }
    }

    fn assign_node<F: Field>(
        &mut self,
        slot: &mut F,
        descriptor: &MemberDescriptor,
        child: &ConfigNode,
    ) -> BindResult<()> {
        if descriptor.allow_merge
            && slot.is_present()
            && let Some(merged) = slot.merge_node(child, self)
        {
            return merged;
        }
        match F::from_node(child, self) {
            Some(built) => {
                *slot = built?;
                Ok(())
            }
            None => self.unsupported_field(descriptor.key, F::type_name(), NodeKind::Node),
        }
    }
}
