//! The contract between a bindable type and the binder.
//!
//! Implementations are normally generated by `#[derive(Target)]`; the
//! generated `resolve_members` visits fields in declaration order, splicing
//! in `flatten` members first so inherited members resolve ahead of the
//! type's own.

use crate::{BindResult, Binder, ConfigNode, LifecycleHooks, MemberDescriptor, Phase};

/// A type whose members can be bound from a [`ConfigNode`].
pub trait Target {
    /// Name used in error paths and registry lookups.
    const TYPE_NAME: &'static str;

    /// Resolves every member that belongs to `phase` against `node`.
    ///
    /// # Errors
    ///
    /// Propagates the first structural, scalar or nested failure.
    fn resolve_members(
        &mut self,
        phase: Phase,
        node: &ConfigNode,
        binder: &mut Binder<'_>,
    ) -> BindResult<()>;

    /// Descriptors of every bound member in resolution order.
    fn descriptors() -> Vec<MemberDescriptor>
    where
        Self: Sized;

    /// Lifecycle hooks, when the type subscribes to them.
    fn hooks(&mut self) -> Option<&mut dyn LifecycleHooks> {
        None
    }

    /// Instance name used to match collection elements across merges.
    fn identity(&self) -> Option<&str> {
        None
    }

    /// Key under which configuration nodes carry the instance name.
    fn identity_key() -> Option<&'static str>
    where
        Self: Sized,
    {
        None
    }
}
