//! What the binder needs to know about a member's declared type.
//!
//! The binder never inspects a member beyond this trait. Every method has a
//! default meaning "not supported", so a type opts into exactly the shapes
//! it can be built from: leaf values implement [`Field::from_scalar`]
//! (usually through [`scalar_field!`](crate::scalar_field)), nested targets
//! implement [`Field::from_node`] and [`Field::merge_node`] (generated by
//! `#[derive(Target)]`).

use crate::{BindResult, Binder, ConfigNode, ScalarFormatError};

/// A type that can occupy a bound member slot.
pub trait Field: Sized {
    /// Name reported in diagnostics.
    fn type_name() -> &'static str;

    /// Whether the slot currently holds a value.
    ///
    /// Only nullable slots such as [`Option`] report `false`. The binder
    /// merges into a present value when the member allows merging and
    /// replaces it otherwise.
    fn is_present(&self) -> bool {
        true
    }

    /// Builds a value from a scalar entry.
    ///
    /// Returns `None` when the type has no scalar form.
    fn from_scalar(_raw: &str) -> Option<Result<Self, ScalarFormatError>> {
        None
    }

    /// Builds a fresh value from a child node.
    ///
    /// Returns `None` when the type cannot be built from a node.
    fn from_node(_node: &ConfigNode, _binder: &mut Binder<'_>) -> Option<BindResult<Self>> {
        None
    }

    /// Binds `node` into the existing value, keeping members the node does
    /// not mention.
    ///
    /// Returns `None` when the type cannot merge, in which case the binder
    /// falls back to [`Field::from_node`].
    fn merge_node(
        &mut self,
        _node: &ConfigNode,
        _binder: &mut Binder<'_>,
    ) -> Option<BindResult<()>> {
        None
    }

    /// Instance name used to match collection elements across merges.
    fn identity(&self) -> Option<&str> {
        None
    }

    /// Key under which a configuration node carries the instance name.
    fn identity_key() -> Option<&'static str> {
        None
    }
}

impl Field for String {
    fn type_name() -> &'static str {
        "String"
    }

    fn from_scalar(raw: &str) -> Option<Result<Self, ScalarFormatError>> {
        Some(Ok(raw.to_owned()))
    }
}

impl<T: Field> Field for Option<T> {
    fn type_name() -> &'static str {
        T::type_name()
    }

    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(T::is_present)
    }

    fn from_scalar(raw: &str) -> Option<Result<Self, ScalarFormatError>> {
        T::from_scalar(raw).map(|parsed| parsed.map(Some))
    }

    fn from_node(node: &ConfigNode, binder: &mut Binder<'_>) -> Option<BindResult<Self>> {
        T::from_node(node, binder).map(|built| built.map(Some))
    }

    fn merge_node(&mut self, node: &ConfigNode, binder: &mut Binder<'_>) -> Option<BindResult<()>> {
        self.as_mut().and_then(|inner| inner.merge_node(node, binder))
    }

    fn identity(&self) -> Option<&str> {
        self.as_ref().and_then(Field::identity)
    }

    fn identity_key() -> Option<&'static str> {
        T::identity_key()
    }
}

impl<T: Field> Field for Box<T> {
    fn type_name() -> &'static str {
        T::type_name()
    }

    fn is_present(&self) -> bool {
        self.as_ref().is_present()
    }

    fn from_scalar(raw: &str) -> Option<Result<Self, ScalarFormatError>> {
        T::from_scalar(raw).map(|parsed| parsed.map(Self::new))
    }

    fn from_node(node: &ConfigNode, binder: &mut Binder<'_>) -> Option<BindResult<Self>> {
        T::from_node(node, binder).map(|built| built.map(Self::new))
    }

    fn merge_node(&mut self, node: &ConfigNode, binder: &mut Binder<'_>) -> Option<BindResult<()>> {
        self.as_mut().merge_node(node, binder)
    }

    fn identity(&self) -> Option<&str> {
        Field::identity(self.as_ref())
    }

    fn identity_key() -> Option<&'static str> {
        T::identity_key()
    }
}

/// A member typed as a raw node receives a copy of the child node verbatim.
impl Field for ConfigNode {
    fn type_name() -> &'static str {
        "ConfigNode"
    }

    fn from_node(node: &Self, _binder: &mut Binder<'_>) -> Option<BindResult<Self>> {
        Some(Ok(node.clone()))
    }
}
