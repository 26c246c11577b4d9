//! Binding of variable-length element lists.
//!
//! A collection member reads its elements from one configuration node (or
//! from the owning node when keyed `self`). How children become elements is
//! governed by the member's [`NameSignificance`]:
//!
//! * `None`: every child node becomes one element of the container's fixed
//!   element type;
//! * `Key`: every scalar, then every child node, named by the element key
//!   becomes one element;
//! * `Type`: each child node's name, joined to the type prefix, selects the
//!   element's concrete type from the [`TypeRegistry`](crate::TypeRegistry).
//!
//! Without `merge`, or when the container is empty, the container is
//! rebuilt in child order. With `merge`, each child first claims an
//! unclaimed live element of the same runtime type (and the same identity,
//! when the child names one) and binds into it; claimed elements keep their
//! position and unmatched children are appended in order.

use std::any::TypeId;
use std::sync::Arc;

use crate::{
    BindError, BindResult, Binder, ConfigNode, Element, Field, MemberDescriptor, NameSignificance,
    NodeKind,
};

/// A container that the collection binder can fill.
pub trait Collection {
    /// Binds the children of `source` into the container.
    ///
    /// # Errors
    ///
    /// Propagates element failures, and reports
    /// [`BindError::InvalidCollection`] when the descriptor asks for a name
    /// significance the container cannot honour.
    fn bind_elements(
        &mut self,
        source: &ConfigNode,
        descriptor: &MemberDescriptor,
        binder: &mut Binder<'_>,
    ) -> BindResult<()>;
}

#[derive(Clone, Copy)]
enum Entry<'n> {
    Scalar(&'n str),
    Node(&'n ConfigNode),
}

impl<'n> Entry<'n> {
    fn identity(self, identity_key: Option<&'static str>) -> Option<&'n str> {
        match (self, identity_key) {
            (Self::Node(child), Some(key)) => child.value(key),
            _ => None,
        }
    }
}

fn invalid(descriptor: &MemberDescriptor, binder: &Binder<'_>, message: &str) -> Arc<BindError> {
    Arc::new(BindError::InvalidCollection {
        key: descriptor.key.to_owned(),
        message: message.to_owned(),
        path: binder.path(),
    })
}

fn source_path(binder: &Binder<'_>, source: &ConfigNode, descriptor: &MemberDescriptor) -> String {
    let owner = binder.path();
    if descriptor.reads_self() {
        owner
    } else if owner.is_empty() {
        source.name().to_owned()
    } else {
        format!("{owner}/{}", source.name())
    }
}

/// Index of the first unclaimed item accepted by `accept`.
fn claim<T>(items: &[T], claimed: &[bool], accept: impl Fn(&T) -> bool) -> Option<usize> {
    items
        .iter()
        .zip(claimed)
        .position(|(item, taken)| !taken && accept(item))
}

fn mark(claimed: &mut [bool], index: usize) {
    if let Some(flag) = claimed.get_mut(index) {
        *flag = true;
    }
}

impl<E: Field> Collection for Vec<E> {
    fn bind_elements(
        &mut self,
        source: &ConfigNode,
        descriptor: &MemberDescriptor,
        binder: &mut Binder<'_>,
    ) -> BindResult<()> {
        let layout = descriptor.collection.unwrap_or_default();
        let entries: Vec<Entry<'_>> = match layout.significance {
            NameSignificance::None => source.nodes().iter().map(Entry::Node).collect(),
            NameSignificance::Key => source
                .values_named(layout.element_key)
                .map(Entry::Scalar)
                .chain(source.nodes_named(layout.element_key).map(Entry::Node))
                .collect(),
            NameSignificance::Type => {
                return Err(invalid(
                    descriptor,
                    binder,
                    "type-significant collections need a registry-backed container",
                ));
            }
        };

        if !descriptor.allow_merge || self.is_empty() {
            let mut fresh = Vec::with_capacity(entries.len());
            for entry in entries {
                if let Some(element) = build_element::<E>(entry, layout.element_key, binder)? {
                    fresh.push(element);
                }
            }
            *self = fresh;
            return Ok(());
        }

        let mut claimed = vec![false; self.len()];
        for entry in entries {
            let wanted = entry.identity(<E as Field>::identity_key());
            let index = claim(self, &claimed, |existing| {
                wanted.is_none_or(|id| Field::identity(existing) == Some(id))
            });
            let Some(index) = index else {
                if let Some(element) = build_element::<E>(entry, layout.element_key, binder)? {
                    self.push(element);
                }
                continue;
            };
            mark(&mut claimed, index);
            if let Some(existing) = self.get_mut(index) {
                merge_element(existing, entry, layout.element_key, binder)?;
            }
        }
        Ok(())
    }
}

fn build_element<E: Field>(
    entry: Entry<'_>,
    element_key: &str,
    binder: &mut Binder<'_>,
) -> BindResult<Option<E>> {
    match entry {
        Entry::Scalar(raw) => match E::from_scalar(raw) {
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(source)) => Err(Arc::new(BindError::ScalarFormat {
                key: element_key.to_owned(),
                path: binder.path(),
                source,
            })),
            None => binder
                .unsupported_field(element_key, E::type_name(), NodeKind::Scalar)
                .map(|()| None),
        },
        Entry::Node(child) => match E::from_node(child, binder) {
            Some(built) => built.map(Some),
            None => binder
                .unsupported_field(child.name(), E::type_name(), NodeKind::Node)
                .map(|()| None),
        },
    }
}

fn merge_element<E: Field>(
    existing: &mut E,
    entry: Entry<'_>,
    element_key: &str,
    binder: &mut Binder<'_>,
) -> BindResult<()> {
    if let Entry::Node(child) = entry
        && let Some(merged) = existing.merge_node(child, binder)
    {
        return merged;
    }
    if let Some(replacement) = build_element::<E>(entry, element_key, binder)? {
        *existing = replacement;
    }
    Ok(())
}

impl Collection for Vec<Box<dyn Element>> {
    fn bind_elements(
        &mut self,
        source: &ConfigNode,
        descriptor: &MemberDescriptor,
        binder: &mut Binder<'_>,
    ) -> BindResult<()> {
        let layout = descriptor.collection.unwrap_or_default();
        if layout.significance != NameSignificance::Type {
            return Err(invalid(
                descriptor,
                binder,
                "type-erased elements need type significance to pick a concrete type",
            ));
        }
        let Some(registry) = binder.registry() else {
            return Err(invalid(
                descriptor,
                binder,
                "no element registry is attached to the binder",
            ));
        };

        let merging = descriptor.allow_merge && !self.is_empty();
        let mut claimed = vec![false; if merging { self.len() } else { 0 }];
        let mut fresh: Vec<Box<dyn Element>> = Vec::new();

        for child in source.nodes() {
            let tag = format!("{}{}", layout.type_prefix, child.name());
            let Some(type_id) = registry.type_id(&tag) else {
                let path = source_path(binder, source, descriptor);
                binder.unresolved_element(tag, path)?;
                continue;
            };
            let index = claim(self, &claimed, |element| accepts(&**element, type_id, child));
            if let Some(index) = index {
                mark(&mut claimed, index);
                if let Some(element) = self.get_mut(index) {
                    element.bind_dyn(child, binder)?;
                }
                continue;
            }
            if let Some(mut element) = registry.construct(&tag) {
                element.bind_dyn(child, binder)?;
                if merging {
                    self.push(element);
                } else {
                    fresh.push(element);
                }
            }
        }

        if !merging {
            *self = fresh;
        }
        Ok(())
    }
}

fn accepts(element: &dyn Element, type_id: TypeId, child: &ConfigNode) -> bool {
    if element.element_type_id() != type_id {
        return false;
    }
    match element.identity_key().and_then(|key| child.value(key)) {
        Some(wanted) => element.identity() == Some(wanted),
        None => true,
    }
}

