//! Closed, host-populated mapping from configuration tags to element types.
//!
//! Type-significant collections name each child's concrete type in
//! configuration. The host registers every constructible element type up
//! front; tags that are not registered are skipped by the collection binder.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::{BindResult, Binder, ConfigNode, Target};

/// A type-erased collection element.
///
/// Implemented for every [`Target`] that is also `Default`.
pub trait Element: Any {
    /// The element's [`Target::TYPE_NAME`].
    fn type_tag(&self) -> &'static str;

    /// Instance name used to match elements across merges.
    fn identity(&self) -> Option<&str>;

    /// Key under which configuration nodes carry the instance name.
    fn identity_key(&self) -> Option<&'static str>;

    /// Binds `node` onto the element.
    ///
    /// # Errors
    ///
    /// See [`Binder::bind`].
    fn bind_dyn(&mut self, node: &ConfigNode, binder: &mut Binder<'_>) -> BindResult<()>;

    /// Upcast for downcasting by reference.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting by mutable reference.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Target + Default + 'static> Element for T {
    fn type_tag(&self) -> &'static str {
        <T as Target>::TYPE_NAME
    }

    fn identity(&self) -> Option<&str> {
        Target::identity(self)
    }

    fn identity_key(&self) -> Option<&'static str> {
        <T as Target>::identity_key()
    }

    fn bind_dyn(&mut self, node: &ConfigNode, binder: &mut Binder<'_>) -> BindResult<()> {
        binder.bind(self, node)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl dyn Element {
    /// Runtime type of the concrete element.
    #[must_use]
    pub fn element_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    /// Whether the element is a `T`.
    #[must_use]
    pub fn is<T: Element>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrows the element as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Mutably borrows the element as a `T`.
    pub fn downcast_mut<T: Element>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

impl fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("type", &self.type_tag())
            .field("identity", &self.identity())
            .finish()
    }
}

#[derive(Clone, Copy)]
struct Registration {
    type_id: TypeId,
    construct: fn() -> Box<dyn Element>,
}

fn construct<T: Target + Default + 'static>() -> Box<dyn Element> {
    Box::new(T::default())
}

/// Mapping from configuration tags to element constructors.
///
/// # Examples
///
/// ```
/// use nodebind::{Target, TypeRegistry};
///
/// #[derive(Default, Target)]
/// struct VertexHeightNoise {
///     deformity: f64,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry
///     .register::<VertexHeightNoise>()
///     .register_as::<VertexHeightNoise>("Noise");
/// assert!(registry.contains("VertexHeightNoise"));
/// assert!(registry.construct("Noise").is_some());
/// assert!(registry.construct("Unknown").is_none());
/// ```
#[derive(Default, Clone)]
pub struct TypeRegistry {
    entries: HashMap<String, Registration>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under its [`Target::TYPE_NAME`].
    pub fn register<T: Target + Default + 'static>(&mut self) -> &mut Self {
        self.register_as::<T>(T::TYPE_NAME)
    }

    /// Registers `T` under an explicit tag, replacing any earlier entry.
    pub fn register_as<T: Target + Default + 'static>(&mut self, tag: impl Into<String>) -> &mut Self {
        self.entries.insert(
            tag.into(),
            Registration {
                type_id: TypeId::of::<T>(),
                construct: construct::<T>,
            },
        );
        self
    }

    /// Whether `tag` is registered.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Constructs a default instance of the type registered under `tag`.
    #[must_use]
    pub fn construct(&self, tag: &str) -> Option<Box<dyn Element>> {
        self.entries.get(tag).map(|entry| (entry.construct)())
    }

    /// Runtime type registered under `tag`.
    #[must_use]
    pub fn type_id(&self, tag: &str) -> Option<TypeId> {
        self.entries.get(tag).map(|entry| entry.type_id)
    }

    /// Number of registered tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("TypeRegistry").field("tags", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Target;

    #[derive(Debug, Default, PartialEq, Target)]
    #[bind(crate = "crate")]
    struct Flatten {
        level: f64,
    }

    #[derive(Debug, Default, PartialEq, Target)]
    #[bind(crate = "crate")]
    struct Smooth {
        amount: f64,
    }

    #[test]
    fn constructs_registered_types() {
        let mut registry = TypeRegistry::new();
        registry.register::<Flatten>().register_as::<Smooth>("Blur");
        let built = registry.construct("Flatten").expect("registered");
        assert!(built.is::<Flatten>());
        assert_eq!(built.type_tag(), "Flatten");
        assert_eq!(registry.type_id("Blur"), Some(TypeId::of::<Smooth>()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn downcasts_through_the_element_trait() {
        let mut element: Box<dyn Element> = Box::new(Flatten { level: 2.0 });
        assert_eq!(element.element_type_id(), TypeId::of::<Flatten>());
        assert!(element.downcast_ref::<Smooth>().is_none());
        element
            .downcast_mut::<Flatten>()
            .expect("is a Flatten")
            .level = 3.0;
        assert_eq!(element.downcast_ref::<Flatten>(), Some(&Flatten { level: 3.0 }));
    }

    #[test]
    fn debug_lists_sorted_tags() {
        let mut registry = TypeRegistry::new();
        registry.register::<Smooth>().register::<Flatten>();
        assert_eq!(
            format!("{registry:?}"),
            "TypeRegistry { tags: [\"Flatten\", \"Smooth\"] }"
        );
    }
}
