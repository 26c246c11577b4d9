//! Targets that attach themselves to nodes owned by someone else.
//!
//! An extension can ask to be bound whenever a node named `parent` carries a
//! child node named after the extension, without the owner of `parent`
//! declaring a member for it. [`ExternalTargets::load`] walks a whole tree
//! and binds every match it finds; failures are recorded as diagnostics and
//! never stop the walk.

use tracing::debug;

use crate::{Binder, ConfigNode, Diagnostic, Element, Target};

struct Registration {
    parent: String,
    node: String,
    construct: fn() -> Box<dyn Element>,
}

fn construct<T: Target + Default + 'static>() -> Box<dyn Element> {
    Box::new(T::default())
}

/// A bound external target and where it was found.
#[derive(Debug)]
pub struct ExternalBinding {
    /// Name of the parent node that carried the target.
    pub parent: String,
    /// The bound target.
    pub target: Box<dyn Element>,
}

/// Registry of external targets keyed by parent and child node names.
///
/// # Examples
///
/// ```
/// use nodebind::{Binder, ConfigNode, ExternalTargets, Target};
///
/// #[derive(Default, Target)]
/// struct Ocean {
///     density: f64,
/// }
///
/// let mut externals = ExternalTargets::new();
/// externals.register::<Ocean>("Body");
///
/// let root = ConfigNode::new("Kopernicus").with_node(
///     ConfigNode::new("Body").with_node(ConfigNode::new("Ocean").with_value("density", "1.2")),
/// );
/// let mut binder = Binder::default();
/// let bound = externals.load(&root, &mut binder);
/// assert_eq!(bound.len(), 1);
/// ```
#[derive(Default)]
pub struct ExternalTargets {
    entries: Vec<Registration>,
}

impl ExternalTargets {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds `T` from a child named [`Target::TYPE_NAME`] of nodes named
    /// `parent`.
    pub fn register<T: Target + Default + 'static>(&mut self, parent: impl Into<String>) -> &mut Self {
        self.register_named::<T>(parent, T::TYPE_NAME)
    }

    /// Binds `T` from a child named `node` of nodes named `parent`.
    pub fn register_named<T: Target + Default + 'static>(
        &mut self,
        parent: impl Into<String>,
        node: impl Into<String>,
    ) -> &mut Self {
        self.entries.push(Registration {
            parent: parent.into(),
            node: node.into(),
            construct: construct::<T>,
        });
        self
    }

    /// Number of registrations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Binds every registered target found at `node` itself.
    pub fn load_node(&self, node: &ConfigNode, binder: &mut Binder<'_>) -> Vec<ExternalBinding> {
        let mut bound = Vec::new();
        self.collect(node, binder, &mut bound);
        bound
    }

    /// Binds every registered target found anywhere under `root`,
    /// including `root` itself, parents before children.
    pub fn load(&self, root: &ConfigNode, binder: &mut Binder<'_>) -> Vec<ExternalBinding> {
        let mut bound = Vec::new();
        self.walk(root, binder, &mut bound);
        bound
    }

    fn walk(&self, node: &ConfigNode, binder: &mut Binder<'_>, bound: &mut Vec<ExternalBinding>) {
        self.collect(node, binder, bound);
        for child in node.nodes() {
            self.walk(child, binder, bound);
        }
    }

    fn collect(&self, node: &ConfigNode, binder: &mut Binder<'_>, bound: &mut Vec<ExternalBinding>) {
        for entry in self.entries.iter().filter(|e| e.parent == node.name()) {
            let Some(source) = node.node(&entry.node) else {
                continue;
            };
            debug!(parent = %entry.parent, node = %entry.node, "binding external target");
            let mut target = (entry.construct)();
            match target.bind_dyn(source, binder) {
                Ok(()) => bound.push(ExternalBinding {
                    parent: entry.parent.clone(),
                    target,
                }),
                Err(error) => binder.record(Diagnostic::ExternalTargetFailed {
                    node: format!("{}/{}", entry.parent, entry.node),
                    error,
                }),
            }
        }
    }
}

impl std::fmt::Debug for ExternalTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}/{}", e.parent, e.node))
            .collect();
        f.debug_struct("ExternalTargets").field("entries", &pairs).finish()
    }
}
