//! The binding session.
//!
//! A [`Binder`] walks a target's members against a [`ConfigNode`], recursing
//! into nested targets and collections. It carries the options, an optional
//! element registry, the current node path for error messages, and the
//! diagnostics recorded so far. A session holds no references to the targets
//! it binds; it can be reused for many binds or dropped after one.

mod diagnostics;
mod resolve;

use std::sync::Arc;

use tracing::{trace, warn};

pub use diagnostics::Diagnostic;

use crate::{BindError, BindOptions, BindResult, ConfigNode, NodeKind, Phase, Target, TypeRegistry};

#[derive(Debug, Clone)]
struct Frame {
    target: &'static str,
    node: String,
}

/// A binding session.
///
/// # Examples
///
/// ```
/// use nodebind::{BindOptions, Binder, ConfigNode, Target};
///
/// #[derive(Debug, Default, Target)]
/// struct Properties {
///     radius: f64,
///     mass: f64,
/// }
///
/// let node = ConfigNode::new("Properties").with_value("radius", "600000");
/// let mut binder = Binder::new(BindOptions::default());
/// let props: Properties = binder.create(&node).expect("bind succeeds");
/// assert_eq!(props.radius, 600_000.0);
/// assert_eq!(props.mass, 0.0);
/// ```
#[derive(Debug, Default)]
pub struct Binder<'r> {
    options: BindOptions,
    registry: Option<&'r TypeRegistry>,
    frames: Vec<Frame>,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> Binder<'r> {
    /// Creates a session with the given options and no element registry.
    #[must_use]
    pub const fn new(options: BindOptions) -> Self {
        Self {
            options,
            registry: None,
            frames: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Attaches the registry used to resolve type-significant collections.
    #[must_use]
    pub const fn with_registry(mut self, registry: &'r TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Options in force for this session.
    #[must_use]
    pub const fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Element registry, when one is attached.
    #[must_use]
    pub const fn registry(&self) -> Option<&'r TypeRegistry> {
        self.registry
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drains the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Slash-separated names of the nodes currently being bound.
    #[must_use]
    pub fn path(&self) -> String {
        self.frames
            .iter()
            .map(|frame| frame.node.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Binds `node` onto an existing `target`.
    ///
    /// Early members resolve first, then the early hook runs, then the
    /// remaining members, then the final hook. Members absent from `node`
    /// keep their current values.
    ///
    /// # Errors
    ///
    /// Returns the first structural, scalar, nested or hook failure. Members
    /// assigned before the failure keep their new values.
    pub fn bind<T: Target>(&mut self, target: &mut T, node: &ConfigNode) -> BindResult<()> {
        self.frames.push(Frame {
            target: T::TYPE_NAME,
            node: node.name().to_owned(),
        });
        trace!(target_type = T::TYPE_NAME, path = %self.path(), "binding node");
        let outcome = self.run_phases(target, node);
        self.frames.pop();
        outcome
    }

    fn run_phases<T: Target>(&mut self, target: &mut T, node: &ConfigNode) -> BindResult<()> {
        target.resolve_members(Phase::Early, node, self)?;
        if let Some(hooks) = target.hooks() {
            hooks.on_early_resolved(node, self)?;
        }
        target.resolve_members(Phase::Normal, node, self)?;
        if let Some(hooks) = target.hooks() {
            hooks.on_fully_resolved(node, self)?;
        }
        Ok(())
    }

    /// Default-constructs a `T` and binds `node` onto it.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`Binder::bind`].
    pub fn create<T: Target + Default>(&mut self, node: &ConfigNode) -> BindResult<T> {
        let mut target = T::default();
        self.bind(&mut target, node)?;
        Ok(target)
    }

    fn current_target(&self) -> &'static str {
        self.frames.last().map_or("<root>", |frame| frame.target)
    }

    /// Applies the unsupported-field policy to a member whose type cannot be
    /// built from the shape offered.
    pub(crate) fn unsupported_field(
        &mut self,
        key: &str,
        type_name: &'static str,
        kind: NodeKind,
    ) -> BindResult<()> {
        let path = self.path();
        if self.options.unsupported_fields.is_deny() {
            return Err(Arc::new(BindError::UnsupportedFieldType {
                key: key.to_owned(),
                type_name,
                kind,
                path,
            }));
        }
        warn!(key, type_name, %kind, %path, "non-parsable member type; leaving member unset");
        self.diagnostics.push(Diagnostic::UnsupportedFieldType {
            key: key.to_owned(),
            type_name,
            kind,
            path,
        });
        Ok(())
    }

    /// Applies the unknown-element policy to an unregistered type tag.
    pub(crate) fn unresolved_element(&mut self, tag: String, path: String) -> BindResult<()> {
        if self.options.unknown_elements.is_deny() {
            return Err(Arc::new(BindError::UnresolvedElementType { tag, path }));
        }
        warn!(%tag, %path, "skipping unknown collection element type");
        self.diagnostics
            .push(Diagnostic::UnresolvedElementType { tag, path });
        Ok(())
    }

    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        warn!(%diagnostic, "binding diagnostic");
        self.diagnostics.push(diagnostic);
    }
}

/// Binds `node` onto `target` with a default session.
///
/// # Errors
///
/// See [`Binder::bind`].
pub fn bind<T: Target>(target: &mut T, node: &ConfigNode) -> BindResult<()> {
    Binder::default().bind(target, node)
}

/// Default-constructs a `T` and binds `node` onto it with a default session.
///
/// # Errors
///
/// See [`Binder::create`].
pub fn create<T: Target + Default>(node: &ConfigNode) -> BindResult<T> {
    Binder::default().create(node)
}
