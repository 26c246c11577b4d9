//! Independent loading of top-level entries.
//!
//! One entry's bad configuration must not stop unrelated entries from
//! loading, so each entry is bound on its own and failures are collected
//! rather than propagated.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{BindError, BindResult, Binder, ConfigNode, Target};

/// Result of loading every entry of one kind.
#[derive(Debug)]
pub struct LoadOutcome<T> {
    /// Successfully bound entries, in document order.
    pub loaded: Vec<T>,
    /// Failures, in document order.
    pub errors: Vec<Arc<BindError>>,
}

impl<T> LoadOutcome<T> {
    /// Whether every entry loaded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the loaded entries, or every collected failure.
    ///
    /// # Errors
    ///
    /// Returns the single failure as-is, or a [`BindError::Aggregate`] when
    /// more than one entry failed.
    pub fn into_result(self) -> BindResult<Vec<T>> {
        match BindError::try_aggregate(self.errors) {
            None => Ok(self.loaded),
            Some(err) => Err(Arc::new(err)),
        }
    }
}

impl<T> Default for LoadOutcome<T> {
    fn default() -> Self {
        Self {
            loaded: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Binds every child of `root` named `entry_name` as a fresh `T`.
///
/// # Examples
///
/// ```
/// use nodebind::{Binder, ConfigNode, Target, load_entries};
///
/// #[derive(Debug, Default, Target)]
/// struct Body {
///     #[bind(required, early)]
///     name: String,
/// }
///
/// let root = ConfigNode::new("Kopernicus")
///     .with_node(ConfigNode::new("Body").with_value("name", "Kerbin"))
///     .with_node(ConfigNode::new("Body"))
///     .with_node(ConfigNode::new("Body").with_value("name", "Mun"));
///
/// let outcome = load_entries::<Body>(&mut Binder::default(), &root, "Body");
/// assert_eq!(outcome.loaded.len(), 2);
/// assert_eq!(outcome.errors.len(), 1);
/// ```
pub fn load_entries<T: Target + Default>(
    binder: &mut Binder<'_>,
    root: &ConfigNode,
    entry_name: &str,
) -> LoadOutcome<T> {
    let mut outcome = LoadOutcome::default();
    for (index, entry) in root.nodes_named(entry_name).enumerate() {
        match binder.create::<T>(entry) {
            Ok(target) => outcome.loaded.push(target),
            Err(error) => {
                warn!(entry = entry_name, index, %error, "skipping entry that failed to bind");
                outcome.errors.push(error);
            }
        }
    }
    info!(
        entry = entry_name,
        loaded = outcome.loaded.len(),
        failed = outcome.errors.len(),
        "finished loading entries"
    );
    outcome
}
