//! Two-phase lifecycle notifications delivered to targets during a bind.
//!
//! A target opts in with `#[bind(hooks)]` and implements
//! [`LifecycleHooks`]. For every bind the sequence is fixed:
//!
//! 1. members marked `early` are resolved;
//! 2. [`LifecycleHooks::on_early_resolved`] runs;
//! 3. every remaining member is resolved;
//! 4. [`LifecycleHooks::on_fully_resolved`] runs.
//!
//! Either hook may refuse the node by returning an error, which aborts the
//! bind like a structural error.
//!
//! # Examples
//!
//! ```
//! use nodebind::{BindResult, Binder, ConfigNode, LifecycleHooks, Target};
//!
//! #[derive(Default, Target)]
//! #[bind(hooks)]
//! struct Body {
//!     #[bind(required, early)]
//!     name: String,
//!     #[bind(skip)]
//!     template_seen: bool,
//! }
//!
//! impl LifecycleHooks for Body {
//!     fn on_early_resolved(&mut self, _node: &ConfigNode, _binder: &mut Binder<'_>) -> BindResult<()> {
//!         // `name` is already bound here.
//!         self.template_seen = !self.name.is_empty();
//!         Ok(())
//!     }
//! }
//!
//! let node = ConfigNode::new("Body").with_value("name", "Kerbin");
//! let body: Body = nodebind::create(&node).expect("bind succeeds");
//! assert!(body.template_seen);
//! ```

use crate::{BindResult, Binder, ConfigNode};

/// Callbacks invoked around the two member resolution phases.
pub trait LifecycleHooks {
    /// Runs after early members are resolved and before the rest.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the bind.
    fn on_early_resolved(&mut self, _node: &ConfigNode, _binder: &mut Binder<'_>) -> BindResult<()> {
        Ok(())
    }

    /// Runs after every member is resolved.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the bind.
    fn on_fully_resolved(&mut self, _node: &ConfigNode, _binder: &mut Binder<'_>) -> BindResult<()> {
        Ok(())
    }
}
