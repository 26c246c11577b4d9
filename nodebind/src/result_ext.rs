//! Extensions for mapping errors to `BindResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(BindError::…(e)))`
//! patterns in lifecycle hooks and adapter code.
//!
//! # Examples
//!
//! ```
//! use nodebind::{BindResult, BindResultExt};
//!
//! fn options() -> BindResult<figment::value::Dict> {
//!     // figment::Error implements Into<BindError>
//!     figment::Figment::new().extract().into_bind()
//! }
//! ```

use std::fmt::Display;
use std::sync::Arc;

use crate::{BindError, BindResult};

/// Generic extension for mapping any `Result<T, E>` with `E: Into<BindError>`
/// into a `BindResult<T>`.
pub trait BindResultExt<T, E> {
    /// Convert `Result<T, E>` into `BindResult<T>` using `Into<BindError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<BindError>`.
    fn into_bind(self) -> BindResult<T>;
}

impl<T, E> BindResultExt<T, E> for Result<T, E>
where
    E: Into<BindError>,
{
    fn into_bind(self) -> BindResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension for lifecycle hooks that surface foreign errors as
/// [`BindError::Hook`].
pub trait HookResultExt<T> {
    /// Convert any displayable error into a hook failure for `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError::Hook`] carrying the rendered error when the
    /// input is `Err`.
    fn hook_err(self, target: &'static str) -> BindResult<T>;
}

impl<T, E: Display> HookResultExt<T> for Result<T, E> {
    fn hook_err(self, target: &'static str) -> BindResult<T> {
        self.map_err(|e| Arc::new(BindError::hook(target, e.to_string())))
    }
}
