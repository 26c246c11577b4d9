//! Declarative binding of hierarchical configuration nodes onto typed
//! object graphs.
//!
//! A [`ConfigNode`] tree holds named scalars and named, possibly repeated,
//! child nodes. Types derive [`Target`] to describe how their fields map onto
//! such a node; a [`Binder`] then resolves every member, parsing scalars
//! through [`ParseScalar`], recursing into nested targets, filling
//! collections, and running the two-phase [`LifecycleHooks`].
//!
//! ```
//! use nodebind::{ConfigNode, Target};
//!
//! #[derive(Debug, Default, Target)]
//! #[bind(rename_all = "camelCase")]
//! struct Properties {
//!     radius: f64,
//!     mass: f64,
//!     sphere_of_influence: Option<f64>,
//! }
//!
//! let node = ConfigNode::new("Properties")
//!     .with_value("radius", "600000")
//!     .with_value("sphereOfInfluence", "84159286");
//! let props: Properties = nodebind::create(&node)?;
//! assert_eq!(props.radius, 600_000.0);
//! assert_eq!(props.mass, 0.0);
//! assert_eq!(props.sphere_of_influence, Some(84_159_286.0));
//! # Ok::<(), std::sync::Arc<nodebind::BindError>>(())
//! ```
//!
//! The companion `nodebind_macros` crate implements `#[derive(Target)]` and
//! `#[derive(ScalarEnum)]`; both are re-exported here.

extern crate self as nodebind;

use std::sync::Arc;

mod binder;
mod cache;
mod collection;
mod descriptor;
mod driver;
mod error;
mod external;
mod field;
mod hooks;
mod options;
mod registry;
mod result_ext;
mod scalar;
mod target;
mod tree;

pub use nodebind_macros::{ScalarEnum, Target};

pub use binder::{Binder, Diagnostic, bind, create};
pub use cache::CoordinateCache;
pub use collection::Collection;
pub use descriptor::{CollectionDescriptor, MemberDescriptor, NameSignificance, Phase, SELF_KEY};
pub use driver::{LoadOutcome, load_entries};
pub use error::{AggregatedErrors, BindError, ScalarFormatError};
pub use external::{ExternalBinding, ExternalTargets};
pub use field::Field;
pub use hooks::LifecycleHooks;
pub use options::{BindOptions, DiagnosticPolicy, ENV_PREFIX};
pub use registry::{Element, TypeRegistry};
pub use result_ext::{BindResultExt, HookResultExt};
pub use scalar::{
    Color, FloatCurve, Keyframe, Matrix4x4, NumericList, ParseScalar, Quaternion, QuaternionD,
    StringList, Vector2, Vector3, Vector3d, Vector4,
};
pub use target::Target;
pub use tree::{ConfigNode, NodeKind, Presence};

/// Result type used throughout the crate.
///
/// Errors are shared so the same failure can be both returned and kept in
/// an aggregate or a diagnostic.
pub type BindResult<T> = Result<T, Arc<BindError>>;
