//! Scalar parser protocol and the built-in value parsers.
//!
//! Every leaf value type the binder understands implements [`ParseScalar`],
//! a pure conversion from the raw configuration string. New value types are
//! added by implementing the trait and invoking [`scalar_field!`](crate::scalar_field)
//! for them; the binder itself never changes.
//!
//! ```
//! use nodebind::{ParseScalar, ScalarFormatError, scalar_field};
//!
//! #[derive(Debug, PartialEq)]
//! struct Kelvin(f64);
//!
//! impl ParseScalar for Kelvin {
//!     const TYPE_NAME: &'static str = "Kelvin";
//!
//!     fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
//!         let digits = raw.trim().trim_end_matches('K');
//!         digits
//!             .parse()
//!             .map(Kelvin)
//!             .map_err(|e| ScalarFormatError::new(raw, Self::TYPE_NAME, format!("{e}")))
//!     }
//! }
//!
//! scalar_field!(Kelvin);
//!
//! assert_eq!(Kelvin::parse_scalar("5778K"), Ok(Kelvin(5778.0)));
//! ```

mod color;
mod curve;
mod list;
mod numeric;
mod vector;

use std::fmt::Display;
use std::str::FromStr;

pub use color::Color;
pub use curve::{FloatCurve, Keyframe};
pub use list::{NumericList, StringList};
pub use vector::{Matrix4x4, Quaternion, QuaternionD, Vector2, Vector3, Vector3d, Vector4};

use crate::ScalarFormatError;

/// Parses a configuration string into a typed value.
///
/// Implementations are pure: they never observe or mutate anything beyond
/// the input string, and they report malformed input through
/// [`ScalarFormatError`].
pub trait ParseScalar: Sized {
    /// Human-readable name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Parses `raw` into a value.
    ///
    /// # Errors
    ///
    /// Returns a [`ScalarFormatError`] when `raw` is not a valid literal for
    /// the type.
    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError>;
}

/// Implements [`Field`](crate::Field) for types that bind from scalars only.
///
/// The generated implementation forwards scalar entries to
/// [`ParseScalar::parse_scalar`] and reports node entries as unsupported.
#[macro_export]
macro_rules! scalar_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Field for $ty {
                fn type_name() -> &'static str {
                    <$ty as $crate::ParseScalar>::TYPE_NAME
                }

                fn from_scalar(
                    raw: &str,
                ) -> ::core::option::Option<::core::result::Result<Self, $crate::ScalarFormatError>>
                {
                    ::core::option::Option::Some(<$ty as $crate::ParseScalar>::parse_scalar(raw))
                }
            }
        )+
    };
}

/// Splits a literal into components separated by commas and/or whitespace.
pub(crate) fn split_components(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Parses every component of `raw` as `T`.
pub(crate) fn parse_components<T>(
    raw: &str,
    type_name: &'static str,
) -> Result<Vec<T>, ScalarFormatError>
where
    T: FromStr,
    T::Err: Display,
{
    split_components(raw)
        .map(|token| {
            token.parse::<T>().map_err(|e| {
                ScalarFormatError::new(raw, type_name, format!("component '{token}': {e}"))
            })
        })
        .collect()
}

/// Parses exactly `N` components of `raw` as `T`.
pub(crate) fn fixed_components<T, const N: usize>(
    raw: &str,
    type_name: &'static str,
) -> Result<[T; N], ScalarFormatError>
where
    T: FromStr,
    T::Err: Display,
{
    let parsed = parse_components::<T>(raw, type_name)?;
    let count = parsed.len();
    <[T; N]>::try_from(parsed).map_err(|_| {
        ScalarFormatError::new(
            raw,
            type_name,
            format!("expected {N} components, found {count}"),
        )
    })
}
