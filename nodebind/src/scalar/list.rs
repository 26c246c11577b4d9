//! Delimited list literals.

use std::ops::Deref;

use super::ParseScalar;
use crate::{Field, ScalarFormatError};

/// A list of scalars separated by spaces, commas, semicolons or tabs.
///
/// # Examples
///
/// ```
/// use nodebind::{NumericList, ParseScalar};
///
/// let list = NumericList::<f32>::parse_scalar("0 1;2,\t3").expect("valid list");
/// assert_eq!(list.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericList<T>(pub Vec<T>);

impl<T> NumericList<T> {
    /// Returns the parsed elements.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Deref for NumericList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: ParseScalar> ParseScalar for NumericList<T> {
    const TYPE_NAME: &'static str = "NumericList";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        raw.split([' ', ',', ';', '\t'])
            .filter(|token| !token.is_empty())
            .map(|token| {
                T::parse_scalar(token).map_err(|e| {
                    ScalarFormatError::new(raw, Self::TYPE_NAME, format!("element {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl<T: ParseScalar> Field for NumericList<T> {
    fn type_name() -> &'static str {
        <Self as ParseScalar>::TYPE_NAME
    }

    fn from_scalar(raw: &str) -> Option<Result<Self, ScalarFormatError>> {
        Some(<Self as ParseScalar>::parse_scalar(raw))
    }
}

/// A comma-separated list of trimmed strings.
///
/// Empty segments are kept so positional lists survive round trips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringList(pub Vec<String>);

impl StringList {
    /// Returns the parsed elements.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for StringList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ParseScalar for StringList {
    const TYPE_NAME: &'static str = "StringList";

    fn parse_scalar(raw: &str) -> Result<Self, ScalarFormatError> {
        Ok(Self(raw.split(',').map(|s| s.trim().to_owned()).collect()))
    }
}

crate::scalar_field!(StringList);
