//! Failures gathered from entries that were bound independently.

use std::error::Error;
use std::fmt;
use std::slice;
use std::sync::Arc;

use super::BindError;

/// Failures collected while loading several entries.
///
/// Each failure stays shared, so the same error can sit in the aggregate
/// and in a caller's own report.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use nodebind::{AggregatedErrors, BindError};
///
/// let failures: AggregatedErrors = [
///     BindError::hook("Body", "no template"),
///     BindError::Tree { message: "bad shape".into() },
/// ]
/// .into_iter()
/// .map(Arc::new)
/// .collect();
///
/// assert_eq!(failures.len(), 2);
/// assert_eq!(
///     failures.to_string(),
///     "- lifecycle hook on Body failed: no template\n- invalid configuration tree: bad shape"
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct AggregatedErrors {
    failures: Vec<Arc<BindError>>,
}

impl AggregatedErrors {
    /// Failures in the order they were collected.
    #[must_use]
    pub fn as_slice(&self) -> &[Arc<BindError>] {
        &self.failures
    }

    /// Iterates over the failures in collection order.
    pub fn iter(&self) -> slice::Iter<'_, Arc<BindError>> {
        self.failures.iter()
    }

    /// Number of failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether nothing failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Configuration keys named by the failures, skipping those without one.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().filter_map(|failure| failure.key())
    }
}

impl FromIterator<Arc<BindError>> for AggregatedErrors {
    fn from_iter<I: IntoIterator<Item = Arc<BindError>>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.failures.iter();
        if let Some(first) = lines.next() {
            write!(f, "- {first}")?;
        }
        for failure in lines {
            write!(f, "\n- {failure}")?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a Arc<BindError>;
    type IntoIter = slice::Iter<'a, Arc<BindError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<BindError>;
    type IntoIter = std::vec::IntoIter<Arc<BindError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}
