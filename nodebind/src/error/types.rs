//! Primary error enum for binding flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::NodeKind;

/// Errors that can occur while binding a configuration node onto a target.
///
/// Structural errors ([`Self::MissingRequiredField`], [`Self::KindMismatch`])
/// and rejected scalar literals abort the enclosing bind. Unsupported field
/// types and unknown collection element tags only surface here when the
/// corresponding [`crate::DiagnosticPolicy`] is `Deny`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// A member that is not optional has no entry in the node.
    #[error("missing non-optional field '{key}' on {target} at '{path}'")]
    MissingRequiredField {
        /// Type name of the target that declares the member.
        target: &'static str,
        /// Configuration key that was looked up.
        key: String,
        /// Slash-separated node path of the owning node.
        path: String,
    },

    /// The entry under a key has a different shape than the member requires.
    #[error("'{key}' at '{path}' requires a config {expected} but found a {found}")]
    KindMismatch {
        /// Configuration key that was looked up.
        key: String,
        /// Shape declared by the member.
        expected: NodeKind,
        /// Shape offered by the node.
        found: NodeKind,
        /// Slash-separated node path of the owning node.
        path: String,
    },

    /// A registered scalar parser rejected its input.
    #[error("invalid value for '{key}' at '{path}': {source}")]
    ScalarFormat {
        /// Configuration key whose value was rejected.
        key: String,
        /// Slash-separated node path of the owning node.
        path: String,
        /// Parser failure describing the literal.
        #[source]
        source: ScalarFormatError,
    },

    /// The member's type cannot be built from the shape offered.
    #[error("'{key}' at '{path}' is a non-parsable {kind} type: {type_name}")]
    UnsupportedFieldType {
        /// Configuration key that was looked up.
        key: String,
        /// Declared type of the member.
        type_name: &'static str,
        /// Shape the node offered for the member.
        kind: NodeKind,
        /// Slash-separated node path of the owning node.
        path: String,
    },

    /// A collection element tag did not resolve to a registered type.
    #[error("no element type registered for '{tag}' at '{path}'")]
    UnresolvedElementType {
        /// Fully prefixed tag that was looked up.
        tag: String,
        /// Slash-separated node path of the collection node.
        path: String,
    },

    /// A collection member is declared in a way its container cannot honour.
    #[error("collection '{key}' at '{path}': {message}")]
    InvalidCollection {
        /// Configuration key of the collection.
        key: String,
        /// Human-readable explanation.
        message: String,
        /// Slash-separated node path of the owning node.
        path: String,
    },

    /// A lifecycle hook refused the node it was given.
    #[error("lifecycle hook on {target} failed: {message}")]
    Hook {
        /// Type name of the target whose hook failed.
        target: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// A tree could not be assembled from its source document.
    #[error("invalid configuration tree: {message}")]
    Tree {
        /// Human-readable explanation.
        message: String,
    },

    /// Binder options could not be gathered.
    #[error("failed to load binder options: {0}")]
    Options(#[from] Box<FigmentError>),

    /// Several independent binds failed.
    #[error("multiple binding errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}

/// A scalar parser rejected a literal.
///
/// # Examples
///
/// ```
/// use nodebind::ScalarFormatError;
///
/// let err = ScalarFormatError::new("1,2", "Vector3", "expected 3 components, found 2");
/// assert_eq!(
///     err.to_string(),
///     "cannot parse '1,2' as Vector3: expected 3 components, found 2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{raw}' as {type_name}: {reason}")]
pub struct ScalarFormatError {
    /// The literal as written in configuration.
    pub raw: String,
    /// Name of the value type the parser produces.
    pub type_name: &'static str,
    /// Why the literal was rejected.
    pub reason: String,
}

impl ScalarFormatError {
    /// Creates a new format error.
    #[must_use]
    pub fn new(raw: impl Into<String>, type_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            type_name,
            reason: reason.into(),
        }
    }
}
