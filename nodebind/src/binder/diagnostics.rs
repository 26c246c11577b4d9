//! Non-fatal findings recorded during a binding session.

use std::fmt;
use std::sync::Arc;

use crate::{BindError, NodeKind};

/// A non-fatal issue noticed while binding.
///
/// Every diagnostic is also emitted as a `tracing` warning when it is
/// recorded.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Diagnostic {
    /// A member's declared type cannot be built from the entry it was given.
    UnsupportedFieldType {
        /// Configuration key of the member.
        key: String,
        /// Declared type of the member.
        type_name: &'static str,
        /// Shape the node offered.
        kind: NodeKind,
        /// Slash-separated node path of the owning node.
        path: String,
    },
    /// A collection child named a type tag absent from the registry.
    UnresolvedElementType {
        /// Fully prefixed tag that was looked up.
        tag: String,
        /// Slash-separated node path of the collection node.
        path: String,
    },
    /// An external target failed to bind and was skipped.
    ExternalTargetFailed {
        /// Name of the node that carried the external target.
        node: String,
        /// Failure reported by the binder.
        error: Arc<BindError>,
    },
}

impl Diagnostic {
    /// Configuration key or tag the diagnostic refers to.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::UnsupportedFieldType { key, .. } => key,
            Self::UnresolvedElementType { tag, .. } => tag,
            Self::ExternalTargetFailed { node, .. } => node,
        }
    }

    /// The underlying failure, for diagnostics that wrap one.
    #[must_use]
    pub const fn error(&self) -> Option<&Arc<BindError>> {
        match self {
            Self::ExternalTargetFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFieldType {
                key,
                type_name,
                kind,
                path,
            } => write!(
                f,
                "'{key}' at '{path}' is a non-parsable {kind} type: {type_name}"
            ),
            Self::UnresolvedElementType { tag, path } => {
                write!(f, "skipping unknown element type '{tag}' at '{path}'")
            }
            Self::ExternalTargetFailed { node, error } => {
                write!(f, "external target in '{node}' failed: {error}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_unsupported_field() {
        let d = Diagnostic::UnsupportedFieldType {
            key: "shader".into(),
            type_name: "Shader",
            kind: NodeKind::Scalar,
            path: "Body/Ocean".into(),
        };
        assert_eq!(
            d.to_string(),
            "'shader' at 'Body/Ocean' is a non-parsable scalar type: Shader"
        );
        assert_eq!(d.subject(), "shader");
    }
}
