//! Convenience constructors and accessors on `BindError`.

use std::sync::Arc;

use figment::Error as FigmentError;

use super::BindError;

impl BindError {
    /// Folds the failures of independent binds into one error.
    ///
    /// No failures give `None`. A single failure nobody else holds is
    /// returned unwrapped; a single shared failure, or several failures,
    /// become [`Self::Aggregate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use nodebind::BindError;
    ///
    /// assert!(BindError::try_aggregate(Vec::<BindError>::new()).is_none());
    /// let one = BindError::try_aggregate([BindError::hook("Body", "refused")]);
    /// assert!(matches!(one, Some(BindError::Hook { .. })));
    /// ```
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut failures: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        match failures.len() {
            0 => None,
            1 => failures.pop().map(|only| {
                Arc::try_unwrap(only).unwrap_or_else(|shared| {
                    Self::Aggregate(Box::new([shared].into_iter().collect()))
                })
            }),
            _ => Some(Self::Aggregate(Box::new(failures.into_iter().collect()))),
        }
    }

    /// Construct an options error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use nodebind::BindError;
    /// let e = BindError::options(figment::Error::from("boom"));
    /// assert!(matches!(e, BindError::Options(_)));
    /// ```
    #[must_use]
    pub fn options(source: FigmentError) -> Self {
        Self::Options(Box::new(source))
    }

    /// Construct a hook failure for `target`.
    ///
    /// Lifecycle hooks use this to refuse a node without inventing their own
    /// error types.
    ///
    /// # Examples
    ///
    /// ```
    /// use nodebind::BindError;
    /// let e = BindError::hook("Body", "template 'Mun' does not exist");
    /// assert_eq!(
    ///     e.to_string(),
    ///     "lifecycle hook on Body failed: template 'Mun' does not exist"
    /// );
    /// ```
    #[must_use]
    pub fn hook(target: &'static str, message: impl Into<String>) -> Self {
        Self::Hook {
            target,
            message: message.into(),
        }
    }

    /// Returns the configuration key the error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { key, .. }
            | Self::KindMismatch { key, .. }
            | Self::ScalarFormat { key, .. }
            | Self::UnsupportedFieldType { key, .. }
            | Self::InvalidCollection { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl From<FigmentError> for BindError {
    fn from(e: FigmentError) -> Self {
        Self::options(e)
    }
}
