//! Engine policies and how they are gathered.
//!
//! Options are layered with `figment`: built-in defaults, then an optional
//! TOML file, then `NODEBIND_`-prefixed environment variables. The result is
//! handed to a [`Binder`](crate::Binder) explicitly; nothing is global.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::{BindResult, BindResultExt};

/// Environment prefix recognised by [`BindOptions::load`].
pub const ENV_PREFIX: &str = "NODEBIND_";

/// What the binder does with a finding it can step over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticPolicy {
    /// Record a diagnostic, log a warning and continue.
    #[default]
    Warn,
    /// Abort the bind with an error.
    Deny,
}

impl DiagnosticPolicy {
    /// Whether this policy aborts the bind.
    #[must_use]
    pub const fn is_deny(self) -> bool {
        matches!(self, Self::Deny)
    }
}

/// Policies applied by a binding session.
///
/// # Examples
///
/// ```
/// use nodebind::{BindOptions, DiagnosticPolicy};
///
/// let options = BindOptions::default();
/// assert_eq!(options.unsupported_fields, DiagnosticPolicy::Warn);
/// assert!(BindOptions::strict().unknown_elements.is_deny());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindOptions {
    /// Members whose type has no parser for the shape offered.
    pub unsupported_fields: DiagnosticPolicy,
    /// Collection children whose type tag is not registered.
    pub unknown_elements: DiagnosticPolicy,
    /// Emit a debug event for every member resolution.
    pub log_members: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            unsupported_fields: DiagnosticPolicy::Warn,
            unknown_elements: DiagnosticPolicy::Warn,
            log_members: true,
        }
    }
}

impl BindOptions {
    /// Options that turn every skippable finding into an error.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            unsupported_fields: DiagnosticPolicy::Deny,
            unknown_elements: DiagnosticPolicy::Deny,
            log_members: true,
        }
    }

    /// Builds the layered figment without extracting it.
    ///
    /// A missing file is skipped silently.
    ///
    /// # Errors
    ///
    /// Fails when a file is supplied but TOML support is compiled out.
    pub fn figment(file: Option<&Utf8Path>) -> BindResult<Figment> {
        let mut layered = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            layered = merge_file(layered, path)?;
        }
        Ok(layered.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Loads options from defaults, `file` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Options`](crate::BindError::Options) when a layer
    /// cannot be parsed or holds an invalid value.
    pub fn load(file: Option<&Utf8Path>) -> BindResult<Self> {
        Self::figment(file)?.extract().into_bind()
    }
}

#[cfg(feature = "toml")]
fn merge_file(layers: Figment, path: &Utf8Path) -> BindResult<Figment> {
    use figment::providers::{Format, Toml};
    Ok(layers.merge(Toml::file(path.as_std_path())))
}

#[cfg(not(feature = "toml"))]
fn merge_file(_layers: Figment, path: &Utf8Path) -> BindResult<Figment> {
    Err(figment::Error::from(format!(
        "cannot read '{path}': enable the 'toml' feature to load option files"
    )))
    .into_bind()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, ensure};
    use camino::Utf8PathBuf;
    use test_helpers::figment::{jail_error, with_jail, with_options_file};

    #[test]
    fn defaults_warn_and_log() -> Result<()> {
        let options = with_jail(|_| {
            BindOptions::load(None).map_err(|e| jail_error(&e))
        })?;
        ensure!(options == BindOptions::default(), "unexpected {options:?}");
        Ok(())
    }

    #[test]
    fn file_then_environment_layering() -> Result<()> {
        let contents = "unsupported_fields = \"deny\"\nlog_members = false\n";
        let options = with_options_file(contents, |jail, file| {
            jail.set_env("NODEBIND_UNKNOWN_ELEMENTS", "deny");
            jail.set_env("NODEBIND_LOG_MEMBERS", "true");
            BindOptions::load(Some(Utf8Path::new(file))).map_err(|e| jail_error(&e))
        })?;
        ensure!(options.unsupported_fields.is_deny(), "file layer applies");
        ensure!(options.unknown_elements.is_deny(), "env layer applies");
        ensure!(options.log_members, "env overrides file");
        Ok(())
    }

    #[test]
    fn invalid_policy_is_an_options_error() -> Result<()> {
        let rendered = with_jail(|jail| {
            jail.set_env("NODEBIND_UNSUPPORTED_FIELDS", "panic");
            Ok(BindOptions::load(None).map_or_else(|e| e.to_string(), |_| String::new()))
        })?;
        ensure!(
            rendered.starts_with("failed to load binder options"),
            "unexpected rendering: {rendered}"
        );
        Ok(())
    }

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let options = with_jail(|_| {
            let path = Utf8PathBuf::from("absent.toml");
            BindOptions::load(Some(&path)).map_err(|e| jail_error(&e))
        })?;
        ensure!(options == BindOptions::default(), "unexpected {options:?}");
        Ok(())
    }
}
