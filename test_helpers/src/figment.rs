//! Helpers for running option-loading code inside a `figment::Jail`.

use anyhow::{Context, Result, anyhow};

/// File name [`with_options_file`] writes into the jail.
pub const OPTIONS_FILE: &str = "nodebind.toml";

/// Runs `f` inside a [`figment::Jail`] and hands back its value.
///
/// The jail restores the working directory and environment once the closure
/// returns, whether or not it failed.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut captured: Option<T> = None;
    figment::Jail::try_with(|jail| f(jail).map(|value| captured = Some(value)))
        .map_err(|err| anyhow!("jailed test failed: {err}"))?;
    captured.context("jail closure produced no value")
}

/// Runs `f` in a jail whose working directory holds [`OPTIONS_FILE`] with
/// `contents`.
///
/// The closure receives the jail, for setting environment variables, and
/// the file name relative to the jail root.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the closure fails.
pub fn with_options_file<F, T>(contents: &str, f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail, &'static str) -> figment::error::Result<T>,
{
    with_jail(|jail| {
        jail.create_file(OPTIONS_FILE, contents)?;
        f(jail, OPTIONS_FILE)
    })
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// the jail boundary.
#[must_use]
pub fn jail_error(err: &impl ToString) -> figment::Error {
    figment::Error::from(err.to_string())
}
