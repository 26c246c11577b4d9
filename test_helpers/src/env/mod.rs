//! Guards for mutating environment variables in tests.
//!
//! Every mutation takes a process-wide re-entrant lock, records the prior
//! value and hands back an [`EnvVarGuard`] that restores it on drop.
//! Guards for the same key restore in LIFO order. Hold an [`EnvVarLock`]
//! when a test needs several mutations to be observed together, for
//! example while binder options are loaded from `NODEBIND_*` variables.
//!
//! # Examples
//!
//! ```
//! use nodebind_test_helpers::env;
//!
//! let _guard = env::set_var("NODEBIND_LOG_MEMBERS", "false");
//! assert_eq!(std::env::var("NODEBIND_LOG_MEMBERS").as_deref(), Ok("false"));
//! ```

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Applies `mutation` to `key` while the lock is held.
fn mutate(key: String, mutation: Mutation<'_>) -> EnvVarGuard {
    let _held = ENV_MUTEX.lock();
    let original = std::env::var_os(&key);
    apply(&key, mutation);
    EnvVarGuard { key, original }
}

#[derive(Clone, Copy)]
enum Mutation<'v> {
    Set(&'v OsStr),
    Remove,
}

fn apply(key: &str, mutation: Mutation<'_>) {
    match mutation {
        // SAFETY: every caller holds `ENV_MUTEX`.
        Mutation::Set(value) => unsafe { std::env::set_var(key, value) },
        // SAFETY: every caller holds `ENV_MUTEX`.
        Mutation::Remove => unsafe { std::env::remove_var(key) },
    }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _held = ENV_MUTEX.lock();
        match self.original.take() {
            Some(value) => apply(&self.key, Mutation::Set(&value)),
            None => apply(&self.key, Mutation::Remove),
        }
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

/// Holds the environment lock for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _held: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` while the lock is held.
    pub fn set_var(&self, key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
        set_var(key, value)
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var(&self, key: impl Into<String>) -> EnvVarGuard {
        remove_var(key)
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var(key: impl Into<String>, value: impl AsRef<OsStr>) -> EnvVarGuard {
    mutate(key.into(), Mutation::Set(value.as_ref()))
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var(key: impl Into<String>) -> EnvVarGuard {
    mutate(key.into(), Mutation::Remove)
}

/// Acquires the environment lock for the lifetime of the returned guard.
///
/// # Examples
///
/// ```
/// use nodebind_test_helpers::env;
///
/// let lock = env::lock();
/// let _unknown = lock.set_var("NODEBIND_UNKNOWN_ELEMENTS", "deny");
/// let _unsupported = lock.remove_var("NODEBIND_UNSUPPORTED_FIELDS");
/// ```
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _held: ENV_MUTEX.lock(),
    }
}
