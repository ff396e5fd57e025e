//! Helpers for tests that touch the `RESCUEGROUPS_*` environment.
//!
//! Pair every use with `#[serial(env)]`; the process environment is global.

use crate::config::{ENV_API_KEY, ENV_API_URL, ENV_TIMEOUT_SECS};

/// Restores one environment variable to its prior state on drop.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Sets `key` to `val` until the guard drops.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    /// Unsets `key` until the guard drops.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialize env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: same discipline as the constructors.
        match self.prev.take() {
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

/// Unsets every variable the default config reads.
#[must_use]
pub fn clean_env() -> [EnvGuard; 3] {
    [
        EnvGuard::remove(ENV_API_KEY),
        EnvGuard::remove(ENV_API_URL),
        EnvGuard::remove(ENV_TIMEOUT_SECS),
    ]
}
