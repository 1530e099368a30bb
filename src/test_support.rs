// src/test_support.rs
// ============================================================================
// Module: Test Support
// Description: Shared helpers for unit tests that mutate process state.
// Purpose: Serialize env-var mutation across test modules with restore guards.
// Dependencies: std
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only helpers favor direct unwrap/expect for clarity."
)]

use std::sync::Mutex;
use std::sync::MutexGuard;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Acquires the process-wide environment mutation lock.
pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub mod env_mut {
    #![allow(unsafe_code, reason = "Tests mutate process env vars in a controlled scope.")]

    /// Sets an environment variable for the current process.
    pub fn set_var(key: &str, value: &str) {
        // SAFETY: Tests serialize environment mutation via the shared lock.
        unsafe {
            std::env::set_var(key, value);
        }
    }

    /// Removes an environment variable from the current process.
    pub fn remove_var(key: &str) {
        // SAFETY: Tests serialize environment mutation via the shared lock.
        unsafe {
            std::env::remove_var(key);
        }
    }
}

/// Restores a set of environment variables when dropped.
pub struct EnvGuard {
    entries: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    /// Snapshots and clears the named variables.
    pub fn new(names: &[&'static str]) -> Self {
        let entries = names.iter().map(|name| (*name, std::env::var(*name).ok())).collect();
        for name in names {
            env_mut::remove_var(name);
        }
        Self {
            entries,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, value) in self.entries.drain(..) {
            match value {
                Some(value) => env_mut::set_var(name, &value),
                None => env_mut::remove_var(name),
            }
        }
    }
}
