use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard};

pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// Holds the env lock for its lifetime and restores every variable it
/// touched on drop.
#[must_use]
pub struct TestProcess {
    _lock: MutexGuard<'static, ()>,
    original_vars: HashMap<OsString, Option<OsString>>,
}

impl TestProcess {
    pub fn new() -> Self {
        Self {
            _lock: lock_env(),
            original_vars: HashMap::new(),
        }
    }

    pub fn set_var(&mut self, key: impl Into<OsString>, value: impl AsRef<OsStr>) {
        let key = key.into();
        self.remember_var(&key);
        unsafe {
            env::set_var(&key, value);
        }
    }

    pub fn remove_var(&mut self, key: impl Into<OsString>) {
        let key = key.into();
        self.remember_var(&key);
        unsafe {
            env::remove_var(&key);
        }
    }

    fn remember_var(&mut self, key: &OsStr) {
        if self.original_vars.contains_key(key) {
            return;
        }
        self.original_vars
            .insert(key.to_os_string(), env::var_os(key));
    }
}

impl Drop for TestProcess {
    fn drop(&mut self) {
        for (key, previous) in self.original_vars.drain() {
            if let Some(value) = previous {
                unsafe {
                    env::set_var(&key, value);
                }
            } else {
                unsafe {
                    env::remove_var(&key);
                }
            }
        }
    }
}
