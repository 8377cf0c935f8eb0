//! Guard that points `CASTLIST_CONFIG_HOME` at a throwaway directory so
//! tests never touch the real user configuration.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, OnceLock};

const CONFIG_HOME_ENV: &str = "CASTLIST_CONFIG_HOME";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the environment override for the lifetime of a test and restores
/// the previous value on drop. Tests hold the guard for their whole body so
/// environment mutations stay serialized.
pub struct EnvGuard {
    previous: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn set_config_home(path: &Path) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::env::var(CONFIG_HOME_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env
        // mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: the global lock acquired in `set_config_home` is still held.
        unsafe {
            match self.previous.take() {
                Some(value) => std::env::set_var(CONFIG_HOME_ENV, value),
                None => std::env::remove_var(CONFIG_HOME_ENV),
            }
        }
    }
}
