#![allow(dead_code)]

use std::env;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

const MANAGED_VARS: [&str; 3] = ["GEMINI_API_KEY", "ONESIGNAL_APP_ID", "ONESIGNAL_REST_API_KEY"];

/// Holds the env lock; clears the managed variables again on drop.
pub struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_managed_vars();
    }
}

pub fn with_env<'a>(vars: impl IntoIterator<Item = (&'a str, &'a str)>) -> EnvGuard {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    clear_managed_vars();
    for (k, v) in vars {
        env::set_var(k, v);
    }
    EnvGuard { _lock: guard }
}

fn clear_managed_vars() {
    for key in MANAGED_VARS {
        env::remove_var(key);
    }
}
