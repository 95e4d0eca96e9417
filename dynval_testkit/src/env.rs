//! Process environment mocking
//!
//! Each helper mutates the environment for the duration of a closure and
//! restores it afterwards, even if the closure panics. All mutations are
//! serialized behind one process-wide lock; the helpers must not be nested
//! inside each other's closures.

use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::error::{EnvError, EnvResult};

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

fn validate(key: &str, val: &str) -> EnvResult<()> {
    if key.is_empty() || key.contains('=') || key.contains('\0') {
        return Err(EnvError::InvalidKey(key.to_string()));
    }
    if val.contains('\0') {
        return Err(EnvError::InvalidValue(key.to_string()));
    }
    Ok(())
}

/// Restores one variable on drop
struct RestoreVar {
    key: String,
    old: Option<OsString>,
}

impl Drop for RestoreVar {
    fn drop(&mut self) {
        match self.old.take() {
            Some(old) => env::set_var(&self.key, old),
            None => env::remove_var(&self.key),
        }
    }
}

/// Restores the whole environment on drop
struct RestoreAll {
    saved: Vec<(OsString, OsString)>,
}

impl RestoreAll {
    fn capture() -> Self {
        RestoreAll {
            saved: env::vars_os().collect(),
        }
    }
}

fn clear_env() {
    for (key, _) in env::vars_os() {
        env::remove_var(key);
    }
}

impl Drop for RestoreAll {
    fn drop(&mut self) {
        clear_env();
        for (key, val) in self.saved.drain(..) {
            env::set_var(key, val);
        }
    }
}

/// Set `key` to `val`, call `f` with the new value, then restore the old
/// value (or unset the key if it was not set).
pub fn mock_env_value<R>(key: &str, val: &str, f: impl FnOnce(&str) -> R) -> EnvResult<R> {
    validate(key, val)?;

    let _guard = env_guard();
    let _restore = RestoreVar {
        key: key.to_string(),
        old: env::var_os(key),
    };
    env::set_var(key, val);

    let current = env::var(key).unwrap_or_default();
    Ok(f(&current))
}

/// Replace the whole environment with `vars` while `f` runs.
///
/// Every existing variable is cleared first; the original environment is
/// restored afterwards.
pub fn mock_os_env<I, K, V, R>(vars: I, f: impl FnOnce() -> R) -> EnvResult<R>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let vars: Vec<(K, V)> = vars.into_iter().collect();
    for (k, v) in &vars {
        validate(k.as_ref(), v.as_ref())?;
    }

    let _guard = env_guard();
    let _restore = RestoreAll::capture();
    clear_env();
    for (k, v) in &vars {
        env::set_var(k.as_ref(), v.as_ref());
    }

    Ok(f())
}

/// Parse `KEY = value` lines.
///
/// Blank lines and lines starting with `#` or `//` are skipped; a line
/// without `=` sets an empty value. Keys and values are trimmed.
pub fn parse_env_text(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
        .map(|line| match line.split_once('=') {
            Some((key, val)) => (key.trim().to_string(), val.trim().to_string()),
            None => (line.to_string(), String::new()),
        })
        .collect()
}

/// Like [`mock_os_env`], with the variables given as text.
///
/// # Example
/// ```
/// use dynval_testkit::mock_os_env_by_text;
///
/// let debug = mock_os_env_by_text("
///     APP_ENV = dev
///     APP_DEBUG = true
/// ", || std::env::var("APP_DEBUG").unwrap()).unwrap();
/// assert_eq!(debug, "true");
/// ```
pub fn mock_os_env_by_text<R>(text: &str, f: impl FnOnce() -> R) -> EnvResult<R> {
    mock_os_env(parse_env_text(text), f)
}
