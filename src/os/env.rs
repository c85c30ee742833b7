//! Environment snapshots and the [`Getenv`] lookup capability.
//!
//! Nothing in this crate reads the process environment directly. Resolution always goes through
//! a [`Getenv`] implementor, usually an [`Env`] snapshot taken once with [`Env::new`].

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// Lookup of a single environmental variable.
///
/// Implemented for [`Env`] and for any `Fn(&str) -> Option<OsString>`, so tests can pass a
/// closure or a prepared [`Env`] instead of the real environment.
///
/// An empty value means the same as a missing one to every consumer in this crate.
pub trait Getenv {
    /// Get the value of `key`, or [`None`] if it is not set.
    fn getenv(&self, key: &str) -> Option<OsString>;
}

impl<F> Getenv for F
where
    F: Fn(&str) -> Option<OsString>,
{
    fn getenv(&self, key: &str) -> Option<OsString> {
        self(key)
    }
}

/// Snapshot of environmental variables, which is safe to query on Windows: its
/// environmental variables are case-insensitive.
///
/// [`Default`] is an empty environment, which resolves every base directory to its fallback.
#[derive(Debug, Clone, Default)]
pub struct Env {
    keys: HashMap<OsString, OsString>,

    normalised_keys: HashMap<OsString, OsString>,
}

impl Env {
    /// Snapshot the environment of the current process.
    pub fn new() -> Self {
        Self::new_from(std::env::vars_os().collect())
    }

    /// Create new [`Env`] using `env` as existing environmental variables.
    pub fn new_from(env: HashMap<OsString, OsString>) -> Self {
        Self {
            normalised_keys: Env::normalize_map(&env),
            keys: env,
        }
    }

    fn normalize_key(key: impl AsRef<OsStr>) -> OsString {
        key.as_ref().to_ascii_uppercase()
    }

    fn normalize_map(keys: &HashMap<OsString, OsString>) -> HashMap<OsString, OsString> {
        keys.iter()
            .map(|(key, value)| (Env::normalize_key(key), value.clone()))
            .collect()
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `None` variant indicates missing key, `Some`: existing key.
    ///
    /// # Examples
    /// ```rust
    /// use xdgbase::os::env::Env;
    ///
    /// let env = Env::from_iter([("XDG_CONFIG_HOME", "/my/cfg")]);
    /// assert_eq!(env.get_os("XDG_CONFIG_HOME"), Some("/my/cfg".as_ref()));
    /// assert_eq!(env.get_os("XDG_DATA_HOME"), None);
    /// ```
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        match self.keys.get(key) {
            Some(x) => Some(x),
            None => {
                if cfg!(target_os = "windows") {
                    self.normalised_keys
                        .get(&Env::normalize_key(key))
                        .map(|x| x.as_ref())
                } else {
                    None
                }
            }
        }
    }
}

impl Getenv for Env {
    fn getenv(&self, key: &str) -> Option<OsString> {
        self.get_os(key).map(OsStr::to_os_string)
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new_from(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
