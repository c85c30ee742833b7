//! XDG Base Directory Specification support.
//!
//! Resolves the base directories from override variables with fallbacks under the user's home.
//! See <https://specifications.freedesktop.org/basedir-spec/latest/>.
//!
//! The system-wide fallbacks (`/etc/xdg`, `/usr/local/share`, `/usr/share`) are POSIX paths and
//! are used unchanged on every platform.

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::base_dirs::lookup::{FsOpener, LookupError, Opener, open_first};
use crate::base_dirs::{HomeDirError, home};
use crate::os::env::{Env, Getenv};

const DEFAULT_CONFIG_DIRS: &[&str] = &["/etc/xdg"];
const DEFAULT_DATA_DIRS: &[&str] = &["/usr/local/share", "/usr/share"];

/// Resolved XDG base directories.
///
/// Built once from an environment snapshot and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseDirectories {
    config_home: PathBuf,
    config_dirs: Vec<PathBuf>,
    data_home: PathBuf,
    data_dirs: Vec<PathBuf>,
    cache_home: PathBuf,
    state_home: PathBuf,
    runtime_dir: Option<PathBuf>,
}

/// Value of `key`, unless it is missing or empty.
fn non_empty(env: &impl Getenv, key: &str) -> Option<OsString> {
    env.getenv(key).filter(|value| !value.is_empty())
}

fn home_or(env: &impl Getenv, key: &str, default: impl FnOnce() -> PathBuf) -> PathBuf {
    non_empty(env, key)
        .map(PathBuf::from)
        .unwrap_or_else(default)
}

/// `home` followed by the entries of `key`, or by `defaults` if `key` is missing or empty.
fn layered(env: &impl Getenv, key: &str, home: &Path, defaults: &[&str]) -> Vec<PathBuf> {
    let mut dirs = vec![home.to_path_buf()];
    match non_empty(env, key) {
        Some(value) => dirs.extend(std::env::split_paths(&value)),
        None => dirs.extend(defaults.iter().map(PathBuf::from)),
    }
    dirs
}

impl BaseDirectories {
    /// Resolve base directories from the environment of the current process.
    ///
    /// # Returns
    /// [`HomeDirError`] if the home directory cannot be determined, see [`home`].
    pub fn new() -> Result<Self, HomeDirError> {
        let env = Env::new();
        let home = home(&env)?;
        Ok(Self::from_env(home, &env))
    }

    /// Resolve base directories using `home_dir` as the user's home and `env` for overrides.
    ///
    /// Does not touch the filesystem.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::path::Path;
    /// use xdgbase::BaseDirectories;
    /// use xdgbase::os::env::Env;
    ///
    /// let env = Env::from_iter([("XDG_CONFIG_DIRS", "/config/dir/1:/config/dir/2")]);
    /// let dirs = BaseDirectories::from_env("/home/user", &env);
    /// assert_eq!(dirs.config_home(), Path::new("/home/user/.config"));
    /// assert_eq!(dirs.config_dirs()[0], Path::new("/home/user/.config"));
    /// # #[cfg(unix)]
    /// assert_eq!(dirs.config_dirs()[2], Path::new("/config/dir/2"));
    /// assert_eq!(dirs.runtime_dir(), None);
    /// ```
    pub fn from_env(home_dir: impl Into<PathBuf>, env: &impl Getenv) -> Self {
        let home_dir = home_dir.into();

        let config_home = home_or(env, "XDG_CONFIG_HOME", || home_dir.join(".config"));
        let config_dirs = layered(env, "XDG_CONFIG_DIRS", &config_home, DEFAULT_CONFIG_DIRS);

        let data_home = home_or(env, "XDG_DATA_HOME", || {
            home_dir.join(".local").join("share")
        });
        let data_dirs = layered(env, "XDG_DATA_DIRS", &data_home, DEFAULT_DATA_DIRS);

        let cache_home = home_or(env, "XDG_CACHE_HOME", || home_dir.join(".cache"));
        let state_home = home_or(env, "XDG_STATE_HOME", || {
            home_dir.join(".local").join("state")
        });
        let runtime_dir = non_empty(env, "XDG_RUNTIME_DIR").map(PathBuf::from);

        Self {
            config_home,
            config_dirs,
            data_home,
            data_dirs,
            cache_home,
            state_home,
            runtime_dir,
        }
    }

    /// `$XDG_CONFIG_HOME`, or `~/.config`.
    pub fn config_home(&self) -> &Path {
        &self.config_home
    }

    /// [`config_home`](Self::config_home) followed by `$XDG_CONFIG_DIRS`, or by `/etc/xdg`.
    pub fn config_dirs(&self) -> &[PathBuf] {
        &self.config_dirs
    }

    /// `$XDG_DATA_HOME`, or `~/.local/share`.
    pub fn data_home(&self) -> &Path {
        &self.data_home
    }

    /// [`data_home`](Self::data_home) followed by `$XDG_DATA_DIRS`, or by `/usr/local/share` and
    /// `/usr/share`.
    pub fn data_dirs(&self) -> &[PathBuf] {
        &self.data_dirs
    }

    /// `$XDG_CACHE_HOME`, or `~/.cache`.
    pub fn cache_home(&self) -> &Path {
        &self.cache_home
    }

    /// `$XDG_STATE_HOME`, or `~/.local/state`.
    pub fn state_home(&self) -> &Path {
        &self.state_home
    }

    /// `$XDG_RUNTIME_DIR`. There is no fallback, so [`None`] if it is unset or empty.
    pub fn runtime_dir(&self) -> Option<&Path> {
        self.runtime_dir.as_deref()
    }

    /// Open the first configuration file named by `components` in
    /// [`config_dirs`](Self::config_dirs).
    ///
    /// See [`open_first`] for the lookup rules.
    pub fn open_config_file<C: AsRef<Path>>(
        &self,
        components: &[C],
    ) -> Result<(File, PathBuf), LookupError> {
        self.open_config_file_with(&FsOpener, components)
    }

    /// Like [`open_config_file`](Self::open_config_file), opening candidates with `opener`.
    pub fn open_config_file_with<O, C>(
        &self,
        opener: &O,
        components: &[C],
    ) -> Result<(O::Handle, PathBuf), LookupError>
    where
        O: Opener + ?Sized,
        C: AsRef<Path>,
    {
        open_first(opener, components, &self.config_dirs)
    }

    /// Open the first data file named by `components` in [`data_dirs`](Self::data_dirs).
    ///
    /// See [`open_first`] for the lookup rules.
    pub fn open_data_file<C: AsRef<Path>>(
        &self,
        components: &[C],
    ) -> Result<(File, PathBuf), LookupError> {
        self.open_data_file_with(&FsOpener, components)
    }

    /// Like [`open_data_file`](Self::open_data_file), opening candidates with `opener`.
    pub fn open_data_file_with<O, C>(
        &self,
        opener: &O,
        components: &[C],
    ) -> Result<(O::Handle, PathBuf), LookupError>
    where
        O: Opener + ?Sized,
        C: AsRef<Path>,
    {
        open_first(opener, components, &self.data_dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_none, assert_ok, assert_some_eq};

    const HOME: &str = "/home/user";

    fn paths(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    fn resolve(vars: &[(&str, &str)]) -> BaseDirectories {
        BaseDirectories::from_env(HOME, &Env::from_iter(vars.iter().copied()))
    }

    fn defaults() -> BaseDirectories {
        BaseDirectories {
            config_home: PathBuf::from("/home/user/.config"),
            config_dirs: paths(&["/home/user/.config", "/etc/xdg"]),
            data_home: PathBuf::from("/home/user/.local/share"),
            data_dirs: paths(&["/home/user/.local/share", "/usr/local/share", "/usr/share"]),
            cache_home: PathBuf::from("/home/user/.cache"),
            state_home: PathBuf::from("/home/user/.local/state"),
            runtime_dir: None,
        }
    }

    #[test]
    fn empty_environment() {
        let dirs = resolve(&[]);
        assert_eq!(dirs, defaults());
        assert_none!(dirs.runtime_dir());
    }

    #[test]
    fn config_home() {
        let dirs = resolve(&[("XDG_CONFIG_HOME", "/my/user/config")]);
        let expected = BaseDirectories {
            config_home: PathBuf::from("/my/user/config"),
            config_dirs: paths(&["/my/user/config", "/etc/xdg"]),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[test]
    fn data_home() {
        let dirs = resolve(&[("XDG_DATA_HOME", "/my/user/data")]);
        let expected = BaseDirectories {
            data_home: PathBuf::from("/my/user/data"),
            data_dirs: paths(&["/my/user/data", "/usr/local/share", "/usr/share"]),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[test]
    fn cache_home() {
        let dirs = resolve(&[("XDG_CACHE_HOME", "/my/user/cache")]);
        let expected = BaseDirectories {
            cache_home: PathBuf::from("/my/user/cache"),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[test]
    fn state_home() {
        let dirs = resolve(&[("XDG_STATE_HOME", "/my/user/state")]);
        let expected = BaseDirectories {
            state_home: PathBuf::from("/my/user/state"),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[test]
    fn runtime_dir() {
        let dirs = resolve(&[("XDG_RUNTIME_DIR", "/run/user/1000")]);
        assert_some_eq!(dirs.runtime_dir(), Path::new("/run/user/1000"));
        let expected = BaseDirectories {
            runtime_dir: Some(PathBuf::from("/run/user/1000")),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[cfg(unix)]
    #[test]
    fn config_dirs() {
        let dirs = resolve(&[("XDG_CONFIG_DIRS", "/config/dir/1:/config/dir/2")]);
        let expected = BaseDirectories {
            config_dirs: paths(&["/home/user/.config", "/config/dir/1", "/config/dir/2"]),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[cfg(unix)]
    #[test]
    fn data_dirs() {
        let dirs = resolve(&[("XDG_DATA_DIRS", "/data/dir/1:/data/dir/2:/data/dir/3")]);
        let expected = BaseDirectories {
            data_dirs: paths(&[
                "/home/user/.local/share",
                "/data/dir/1",
                "/data/dir/2",
                "/data/dir/3",
            ]),
            ..defaults()
        };
        assert_eq!(dirs, expected);
    }

    #[cfg(unix)]
    #[test]
    fn dirs_are_not_deduplicated() {
        let dirs = resolve(&[
            ("XDG_CONFIG_HOME", "/etc/xdg"),
            ("XDG_CONFIG_DIRS", "/etc/xdg:/opt/xdg:/etc/xdg"),
        ]);
        assert_eq!(
            dirs.config_dirs(),
            paths(&["/etc/xdg", "/etc/xdg", "/opt/xdg", "/etc/xdg"])
        );
    }

    #[cfg(unix)]
    #[test]
    fn all_overrides() {
        let dirs = resolve(&[
            ("XDG_CONFIG_HOME", "/my/user/config"),
            ("XDG_CONFIG_DIRS", "/config/dir/1:/config/dir/2"),
            ("XDG_DATA_HOME", "/my/user/data"),
            ("XDG_DATA_DIRS", "/data/dir/1:/data/dir/2"),
            ("XDG_CACHE_HOME", "/my/user/cache"),
            ("XDG_STATE_HOME", "/my/user/state"),
            ("XDG_RUNTIME_DIR", "/my/user/runtime"),
        ]);
        let expected = BaseDirectories {
            config_home: PathBuf::from("/my/user/config"),
            config_dirs: paths(&["/my/user/config", "/config/dir/1", "/config/dir/2"]),
            data_home: PathBuf::from("/my/user/data"),
            data_dirs: paths(&["/my/user/data", "/data/dir/1", "/data/dir/2"]),
            cache_home: PathBuf::from("/my/user/cache"),
            state_home: PathBuf::from("/my/user/state"),
            runtime_dir: Some(PathBuf::from("/my/user/runtime")),
        };
        assert_eq!(dirs, expected);
    }

    #[test]
    fn empty_overrides_are_unset() {
        let dirs = resolve(&[
            ("XDG_CONFIG_HOME", ""),
            ("XDG_CONFIG_DIRS", ""),
            ("XDG_DATA_HOME", ""),
            ("XDG_DATA_DIRS", ""),
            ("XDG_CACHE_HOME", ""),
            ("XDG_STATE_HOME", ""),
            ("XDG_RUNTIME_DIR", ""),
        ]);
        assert_eq!(dirs, defaults());
    }

    #[test]
    fn home_entry_is_always_first() {
        let cases: &[&[(&str, &str)]] = &[
            &[],
            &[("XDG_CONFIG_HOME", "/my/cfg")],
            &[("XDG_DATA_DIRS", "/only/data")],
            &[("XDG_DATA_HOME", "/my/data"), ("XDG_CONFIG_DIRS", "/only/cfg")],
        ];
        for vars in cases {
            let dirs = resolve(vars);
            assert_eq!(dirs.config_dirs()[0], dirs.config_home());
            assert_eq!(dirs.data_dirs()[0], dirs.data_home());
        }
    }

    #[test]
    fn process_environment() {
        let env = Env::new();
        match home(&env) {
            Ok(home) => assert_eq!(
                assert_ok!(BaseDirectories::new()),
                BaseDirectories::from_env(home, &env)
            ),
            Err(err) => assert_eq!(assert_err!(BaseDirectories::new()), err),
        }
    }

    #[test]
    fn closure_environment() {
        let getenv = |key: &str| (key == "XDG_CACHE_HOME").then(|| OsString::from("/tmp/cache"));
        let dirs = BaseDirectories::from_env(HOME, &getenv);
        assert_eq!(dirs.cache_home(), Path::new("/tmp/cache"));
        assert_eq!(dirs.config_home(), Path::new("/home/user/.config"));
    }
}
