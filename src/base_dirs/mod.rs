//! XDG base directories and layered file lookup.
//!
//! [`BaseDirectories`](xdg::BaseDirectories) resolves every base directory once from an
//! environment snapshot; [`lookup`] opens the first matching file across a layered list.
//!
//! ```rust,no_run
//! # use xdgbase::BaseDirectories;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dirs = BaseDirectories::new()?;
//!
//! let (file, path) = dirs.open_config_file(&["app", "app.conf"])?;
//! println!("using {}", path.display());
//! # drop(file);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::os::env::Getenv;

pub mod lookup;
pub mod xdg;

#[cfg(windows)]
const HOME_VARIABLE: &str = "USERPROFILE";
#[cfg(not(windows))]
const HOME_VARIABLE: &str = "HOME";

/// The user's home directory cannot be determined.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HomeDirError {
    /// The governing variable is unset or empty.
    #[error("cannot determine home directory: `${variable}` is not defined")]
    Unavailable { variable: &'static str },
}

/// Get the user's home directory from `env`.
///
/// Reads `$HOME` (`%USERPROFILE%` on Windows). An empty value counts as unset.
pub fn home(env: &impl Getenv) -> Result<PathBuf, HomeDirError> {
    env.getenv(HOME_VARIABLE)
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .ok_or(HomeDirError::Unavailable {
            variable: HOME_VARIABLE,
        })
}
