//! First-match file lookup across layered directories.
//!
//! Directories are probed in order. The first one containing the requested file wins, so earlier
//! directories (the user's `*_HOME`) shadow files of the same name in later, system-wide ones.

use std::fs::File;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};

/// Capability used by [`open_first`] to open a candidate path.
///
/// Implemented by [`FsOpener`] and by any `Fn(&Path) -> io::Result<H>`, which allows running
/// the lookup against a mocked filesystem.
pub trait Opener {
    /// Handle returned on success, [`File`] for the real filesystem.
    type Handle;

    /// Open `path`.
    ///
    /// An error of kind [`io::ErrorKind::NotFound`] makes the lookup try the next directory;
    /// every other error aborts it.
    fn open(&self, path: &Path) -> io::Result<Self::Handle>;
}

impl<F, H> Opener for F
where
    F: Fn(&Path) -> io::Result<H>,
{
    type Handle = H;

    fn open(&self, path: &Path) -> io::Result<H> {
        self(path)
    }
}

/// Default [`Opener`], wrapper around [`File::open`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FsOpener;

impl Opener for FsOpener {
    type Handle = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

/// Errors returned by [`open_first`].
#[derive(Debug, Error)]
pub enum LookupError {
    /// No directory contains the requested file.
    #[error("file not found in any directory")]
    NotFound,

    /// Opening `path` failed for a reason other than its absence.
    #[error("failed to open `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LookupError {
    /// Path which caused the error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            LookupError::NotFound => None,
            LookupError::Io { path, .. } => Some(path),
        }
    }
}

impl From<LookupError> for io::Error {
    fn from(err: LookupError) -> Self {
        let kind = match &err {
            LookupError::NotFound => io::ErrorKind::NotFound,
            LookupError::Io { source, .. } => source.kind(),
        };
        io::Error::new(kind, err)
    }
}

/// `dir` joined with `components`, always staying under `dir`.
///
/// Root and prefix components are dropped, so `/app.conf` names `{dir}/app.conf`.
fn candidate<C: AsRef<Path>>(dir: &Path, components: &[C]) -> PathBuf {
    let mut path = dir.to_path_buf();
    for component in components {
        path.extend(
            component
                .as_ref()
                .components()
                .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir)),
        );
    }
    path
}

/// Open the first file named by `components` found under `dirs`.
///
/// # Returns
/// The opened handle together with its full path. [`LookupError::NotFound`] if no directory has
/// the file, [`LookupError::Io`] on the first failure which is not a missing file; remaining
/// directories are not probed in that case.
///
/// # Examples
///
/// ```rust,no_run
/// # use xdgbase::base_dirs::lookup::{open_first, FsOpener};
/// # use std::path::PathBuf;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dirs = [PathBuf::from("/home/user/.config"), PathBuf::from("/etc/xdg")];
/// let (_file, path) = open_first(&FsOpener, &["app", "app.conf"], &dirs)?;
/// println!("found {}", path.display());
/// # Ok(())
/// # }
/// ```
pub fn open_first<O, C>(
    opener: &O,
    components: &[C],
    dirs: &[PathBuf],
) -> Result<(O::Handle, PathBuf), LookupError>
where
    O: Opener + ?Sized,
    C: AsRef<Path>,
{
    for dir in dirs {
        let path = candidate(dir, components);
        trace!(path = %path.display(), "probing");
        match opener.open(&path) {
            Ok(handle) => {
                debug!(path = %path.display(), "found file");
                return Ok((handle, path));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => {
                debug!(path = %path.display(), error = %source, "lookup aborted");
                return Err(LookupError::Io { path, source });
            }
        }
    }
    debug!(dirs = dirs.len(), "file not found in any directory");
    Err(LookupError::NotFound)
}
