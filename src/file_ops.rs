/// Filesystem mutations shared by the rename and move commands.
///
/// Both commands boil down to "put this entry at that path, but never on top of
/// something that is already there". This module owns that operation and the
/// error type describing how it can fail.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while touching the filesystem.
#[derive(Debug)]
pub enum FilesystemError {
    /// The underlying rename syscall failed.
    RenameFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Something already lives at the destination path.
    DestinationExists {
        source: PathBuf,
        destination: PathBuf,
    },
    /// A directory listing could not be read.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for FilesystemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RenameFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} -> {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DestinationExists {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Failed to move {} -> {}: destination already exists",
                    source.display(),
                    destination.display()
                )
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to scan directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for FilesystemError {}

/// Result type for filesystem operations.
pub type FsResult<T> = Result<T, FilesystemError>;

/// Moves `source` to `destination` without overwriting.
///
/// `fs::rename` replaces existing files on Unix, so the destination is checked
/// first and an occupied destination is reported as
/// [`FilesystemError::DestinationExists`]. Parent directories of the
/// destination are never created.
///
/// # Examples
///
/// ```no_run
/// use rn::file_ops::rename_no_clobber;
/// use std::path::Path;
///
/// match rename_no_clobber(Path::new("a.mkv"), Path::new("videos/a.mkv")) {
///     Ok(()) => println!("moved"),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn rename_no_clobber(source: &Path, destination: &Path) -> FsResult<()> {
    if destination.symlink_metadata().is_ok() {
        return Err(FilesystemError::DestinationExists {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }

    fs::rename(source, destination).map_err(|e| FilesystemError::RenameFailed {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        source_error: e,
    })
}

/// Lists the names of the immediate entries of `dir`, sorted.
///
/// Hidden entries are included. Names are returned as the OS gave them, so
/// entries that are not valid UTF-8 can still be moved.
pub fn list_entry_names(dir: &Path) -> FsResult<Vec<OsString>> {
    let entries = fs::read_dir(dir).map_err(|e| FilesystemError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| FilesystemError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}
