//! Filesystem removal with "remove if present" semantics.

use std::fs;
use std::io;
use std::path::Path;

/// Check presence without following a final symlink, so dangling links count.
pub(crate) fn is_present(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Remove a file, symlink or directory tree.
///
/// Returns `Ok(false)` when nothing was there. Directories are removed
/// recursively; symlinks are removed themselves and never followed.
pub(crate) fn remove_entry(path: &Path) -> io::Result<bool> {
    let metadata = match path.symlink_metadata() {
        Ok(metadata) => metadata,
        Err(e) if is_absent(&e) => return Ok(false),
        Err(e) => return Err(e),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => Ok(true),
        // Lost a race with another remover; the post-condition holds.
        Err(e) if is_absent(&e) => Ok(false),
        Err(e) => Err(e),
    }
}

/// A missing path, or a path whose parent is not a directory, is absent.
fn is_absent(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
