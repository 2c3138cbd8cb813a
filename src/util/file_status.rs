//! File status helpers: regular-file and directory checks, and copying a
//! source file's modification time onto its output.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Copies the modification time of `from` onto `to`.
///
/// The access time of `to` is set to now.  Returns `Err` if `to` is not a
/// regular file or either path cannot be stat'ed.
pub fn copy_mtime(from: &Path, to: &Path) -> io::Result<()> {
    if !is_reg_file(to) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "copy_mtime: not a regular file",
        ));
    }
    let mtime = FileTime::from_last_modification_time(&fs::metadata(from)?);
    filetime::set_file_times(to, FileTime::now(), mtime)
}

/// Returns `true` if `path` refers to a regular file.
///
/// Returns `false` for directories, special files, and paths that do not
/// exist.
pub fn is_reg_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if `path` refers to a directory.
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
