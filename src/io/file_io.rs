//! File I/O primitives for the container pipelines.
//!
//! The pipelines never touch the filesystem directly; they go through the
//! [`FileIo`] trait so that tests can inject open, read and write failures.
//! [`StdFileIo`] is the real implementation:
//!
//! - [`open_src_file`] resolves a path to a buffered reader, rejecting
//!   directories.
//! - [`write_dst_file`] creates (or truncates) the destination, writes every
//!   part in order and closes it before returning.  With `Prefs::atomic` the
//!   bytes go to a temporary file in the destination's directory which is then
//!   renamed over the destination.
//!
//! Verbosity-gated diagnostics go to stderr through the global
//! [`DISPLAY_LEVEL`](crate::io::prefs::DISPLAY_LEVEL).

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::io::prefs::{display_level, Prefs};
use crate::util::{copy_mtime, is_directory};

// ---------------------------------------------------------------------------
// Collaborator trait
// ---------------------------------------------------------------------------

/// Filesystem access used by the container pipelines.
pub trait FileIo: Send + Sync {
    /// Size in bytes of the file at `path`.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Open `path` for sequential reading.
    fn open_read<'a>(&'a self, path: &Path) -> io::Result<Box<dyn Read + 'a>>;

    /// Create `path` and write `parts` into it back to back.  The file is
    /// closed before this returns, whether or not the write succeeded.
    fn write_file(&self, path: &Path, parts: &[&[u8]], prefs: &Prefs) -> io::Result<()>;

    /// Copy the modification time of `from` onto `to`.
    fn copy_mtime(&self, from: &Path, to: &Path) -> io::Result<()> {
        copy_mtime(from, to)
    }
}

/// [`FileIo`] over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileIo;

impl FileIo for StdFileIo {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        let meta = fs::metadata(path)?;
        if meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "is a directory",
            ));
        }
        Ok(meta.len())
    }

    fn open_read<'a>(&'a self, path: &Path) -> io::Result<Box<dyn Read + 'a>> {
        open_src_file(path)
    }

    fn write_file(&self, path: &Path, parts: &[&[u8]], prefs: &Prefs) -> io::Result<()> {
        write_dst_file(path, parts, prefs)
    }
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source file for reading, returning a boxed [`Read`].
///
/// A directory yields an [`io::ErrorKind::InvalidInput`] error.
pub fn open_src_file(path: &Path) -> io::Result<Box<dyn Read>> {
    if is_directory(path) {
        display_level(1, &format!("lzopack: {} is a directory -- ignored\n", path.display()));
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "is a directory",
        ));
    }

    let f = File::open(path)?;
    Ok(Box::new(BufReader::new(f)))
}

/// Fill `buf` completely from `reader`.
///
/// A source that ends early yields [`io::ErrorKind::UnexpectedEof`] with the
/// number of bytes actually obtained.
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<()> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("short read: got {} of {} bytes", filled, buf.len()),
                ))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// Writes `parts` to `path`, honouring the overwrite and atomic-write
/// policies in `prefs`.
///
/// With `prefs.overwrite == false` an existing destination is refused with
/// [`io::ErrorKind::AlreadyExists`].
pub fn write_dst_file(path: &Path, parts: &[&[u8]], prefs: &Prefs) -> io::Result<()> {
    if !prefs.overwrite && path.exists() {
        display_level(1, &format!("{} already exists; not overwritten  \n", path.display()));
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "already exists; not overwritten",
        ));
    }

    if prefs.atomic {
        return write_atomic(path, parts, prefs.overwrite);
    }

    let mut f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    for part in parts {
        f.write_all(part)?;
    }
    f.flush()
}

/// Temp file in the destination directory, then rename over `path`.  On any
/// failure the temp file is removed and `path` is left as it was.
fn write_atomic(path: &Path, parts: &[&[u8]], overwrite: bool) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    for part in parts {
        tmp.write_all(part)?;
    }
    tmp.as_file().sync_all()?;

    display_level(4, &format!("renaming {} -> {}\n", tmp.path().display(), path.display()));
    let persisted = if overwrite {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.map(|_| ()).map_err(|e| e.error)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
