//! Container information for the `--list` flag.
//!
//! Reads only the length prefix and the file size, so listing is cheap even
//! for large containers.  Nothing is decompressed; a container whose payload
//! is corrupt still lists.
//!
//! Entry point: [`display_container_info`].

use std::fs::File;
use std::path::Path;

use crate::io::error::DecompressError;
use crate::io::file_io::read_full;
use crate::io::format::{decode_prefix, PREFIX_WIDTH};
use crate::io::prefs::notification_level;
use crate::util::{base_name, is_reg_file};

/// Metadata of a single container file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Display name (basename of the file path).
    pub file_name: String,
    /// Total container size in bytes, prefix included.
    pub container_size: u64,
    /// Original length declared by the prefix.
    pub original_size: u64,
}

impl ContainerInfo {
    /// Payload bytes after the prefix.
    pub fn payload_size(&self) -> u64 {
        self.container_size - PREFIX_WIDTH as u64
    }

    /// Container size as a percentage of the original; `None` for empty
    /// originals.
    pub fn ratio(&self) -> Option<f64> {
        if self.original_size == 0 {
            None
        } else {
            Some(self.container_size as f64 / self.original_size as f64 * 100.0)
        }
    }
}

/// Reads the prefix of the container at `path`.
pub fn read_container_info(path: impl AsRef<Path>) -> Result<ContainerInfo, DecompressError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| DecompressError::io(path, e))?;
    let container_size = file
        .metadata()
        .map_err(|e| DecompressError::io(path, e))?
        .len();
    if container_size < PREFIX_WIDTH as u64 {
        return Err(DecompressError::corrupt(format!(
            "{} bytes is shorter than the {}-byte length prefix",
            container_size, PREFIX_WIDTH
        )));
    }

    let mut header = [0u8; PREFIX_WIDTH];
    read_full(&mut file, &mut header).map_err(|e| DecompressError::io(path, e))?;
    let original_size = decode_prefix(&header).map_or(0, u64::from);

    Ok(ContainerInfo {
        file_name: base_name(&path.to_string_lossy()).to_owned(),
        container_size,
        original_size,
    })
}

// ---------------------------------------------------------------------------
// to_human
// ---------------------------------------------------------------------------

/// Formats a byte count using the largest applicable binary prefix
/// (K/M/G/T/P/E) with two decimal places, e.g. `"3.14M"`.
fn to_human(mut size: f64) -> String {
    const UNITS: &[&str] = &["", "K", "M", "G", "T", "P", "E"];
    let mut i = 0usize;
    while size >= 1024.0 && i + 1 < UNITS.len() {
        size /= 1024.0;
        i += 1;
    }
    format!("{:.2}{}", size, UNITS[i])
}

/// One formatted table row for `info`.
fn format_row(info: &ContainerInfo, exact: bool) -> String {
    let (compressed, original) = if exact {
        (info.container_size.to_string(), info.original_size.to_string())
    } else {
        (
            to_human(info.container_size as f64),
            to_human(info.original_size as f64),
        )
    };
    let ratio = match info.ratio() {
        Some(r) => format!("{:>8.2}%", r),
        None => format!("{:>9}", "-"),
    };
    format!("{:>13} {:>13} {}  {}", compressed, original, ratio, info.file_name)
}

/// Prints a container summary table for the `--list` flag.
///
/// Sizes are human-readable at display level < 3 and exact at level ≥ 3.
/// Every path is attempted; returns the number of paths that could not be
/// read as containers.
pub fn display_container_info<P: AsRef<Path>>(paths: &[P]) -> usize {
    let exact = notification_level() >= 3;
    println!(
        "{:>13} {:>13} {:>9}  {}",
        "Compressed", "Uncompressed", "Ratio", "Filename"
    );

    let mut failures = 0usize;
    for path in paths {
        let path = path.as_ref();
        if !is_reg_file(path) {
            crate::io::prefs::display_level(
                1,
                &format!("lzopack: {} is not a regular file\n", path.display()),
            );
            failures += 1;
            continue;
        }
        match read_container_info(path) {
            Ok(info) => println!("{}", format_row(&info, exact)),
            Err(e) => {
                crate::io::prefs::display_level(
                    1,
                    &format!("lzopack: {}: File format not recognized: {}\n", path.display(), e),
                );
                failures += 1;
            }
        }
    }
    failures
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
