//! Filesystem and path helpers shared by the I/O layer and the CLI.
//!
//! - [`file_status`]: regular-file / directory checks, mtime copying.

pub mod file_status;

pub use file_status::{copy_mtime, is_directory, is_reg_file};

// ── Path helpers ─────────────────────────────────────────────────────────────

/// Returns the filename component after the last `/` or `\` separator, or
/// the full string if there is none.
pub fn base_name(path: &str) -> &str {
    path.rfind(['/', '\\'])
        .map(|pos| &path[pos + 1..])
        .unwrap_or(path)
}

/// `path` with `suffix` removed from its end, if present and not the whole
/// name.
pub fn strip_suffix<'a>(path: &'a str, suffix: &str) -> Option<&'a str> {
    match path.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() && !stem.ends_with(['/', '\\']) => Some(stem),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
