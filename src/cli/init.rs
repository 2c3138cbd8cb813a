//! CLI initialization and binary-alias detection.
//!
//! When `lzopack` is installed under other names (`lzo`, `lzode`, `unlzo`) via
//! hard or symbolic links, the mode is picked from `argv[0]` before any flag
//! parsing takes place.  Explicit flags parsed in [`crate::cli::args`] always
//! win over what the alias selected.

use crate::cli::constants::{LZO, LZODE, UNLZO};
use crate::cli::op_mode::{init_display_level, OpMode};
use crate::io::prefs::Prefs;
use crate::util::base_name;

/// Initial CLI state derived from the binary name and environment.
#[derive(Debug, Clone)]
pub struct CliInit {
    /// Preferences before any flag is applied.
    pub prefs: Prefs,
    /// Mode selected by the alias; `Auto` for the plain binary.
    pub op_mode: OpMode,
    /// Display level from `LZOPACK_DISPLAY_LEVEL` (or the default).
    pub display_level: u32,
}

/// `true` when `exe_name` is `name`, optionally followed by an extension
/// (`lzode.exe`).
fn exe_name_match(exe_name: &str, name: &str) -> bool {
    match exe_name.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Detect the operation mode and initial settings from `argv[0]`.
///
/// | Binary name        | Effect          |
/// |--------------------|-----------------|
/// | `lzo`              | Compress only   |
/// | `lzode` / `unlzo`  | Decompress only |
///
/// `argv0` may be a full path; the basename is extracted internally.
pub fn detect_alias(argv0: &str) -> CliInit {
    detect_alias_with(argv0, init_display_level())
}

/// [`detect_alias`] with the display level supplied by the caller.
pub fn detect_alias_with(argv0: &str, display_level: u32) -> CliInit {
    let exe_name = base_name(argv0);

    let mut prefs = Prefs::default();
    // The library replaces destinations by default; the CLI requires `-f`.
    prefs.set_overwrite(false);

    let op_mode = if exe_name_match(exe_name, LZODE) || exe_name_match(exe_name, UNLZO) {
        OpMode::Decompress
    } else if exe_name_match(exe_name, LZO) {
        OpMode::Compress
    } else {
        OpMode::Auto
    };

    CliInit {
        prefs,
        op_mode,
        display_level,
    }
}
