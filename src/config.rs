// config.rs: compile-time configuration constants.
//
// Runtime options live in `io::prefs::Prefs`; everything here is fixed at
// build time.

// Width of the little-endian original-length prefix at the start of every
// container.
pub const PREFIX_WIDTH: usize = crate::io::format::PREFIX_WIDTH;

// File suffix appended on compression and stripped on decompression.
pub const LZO_EXTENSION: &str = ".lzo";

// Display level used when `LZOPACK_DISPLAY_LEVEL` is unset or invalid.
// 0 = silent, 1 = errors, 2 = results, 3 = progress, 4 = verbose.
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;

// Highest accepted display level.
pub const DISPLAY_LEVEL_MAX: u32 = 4;

// Environment variable holding the initial display level.
pub const ENV_DISPLAY_LEVEL: &str = "LZOPACK_DISPLAY_LEVEL";
