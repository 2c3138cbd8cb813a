// cli/constants.rs: program identity, alias names and display infrastructure.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::config::DISPLAY_LEVEL_DEFAULT;

// ── String / identity constants ───────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "lzopack";
pub const LZO_EXTENSION: &str = crate::config::LZO_EXTENSION;

// Alias binaries selecting a default mode from argv[0].
pub const LZO: &str = "lzo";
pub const LZODE: &str = "lzode";
pub const UNLZO: &str = "unlzo";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = results; 3 = progress; 4 = verbose.
// The library keeps its own level in `io::prefs`; `main` keeps both in step.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DISPLAY_LEVEL_DEFAULT);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display macros ────────────────────────────────────────────────────────────

/// Print to stderr.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the CLI display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
