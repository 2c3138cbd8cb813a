// lzopack: whole-file LZO1X containers: a little-endian length prefix
// followed by one LZO1X-1 stream.

pub mod config;
pub mod util;
pub mod lzo;
pub mod io;
pub mod cli;

// ── Version ───────────────────────────────────────────────────────────────────
pub const LZOPACK_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    LZOPACK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use io::{compress, decompress, CompressError, DecompressError, Engine, Prefs};
pub use lzo::{lzo1x_1_compress, lzo1x_decompress_safe, translate, worst_case_size, LzoCode, LzoErrorKind};
