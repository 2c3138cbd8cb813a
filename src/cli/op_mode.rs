//! Operation mode selection and startup defaults for the CLI.
//!
//! - [`OpMode`]: what the CLI should do with its inputs.
//! - [`determine_op_mode`]: infers the mode from a filename's extension.
//! - [`init_display_level`]: reads the initial verbosity from
//!   `LZOPACK_DISPLAY_LEVEL`.

use crate::cli::constants::LZO_EXTENSION;
use crate::config::{DISPLAY_LEVEL_DEFAULT, DISPLAY_LEVEL_MAX, ENV_DISPLAY_LEVEL};

/// What the CLI should do with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decompress if the input ends in `.lzo`, compress otherwise.
    Auto,
    Compress,
    Decompress,
    /// Print container metadata without decoding.
    List,
}

/// Infer the operation mode from `filename`'s extension.
pub fn determine_op_mode(filename: &str) -> OpMode {
    if filename.ends_with(LZO_EXTENSION) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// Read the initial display level from `LZOPACK_DISPLAY_LEVEL`.
pub fn init_display_level() -> u32 {
    init_display_level_from(std::env::var(ENV_DISPLAY_LEVEL).ok().as_deref())
}

/// Testable core of [`init_display_level`].
///
/// Accepts a plain decimal value and clamps it to the highest level.  Anything
/// else, including an unset variable, yields [`DISPLAY_LEVEL_DEFAULT`].
pub fn init_display_level_from(env_val: Option<&str>) -> u32 {
    match env_val.map(str::trim).map(str::parse::<u32>) {
        Some(Ok(level)) => level.min(DISPLAY_LEVEL_MAX),
        _ => DISPLAY_LEVEL_DEFAULT,
    }
}
