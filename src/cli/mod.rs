//! Command-line interface for the `lzopack` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, alias names, the CLI `DISPLAY_LEVEL` atomic and the display macros. |
//! | [`op_mode`]   | `OpMode` enum, extension-based mode detection and the environment-derived display level. |
//! | [`init`]      | `CliInit`: initial state built from the binary name (`lzo`, `lzode`, `unlzo`). |
//! | [`args`]      | `ParsedArgs`: clap-derived flags layered on top of `CliInit`. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to the I/O layer.

pub mod constants;
pub mod op_mode;
pub mod init;
pub mod args;
