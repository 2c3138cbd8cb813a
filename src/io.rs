//! Public API surface for container file I/O.
//!
//! This module assembles the container pipelines and re-exports the symbols
//! consumed by the CLI and library users.
//!
//! A container is a 4-byte little-endian original length followed by one
//! LZO1X stream.  See [`format`] for the exact layout.

pub mod alloc;
pub mod batch;
pub mod compress_container;
pub mod decompress_container;
pub mod engine;
pub mod error;
pub mod file_info;
pub mod file_io;
pub mod format;
pub mod prefs;

// ── Core type re-exports ─────────────────────────────────────────────────────
pub use alloc::{AllocError, BufferAllocator, HeapAllocator};
pub use engine::{ContainerStats, Engine};
pub use error::{CompressError, DecompressError};
pub use file_io::{FileIo, StdFileIo};
pub use format::PREFIX_WIDTH;
pub use prefs::Prefs;

// ── Notification level (global) ──────────────────────────────────────────────
pub use prefs::set_notification_level;

// ── Single-file status-code surface ──────────────────────────────────────────
/// Compress one file; 0 on success, 1 on failure.
pub use compress_container::compress;

/// Decompress one file; 0 on success, 1 on failure.
pub use decompress_container::decompress;

// ── Multi-file API ───────────────────────────────────────────────────────────
pub use batch::{compress_multiple_files, decompress_multiple_files, BatchSummary};

// ── File info / --list ───────────────────────────────────────────────────────
pub use file_info::{display_container_info, read_container_info, ContainerInfo};
