//! Multi-file compression and decompression.
//!
//! Each file is an independent container, so files are processed in parallel
//! on the rayon pool.  One [`Engine`] is shared by every worker; compressions
//! lease their workspace from a single [`WorkspacePool`](crate::lzo::WorkspacePool)
//! so that no more workspaces exist than files in flight.  A failing file is
//! reported and counted but never stops the others.

use std::path::Path;

use rayon::prelude::*;

use crate::io::alloc::BufferAllocator;
use crate::io::engine::Engine;
use crate::io::file_io::FileIo;
use crate::io::prefs::{display_level, Prefs};
use crate::lzo::BlockCodec;
use crate::util::strip_suffix;

/// Outcome counts of a multi-file run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files converted successfully.
    pub processed: usize,
    /// Files that failed.
    pub missed: usize,
    /// Files not attempted because their name did not carry the suffix.
    pub skipped: usize,
    /// Total uncompressed bytes over the processed files.
    pub original_bytes: u64,
}

impl BatchSummary {
    /// `true` when every file was processed.
    pub fn is_success(&self) -> bool {
        self.missed == 0 && self.skipped == 0
    }

    fn merge(self, other: Self) -> Self {
        BatchSummary {
            processed: self.processed + other.processed,
            missed: self.missed + other.missed,
            skipped: self.skipped + other.skipped,
            original_bytes: self.original_bytes + other.original_bytes,
        }
    }

    fn one_processed(bytes: u64) -> Self {
        BatchSummary {
            processed: 1,
            original_bytes: bytes,
            ..Self::default()
        }
    }

    fn one_missed() -> Self {
        BatchSummary {
            missed: 1,
            ..Self::default()
        }
    }

    fn one_skipped() -> Self {
        BatchSummary {
            skipped: 1,
            ..Self::default()
        }
    }
}

impl<C, F, A> Engine<C, F, A>
where
    C: BlockCodec,
    F: FileIo,
    A: BufferAllocator,
{
    /// Compress every `srcs[i]` into `srcs[i] + suffix`.
    pub fn compress_many<S: AsRef<str> + Sync>(&self, srcs: &[S], suffix: &str) -> BatchSummary {
        srcs.par_iter()
            .map(|src| {
                let src = src.as_ref();
                let dst = format!("{}{}", src, suffix);
                match self.compress_file(src, &dst) {
                    Ok(stats) => BatchSummary::one_processed(stats.original_size),
                    Err(e) => {
                        display_level(1, &format!("lzopack: {}: compression failed: {}\n", src, e));
                        BatchSummary::one_missed()
                    }
                }
            })
            .reduce(BatchSummary::default, BatchSummary::merge)
    }

    /// Decompress every `srcs[i]` into `srcs[i]` minus `suffix`.
    pub fn decompress_many<S: AsRef<str> + Sync>(&self, srcs: &[S], suffix: &str) -> BatchSummary {
        srcs.par_iter()
            .map(|src| {
                let src = src.as_ref();
                let Some(dst) = strip_suffix(src, suffix) else {
                    display_level(
                        1,
                        &format!(
                            "File extension doesn't match expected extension ({}); will not process file: {}\n",
                            suffix, src
                        ),
                    );
                    return BatchSummary::one_skipped();
                };
                match self.decompress_file(src, Path::new(dst)) {
                    Ok(stats) => BatchSummary::one_processed(stats.original_size),
                    Err(e) => {
                        display_level(1, &format!("lzopack: {}: decompression failed: {}\n", src, e));
                        BatchSummary::one_missed()
                    }
                }
            })
            .reduce(BatchSummary::default, BatchSummary::merge)
    }
}

// ---------------------------------------------------------------------------
// Convenience wrappers over the standard engine
// ---------------------------------------------------------------------------

/// Compress multiple files with the standard engine; workspaces come from a
/// pool shared by all workers.
pub fn compress_multiple_files<S: AsRef<str> + Sync>(
    srcs: &[S],
    suffix: &str,
    prefs: &Prefs,
) -> BatchSummary {
    let mut prefs = prefs.clone();
    prefs.use_workspace_pool();
    let summary = Engine::new(prefs).compress_many(srcs, suffix);
    report(&summary, "compressed");
    summary
}

/// Decompress multiple files with the standard engine.
pub fn decompress_multiple_files<S: AsRef<str> + Sync>(
    srcs: &[S],
    suffix: &str,
    prefs: &Prefs,
) -> BatchSummary {
    let summary = Engine::new(prefs.clone()).decompress_many(srcs, suffix);
    report(&summary, "decompressed");
    summary
}

fn report(summary: &BatchSummary, verb: &str) {
    display_level(
        2,
        &format!(
            "{} files {} ({} bytes), {} failed, {} skipped\n",
            summary.processed, verb, summary.original_bytes, summary.missed, summary.skipped
        ),
    );
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
