//! Whole-file decompression of the length-prefixed container.
//!
//! The declared original length doubles as the output bound handed to the
//! decompressor.  A container is accepted only when the primitive succeeds
//! and produces exactly the declared number of bytes; any other outcome is an
//! error and nothing is written.

use std::path::Path;

use crate::io::alloc::{try_alloc_vec, BufferAllocator};
use crate::io::engine::{ContainerStats, Engine};
use crate::io::error::DecompressError;
use crate::io::file_io::{read_full, FileIo};
use crate::io::format::{decode_prefix, PREFIX_WIDTH};
use crate::io::prefs::{display_level, Prefs};
use crate::lzo::BlockCodec;

impl<C, F, A> Engine<C, F, A>
where
    C: BlockCodec,
    F: FileIo,
    A: BufferAllocator,
{
    /// Decompress the container at `src` and write the original bytes to `dst`.
    pub fn decompress_file(
        &self,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
    ) -> Result<ContainerStats, DecompressError> {
        let (src, dst) = (src.as_ref(), dst.as_ref());

        let total = self
            .files
            .file_size(src)
            .map_err(|e| DecompressError::io(src, e))?;
        if total < PREFIX_WIDTH as u64 {
            return Err(too_short(total));
        }
        let compressed_len = usize::try_from(total - PREFIX_WIDTH as u64).map_err(|_| {
            DecompressError::AllocationFailure {
                requested: usize::MAX,
            }
        })?;

        let mut reader = self
            .files
            .open_read(src)
            .map_err(|e| DecompressError::io(src, e))?;
        let mut header = [0u8; PREFIX_WIDTH];
        read_full(&mut reader, &mut header).map_err(|e| DecompressError::io(src, e))?;
        let expected = u32::from_le_bytes(header) as usize;

        let mut in_buf = self.allocate(compressed_len)?;
        let mut out_buf = self.allocate(expected)?;

        read_full(&mut reader, in_buf.as_mut()).map_err(|e| DecompressError::io(src, e))?;
        drop(reader);

        let out_len = self.decode_payload(in_buf.as_ref(), out_buf.as_mut())?;
        drop(in_buf);

        self.files
            .write_file(dst, &[&out_buf.as_ref()[..out_len]], &self.prefs)
            .map_err(|e| DecompressError::io(dst, e))?;

        if self.prefs.preserve_mtime {
            if let Err(e) = self.files.copy_mtime(src, dst) {
                display_level(2, &format!("Warning : {}: cannot keep modification time: {}\n", dst.display(), e));
            }
        }

        display_level(
            2,
            &format!("{:<20}: decoded {} bytes \n", dst.display(), out_len),
        );
        Ok(ContainerStats {
            original_size: out_len as u64,
            container_size: total,
        })
    }

    /// Decompress a container held in memory.
    pub fn decompress_bytes(&self, container: &[u8]) -> Result<Vec<u8>, DecompressError> {
        let expected = decode_prefix(container).ok_or_else(|| too_short(container.len() as u64))?;
        let mut out = try_alloc_vec(expected as usize)?;
        let out_len = self.decode_payload(&container[PREFIX_WIDTH..], &mut out)?;
        out.truncate(out_len);
        Ok(out)
    }

    /// Decode `payload` into `out`, whose length is the declared original
    /// length.  Returns that length on success.
    pub(crate) fn decode_payload(&self, payload: &[u8], out: &mut [u8]) -> Result<usize, DecompressError> {
        let expected = out.len();
        if payload.is_empty() {
            if expected == 0 {
                return Ok(0);
            }
            return Err(DecompressError::corrupt(format!(
                "empty payload but prefix declares {} bytes",
                expected
            )));
        }

        let actual = self
            .codec
            .decompress(payload, out)
            .map_err(DecompressError::primitive)?;
        if actual != expected {
            return Err(DecompressError::corrupt(format!(
                "decoded {} bytes but prefix declares {}",
                actual, expected
            )));
        }
        Ok(actual)
    }
}

fn too_short(len: u64) -> DecompressError {
    DecompressError::corrupt(format!(
        "{} bytes is shorter than the {}-byte length prefix",
        len, PREFIX_WIDTH
    ))
}

// ---------------------------------------------------------------------------
// Status-code surface
// ---------------------------------------------------------------------------

/// Decompress `src` into `dst` with the standard engine and default
/// preferences.
///
/// Returns 0 on success and 1 on failure.  Failures are reported on stderr
/// at display level 1 as `decompression failed: <error>`; success prints
/// `decompress lzo ok!` at level 2.
pub fn decompress(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> i32 {
    let engine = Engine::new(Prefs::default());
    match engine.decompress_file(src, dst) {
        Ok(_) => {
            display_level(2, "decompress lzo ok!\n");
            0
        }
        Err(e) => {
            display_level(1, &format!("decompression failed: {}\n", e));
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
