//! Whole-file compression into the length-prefixed container.
//!
//! The pipeline reads the entire source into memory, compresses it in one
//! call into a buffer sized for the worst case, and writes the 4-byte prefix
//! followed by the payload:
//!
//! 1. Query the source size; reject sizes the 32-bit prefix cannot declare.
//! 2. Allocate the source buffer and the worst-case payload buffer.
//! 3. Read exactly the source size.
//! 4. Lease a workspace and run the primitive.
//! 5. Write prefix and payload to the destination.
//!
//! Buffers are owned by the call and released on every exit path.  Nothing
//! is written to the destination unless every earlier step succeeded.

use std::path::Path;

use crate::io::alloc::{try_alloc_vec, BufferAllocator};
use crate::io::engine::{ContainerStats, Engine};
use crate::io::error::CompressError;
use crate::io::file_io::{read_full, FileIo};
use crate::io::format::{encode_prefix, prefix_for_len, PREFIX_WIDTH};
use crate::io::prefs::{display_level, Prefs};
use crate::lzo::{worst_case_size, BlockCodec, LzoCode, LZO1X_1_MEM_COMPRESS};

impl<C, F, A> Engine<C, F, A>
where
    C: BlockCodec,
    F: FileIo,
    A: BufferAllocator,
{
    /// Compress `src` into a container written to `dst`.
    pub fn compress_file(
        &self,
        src: impl AsRef<Path>,
        dst: impl AsRef<Path>,
    ) -> Result<ContainerStats, CompressError> {
        let (src, dst) = (src.as_ref(), dst.as_ref());

        let in_len = self
            .files
            .file_size(src)
            .map_err(|e| CompressError::io(src, e))?;
        let prefix = prefix_for_len(in_len).ok_or(CompressError::InputTooLarge { len: in_len })?;
        let in_len = prefix as usize;

        let mut in_buf = self.allocate(in_len)?;
        let mut out_buf = self.allocate(worst_case_size(in_len))?;

        {
            let mut reader = self
                .files
                .open_read(src)
                .map_err(|e| CompressError::io(src, e))?;
            read_full(&mut reader, in_buf.as_mut()).map_err(|e| CompressError::io(src, e))?;
        }

        let out_len = self.encode_payload(in_buf.as_ref(), out_buf.as_mut())?;
        drop(in_buf);

        let header = encode_prefix(prefix);
        self.files
            .write_file(dst, &[&header[..], &out_buf.as_ref()[..out_len]], &self.prefs)
            .map_err(|e| CompressError::io(dst, e))?;

        if self.prefs.preserve_mtime {
            if let Err(e) = self.files.copy_mtime(src, dst) {
                display_level(2, &format!("Warning : {}: cannot keep modification time: {}\n", dst.display(), e));
            }
        }

        let stats = ContainerStats {
            original_size: in_len as u64,
            container_size: (PREFIX_WIDTH + out_len) as u64,
        };
        display_level(
            2,
            &format!(
                "Compressed {} bytes into {} bytes ==> {:.2}% \n",
                stats.original_size,
                stats.container_size,
                stats.ratio()
            ),
        );
        Ok(stats)
    }

    /// Compress `src` into a container held in memory.
    pub fn compress_bytes(&self, src: &[u8]) -> Result<Vec<u8>, CompressError> {
        let prefix = prefix_for_len(src.len() as u64).ok_or(CompressError::InputTooLarge {
            len: src.len() as u64,
        })?;

        let capacity = PREFIX_WIDTH.saturating_add(worst_case_size(src.len()));
        let mut container = try_alloc_vec(capacity)?;
        container[..PREFIX_WIDTH].copy_from_slice(&encode_prefix(prefix));

        let out_len = self.encode_payload(src, &mut container[PREFIX_WIDTH..])?;
        container.truncate(PREFIX_WIDTH + out_len);
        Ok(container)
    }

    /// Run the primitive over `src` into `dst`, returning the payload length.
    /// Empty input produces an empty payload without calling the primitive.
    pub(crate) fn encode_payload(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
        if src.is_empty() {
            return Ok(0);
        }

        let mut wrkmem = self
            .prefs
            .workspace
            .lease()
            .map_err(|_| CompressError::AllocationFailure {
                requested: LZO1X_1_MEM_COMPRESS,
            })?;

        let out_len = self
            .codec
            .compress(src, dst, &mut wrkmem)
            .map_err(CompressError::primitive)?;
        if out_len > dst.len() {
            return Err(CompressError::primitive(LzoCode::OUTPUT_OVERRUN));
        }
        Ok(out_len)
    }
}

// ---------------------------------------------------------------------------
// Status-code surface
// ---------------------------------------------------------------------------

/// Compress `src` into `dst` with the standard engine and default
/// preferences.
///
/// Returns 0 on success and 1 on failure.  Failures are reported on stderr
/// at display level 1 as `compression failed: <error>`; success prints
/// `compress lzo ok!` at level 2.
pub fn compress(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> i32 {
    let engine = Engine::new(Prefs::default());
    match engine.compress_file(src, dst) {
        Ok(_) => {
            display_level(2, "compress lzo ok!\n");
            0
        }
        Err(e) => {
            display_level(1, &format!("compression failed: {}\n", e));
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
