//! LZO1X block codec.
//!
//! The LZO1X-1 compressor and the bounds-checked LZO1X decompressor, plus the
//! status-code table and the compressor's workspace management.  The container
//! layer in [`crate::io`] reaches the codec only through [`BlockCodec`].

pub mod compress;
pub mod decompress;
pub mod status;
pub mod types;
pub mod workspace;

pub use compress::{lzo1x_1_compress, worst_case_size};
pub use decompress::lzo1x_decompress_safe;
pub use status::{translate, LzoCode, LzoErrorKind};
pub use types::LZO1X_1_MEM_COMPRESS;
pub use workspace::{PooledWorkspace, Workspace, WorkspaceLease, WorkspacePool, WorkspaceSource};

/// A one-shot block compressor/decompressor pair.
///
/// `compress` must accept any `dst` of at least [`worst_case_size`] bytes for
/// `src`.  `decompress` treats `dst.len()` as the output bound.  Both return
/// the number of bytes written.
pub trait BlockCodec: Send + Sync {
    fn compress(&self, src: &[u8], dst: &mut [u8], wrkmem: &mut Workspace) -> Result<usize, LzoCode>;

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, LzoCode>;
}

/// The LZO1X-1 codec implemented in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzo1x1;

impl BlockCodec for Lzo1x1 {
    #[inline]
    fn compress(&self, src: &[u8], dst: &mut [u8], wrkmem: &mut Workspace) -> Result<usize, LzoCode> {
        lzo1x_1_compress(src, dst, wrkmem)
    }

    #[inline]
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize, LzoCode> {
        lzo1x_decompress_safe(src, dst)
    }
}
