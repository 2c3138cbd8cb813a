//! Fallible buffer allocation.
//!
//! The container pipelines allocate their source, payload and output buffers
//! through [`BufferAllocator`] so that allocation denial is an ordinary error
//! instead of an abort.  Buffers release their memory when dropped.

use std::fmt;

/// Allocation of `requested` bytes was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot allocate {} bytes", self.requested)
    }
}

impl std::error::Error for AllocError {}

/// Source of zero-filled byte buffers.
pub trait BufferAllocator: Send + Sync {
    type Buffer: AsRef<[u8]> + AsMut<[u8]>;

    /// A zero-filled buffer of exactly `len` bytes.
    fn allocate(&self, len: usize) -> Result<Self::Buffer, AllocError>;
}

/// Heap allocation through `Vec::try_reserve_exact`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapAllocator;

impl BufferAllocator for HeapAllocator {
    type Buffer = Vec<u8>;

    fn allocate(&self, len: usize) -> Result<Vec<u8>, AllocError> {
        try_alloc_vec(len)
    }
}

/// A zero-filled `Vec<u8>` of `len` bytes, or `AllocError` if the allocator
/// refuses.
pub fn try_alloc_vec(len: usize) -> Result<Vec<u8>, AllocError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| AllocError { requested: len })?;
    v.resize(len, 0);
    Ok(v)
}
