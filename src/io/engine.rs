//! The container engine: codec, filesystem, allocator and preferences bundled
//! together.
//!
//! The compress and decompress pipelines are implemented on [`Engine`] in
//! [`compress_container`](crate::io::compress_container) and
//! [`decompress_container`](crate::io::decompress_container).  Every
//! collaborator is a type parameter so tests can swap any one of them for a
//! fault-injecting double while keeping the others real.

use crate::io::alloc::{AllocError, BufferAllocator, HeapAllocator};
use crate::io::file_io::{FileIo, StdFileIo};
use crate::io::prefs::Prefs;
use crate::lzo::{BlockCodec, Lzo1x1};

/// Byte counts of one successful container operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// Uncompressed length (the value of the prefix).
    pub original_size: u64,
    /// Total container length, prefix included.
    pub container_size: u64,
}

impl ContainerStats {
    /// Container size as a percentage of the original size; 100 for empty
    /// input.
    pub fn ratio(&self) -> f64 {
        if self.original_size == 0 {
            100.0
        } else {
            self.container_size as f64 / self.original_size as f64 * 100.0
        }
    }
}

/// Container compress/decompress pipelines over pluggable collaborators.
#[derive(Debug, Clone, Default)]
pub struct Engine<C = Lzo1x1, F = StdFileIo, A = HeapAllocator> {
    pub(crate) codec: C,
    pub(crate) files: F,
    pub(crate) alloc: A,
    pub(crate) prefs: Prefs,
}

impl Engine {
    /// The standard engine: LZO1X-1, `std::fs`, heap buffers.
    pub fn new(prefs: Prefs) -> Self {
        Engine {
            codec: Lzo1x1,
            files: StdFileIo,
            alloc: HeapAllocator,
            prefs,
        }
    }
}

impl<C, F, A> Engine<C, F, A>
where
    C: BlockCodec,
    F: FileIo,
    A: BufferAllocator,
{
    /// An engine over explicit collaborators.
    pub fn with_parts(codec: C, files: F, alloc: A, prefs: Prefs) -> Self {
        Engine {
            codec,
            files,
            alloc,
            prefs,
        }
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut Prefs {
        &mut self.prefs
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub(crate) fn allocate(&self, len: usize) -> Result<A::Buffer, AllocError> {
        self.alloc.allocate(len)
    }
}
