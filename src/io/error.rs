//! Error types returned by the container operations.
//!
//! Every failure is returned to the caller; nothing is retried or swallowed.
//! Primitive failures keep the raw LZO status code next to its category so
//! the original number can still be logged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::io::alloc::AllocError;
use crate::lzo::{LzoCode, LzoErrorKind};

/// Hint appended to primitive-failure diagnostics.
pub const PRIMITIVE_FAILURE_HINT: &str = "Please use the binary access";

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot allocate {requested} bytes")]
    AllocationFailure { requested: usize },

    #[error("input of {len} bytes does not fit the 32-bit length prefix")]
    InputTooLarge { len: u64 },

    #[error("err_code:({}) {kind}, {}", .code.raw(), PRIMITIVE_FAILURE_HINT)]
    CompressionFailure { code: LzoCode, kind: LzoErrorKind },
}

#[derive(Error, Debug)]
pub enum DecompressError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot allocate {requested} bytes")]
    AllocationFailure { requested: usize },

    #[error("corrupt container: {reason}")]
    CorruptContainer { reason: String },

    #[error("err_code:({}) {kind}, {}", .code.raw(), PRIMITIVE_FAILURE_HINT)]
    DecompressionFailure { code: LzoCode, kind: LzoErrorKind },
}

impl From<AllocError> for CompressError {
    fn from(e: AllocError) -> Self {
        CompressError::AllocationFailure {
            requested: e.requested,
        }
    }
}

impl From<AllocError> for DecompressError {
    fn from(e: AllocError) -> Self {
        DecompressError::AllocationFailure {
            requested: e.requested,
        }
    }
}

impl CompressError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CompressError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn primitive(code: LzoCode) -> Self {
        CompressError::CompressionFailure {
            code,
            kind: code.kind(),
        }
    }

    /// The LZO status code, when the primitive itself failed.
    pub fn lzo_code(&self) -> Option<LzoCode> {
        match self {
            CompressError::CompressionFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl DecompressError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DecompressError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn primitive(code: LzoCode) -> Self {
        DecompressError::DecompressionFailure {
            code,
            kind: code.kind(),
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        DecompressError::CorruptContainer {
            reason: reason.into(),
        }
    }

    /// The LZO status code, when the primitive itself failed.
    pub fn lzo_code(&self) -> Option<LzoCode> {
        match self {
            DecompressError::DecompressionFailure { code, .. } => Some(*code),
            _ => None,
        }
    }
}
