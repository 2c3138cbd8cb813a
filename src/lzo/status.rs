//! LZO status codes and their diagnostic categories.
//!
//! The primitive reports failures as the classic negative `LZO_E_*` integers.
//! [`LzoCode`] carries that number unchanged so it can be logged verbatim;
//! [`LzoErrorKind`] is the closed set of human-readable categories it maps to.
//! The mapping is total: any integer outside the known table is
//! [`LzoErrorKind::Unknown`].

use std::fmt;

/// A numeric status code returned by the LZO primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LzoCode(pub i32);

impl LzoCode {
    pub const OK: LzoCode = LzoCode(0);
    pub const ERROR: LzoCode = LzoCode(-1);
    pub const OUT_OF_MEMORY: LzoCode = LzoCode(-2);
    pub const NOT_COMPRESSIBLE: LzoCode = LzoCode(-3);
    pub const INPUT_OVERRUN: LzoCode = LzoCode(-4);
    pub const OUTPUT_OVERRUN: LzoCode = LzoCode(-5);
    pub const LOOKBEHIND_OVERRUN: LzoCode = LzoCode(-6);
    pub const EOF_NOT_FOUND: LzoCode = LzoCode(-7);
    pub const INPUT_NOT_CONSUMED: LzoCode = LzoCode(-8);
    pub const NOT_YET_IMPLEMENTED: LzoCode = LzoCode(-9);
    pub const INVALID_ARGUMENT: LzoCode = LzoCode(-10);

    /// The raw integer value.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Diagnostic category of this code.
    #[inline]
    pub fn kind(self) -> LzoErrorKind {
        LzoErrorKind::from_code(self.0)
    }
}

impl fmt::Display for LzoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "err_code:({}) {}", self.0, self.kind())
    }
}

/// Closed set of diagnostic categories for LZO status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LzoErrorKind {
    Error,
    OutOfMemory,
    NotCompressible,
    InputOverrun,
    OutputOverrun,
    LookbehindOverrun,
    EofNotFound,
    InputNotConsumed,
    /// Reserved by the format; never produced by this crate's primitive.
    NotYetImplemented,
    InvalidArgument,
    Unknown,
}

impl LzoErrorKind {
    /// Translate a numeric status code. Unmapped codes (including `0`) give
    /// [`LzoErrorKind::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => Self::Error,
            -2 => Self::OutOfMemory,
            -3 => Self::NotCompressible,
            -4 => Self::InputOverrun,
            -5 => Self::OutputOverrun,
            -6 => Self::LookbehindOverrun,
            -7 => Self::EofNotFound,
            -8 => Self::InputNotConsumed,
            -9 => Self::NotYetImplemented,
            -10 => Self::InvalidArgument,
            _ => Self::Unknown,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::OutOfMemory => "out of memory",
            Self::NotCompressible => "not compressible",
            Self::InputOverrun => "input overrun",
            Self::OutputOverrun => "output overrun",
            Self::LookbehindOverrun => "lookbehind overrun",
            Self::EofNotFound => "eof not found",
            Self::InputNotConsumed => "input not consumed",
            Self::NotYetImplemented => "not yet implemented",
            Self::InvalidArgument => "invalid argument",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LzoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Free-function form of [`LzoErrorKind::from_code`].
#[inline]
pub fn translate(code: i32) -> LzoErrorKind {
    LzoErrorKind::from_code(code)
}
