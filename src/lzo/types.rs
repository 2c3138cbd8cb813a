//! Shared LZO1X format constants and small read helpers.
//!
//! The instruction set of an LZO1X stream is made of literal runs and four
//! match classes distinguished by the value of the instruction byte:
//!
//! | Class | First byte | Length  | Distance        |
//! |-------|------------|---------|-----------------|
//! | M1    | `0..16`    | 2 or 3  | up to 0x0C00    |
//! | M2    | `64..256`  | 3..=8   | up to 0x0800    |
//! | M3    | `32..64`   | 3..     | up to 0x4000    |
//! | M4    | `16..32`   | 3..     | 0x4001..=0xBFFF |
//!
//! The low two bits of the byte preceding the end of every match carry the
//! number (0–3) of literals that follow it without a separate header.

// ─────────────────────────────────────────────────────────────────────────────
// Match classes
// ─────────────────────────────────────────────────────────────────────────────

pub const M2_MAX_LEN: usize = 8;
pub const M3_MAX_LEN: usize = 33;
pub const M4_MAX_LEN: usize = 9;

pub const M2_MAX_OFFSET: usize = 0x0800;
pub const M3_MAX_OFFSET: usize = 0x4000;
pub const M4_MAX_OFFSET: usize = 0xBFFF;

pub const M3_MARKER: u8 = 32;
pub const M4_MARKER: u8 = 16;

/// Instruction bytes above this value open a stream with an inline literal run.
pub const FIRST_BYTE_LITERAL_BIAS: u8 = 17;

/// Longest literal run that fits the opening-byte shortcut (`17 + t <= 255`).
pub const FIRST_BYTE_LITERAL_MAX: usize = 238;

/// End-of-stream marker: an M4 instruction with a zero distance.
pub const EOF_MARKER: [u8; 3] = [M4_MARKER | 1, 0, 0];

// ─────────────────────────────────────────────────────────────────────────────
// Compressor dictionary (LZO1X-1)
// ─────────────────────────────────────────────────────────────────────────────

/// Number of hash bits used to index the compressor dictionary.
pub const D_BITS: u32 = 14;

/// Number of dictionary slots.
pub const D_SIZE: usize = 1 << D_BITS;

/// Mask applied to a hash to obtain a slot index.
pub const D_MASK: usize = D_SIZE - 1;

/// Size in bytes of the scratch memory the compressor needs.
///
/// Each slot stores a 16-bit position relative to the start of the block
/// being compressed, which is enough because blocks never exceed
/// [`BLOCK_LEN`] bytes.
pub const LZO1X_1_MEM_COMPRESS: usize = D_SIZE * core::mem::size_of::<u16>();

/// The compressor restarts its dictionary every `BLOCK_LEN` input bytes.
pub const BLOCK_LEN: usize = 49_152;

/// Bytes left unsearched at the end of each block; they are always emitted as
/// literals so that match extension never reads past the input.
pub const BLOCK_TAIL: usize = 20;

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Read a little-endian `u32` at `pos`.
///
/// Callers guarantee `pos + 4 <= buf.len()`.
#[inline(always)]
pub fn read_le32(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

/// Multiplicative hash of four input bytes into a dictionary slot.
#[inline(always)]
pub fn dindex(dv: u32) -> usize {
    (0x1824_429D_u32.wrapping_mul(dv) >> (32 - D_BITS)) as usize & D_MASK
}
