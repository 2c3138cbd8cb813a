//! Container wire format.
//!
//! ```text
//! offset 0..4    original_length   u32, little-endian
//! offset 4..end  payload           LZO1X stream, empty iff original_length == 0
//! ```
//!
//! The prefix is fixed at 32 bits regardless of the platform word size, so a
//! container written on one machine decodes on any other.

/// Byte width of the original-length prefix.
pub const PREFIX_WIDTH: usize = 4;

/// Largest original length the prefix can declare.
pub const MAX_ORIGINAL_LEN: u64 = u32::MAX as u64;

/// Encodes `original_len` as the container prefix.
#[inline]
pub fn encode_prefix(original_len: u32) -> [u8; PREFIX_WIDTH] {
    original_len.to_le_bytes()
}

/// Reads the prefix from the first [`PREFIX_WIDTH`] bytes of `buf`.
///
/// Returns `None` when `buf` is too short to hold one.
#[inline]
pub fn decode_prefix(buf: &[u8]) -> Option<u32> {
    let bytes: [u8; PREFIX_WIDTH] = buf.get(..PREFIX_WIDTH)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Checked conversion of an input length to the prefix value.
#[inline]
pub fn prefix_for_len(len: u64) -> Option<u32> {
    u32::try_from(len).ok()
}
