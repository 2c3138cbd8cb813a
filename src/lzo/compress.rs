//! LZO1X-1 block compressor.
//!
//! The input is processed in blocks of at most [`BLOCK_LEN`] bytes.  Each
//! block restarts the hash dictionary held in the caller's [`Workspace`], but
//! literals left pending at the end of one block are carried into the next
//! one, and back-references always address the output produced so far, so the
//! emitted stream is a single continuous LZO1X stream.
//!
//! Search is greedy with a single-slot hash of the next four bytes.  A miss
//! advances the cursor by `1 + run/32`, skipping faster through data that
//! keeps failing to match.
//!
//! The worst-case output size for `n` input bytes is
//! [`worst_case_size(n)`](worst_case_size).  Callers must size `dst` at least
//! that large; a smaller buffer is refused with
//! [`LzoCode::OUTPUT_OVERRUN`] before any byte is written.

use super::status::LzoCode;
use super::types::{
    dindex, read_le32, BLOCK_LEN, BLOCK_TAIL, EOF_MARKER, FIRST_BYTE_LITERAL_BIAS,
    FIRST_BYTE_LITERAL_MAX, M2_MAX_LEN, M2_MAX_OFFSET, M3_MARKER, M3_MAX_LEN, M3_MAX_OFFSET,
    M4_MARKER, M4_MAX_LEN,
};
use super::workspace::Workspace;

// ─────────────────────────────────────────────────────────────────────────────
// Buffer sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Worst-case compressed size for `in_len` input bytes:
/// `in_len + in_len/16 + 64 + 3`.
///
/// Saturates instead of wrapping for absurd lengths.
#[inline]
pub const fn worst_case_size(in_len: usize) -> usize {
    in_len
        .saturating_add(in_len / 16)
        .saturating_add(64 + 3)
}

// ─────────────────────────────────────────────────────────────────────────────
// Output cursor
// ─────────────────────────────────────────────────────────────────────────────

/// Write cursor over the destination slice.
///
/// Every write is in bounds because the caller checked `dst` against
/// [`worst_case_size`] up front.
struct Out<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Out<'_> {
    #[inline(always)]
    fn push(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    #[inline(always)]
    fn extend(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Fold a short literal count (1..=3) into the state bits of the previous
    /// match instruction.
    #[inline(always)]
    fn tag_previous(&mut self, count: usize) {
        self.buf[self.pos - 2] |= count as u8;
    }

    /// Emit a run-length continuation: zero bytes worth 255 each, then the
    /// non-zero remainder.
    #[inline(always)]
    fn push_run(&mut self, mut len: usize) {
        while len > 255 {
            len -= 255;
            self.push(0);
        }
        self.push(len as u8);
    }

    /// Header for a literal run of `count > 3` bytes.
    #[inline(always)]
    fn literal_header(&mut self, count: usize) {
        if count <= 18 {
            self.push((count - 3) as u8);
        } else {
            self.push(0);
            self.push_run(count - 18);
        }
    }

    /// Emit a match of `len >= 4` bytes at `dist` bytes behind the cursor.
    fn push_match(&mut self, len: usize, dist: usize) {
        if len <= M2_MAX_LEN && dist <= M2_MAX_OFFSET {
            let off = dist - 1;
            self.push((((len - 1) << 5) | ((off & 7) << 2)) as u8);
            self.push((off >> 3) as u8);
        } else if dist <= M3_MAX_OFFSET {
            let off = dist - 1;
            if len <= M3_MAX_LEN {
                self.push(M3_MARKER | (len - 2) as u8);
            } else {
                self.push(M3_MARKER);
                self.push_run(len - M3_MAX_LEN);
            }
            self.push((off << 2) as u8);
            self.push((off >> 6) as u8);
        } else {
            let off = dist - 0x4000;
            let high = ((off >> 11) & 8) as u8;
            if len <= M4_MAX_LEN {
                self.push(M4_MARKER | high | (len - 2) as u8);
            } else {
                self.push(M4_MARKER | high);
                self.push_run(len - M4_MAX_LEN);
            }
            self.push((off << 2) as u8);
            self.push((off >> 6) as u8);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block loop
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src[base..base + len]` (with `len > BLOCK_TAIL`), continuing a
/// stream whose last `pending` input bytes before `base` are still unemitted
/// literals.
///
/// Returns the number of input bytes left pending at the end of the block.
fn compress_block(
    src: &[u8],
    base: usize,
    len: usize,
    pending: usize,
    out: &mut Out<'_>,
    dict: &mut [u16],
) -> usize {
    let in_end = base + len;
    let ip_end = in_end - BLOCK_TAIL;

    let mut pending = pending;
    let mut ii = base;
    let mut ip = base + 4usize.saturating_sub(pending);
    ip += 1 + ((ip - ii) >> 5);

    while ip < ip_end {
        let dv = read_le32(src, ip);
        let slot = dindex(dv);
        let m_pos = base + dict[slot] as usize;
        dict[slot] = (ip - base) as u16;

        if dv != read_le32(src, m_pos) {
            ip += 1 + ((ip - ii) >> 5);
            continue;
        }

        // Flush literals between the last emitted position and the match.
        ii -= pending;
        pending = 0;
        let lit = ip - ii;
        if lit > 0 {
            if lit <= 3 {
                out.tag_previous(lit);
            } else {
                out.literal_header(lit);
            }
            out.extend(&src[ii..ip]);
        }

        let mut m_len = 4;
        if src[ip + m_len] == src[m_pos + m_len] {
            loop {
                m_len += 1;
                if ip + m_len >= ip_end || src[ip + m_len] != src[m_pos + m_len] {
                    break;
                }
            }
        }

        out.push_match(m_len, ip - m_pos);
        ip += m_len;
        ii = ip;
    }

    in_end - (ii - pending)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `src` into `dst` as one LZO1X stream.
///
/// Returns the number of bytes written.  `dst` must hold at least
/// [`worst_case_size(src.len())`](worst_case_size) bytes, otherwise
/// `Err(LzoCode::OUTPUT_OVERRUN)` is returned and `dst` is left untouched.
///
/// An empty `src` produces only the 3-byte end-of-stream marker.
pub fn lzo1x_1_compress(
    src: &[u8],
    dst: &mut [u8],
    wrkmem: &mut Workspace,
) -> Result<usize, LzoCode> {
    if dst.len() < worst_case_size(src.len()) {
        return Err(LzoCode::OUTPUT_OVERRUN);
    }

    let mut out = Out { buf: dst, pos: 0 };
    let mut base = 0usize;
    let mut remaining = src.len();
    let mut pending = 0usize;

    while remaining > BLOCK_TAIL {
        let len = remaining.min(BLOCK_LEN);
        wrkmem.reset();
        pending = compress_block(src, base, len, pending, &mut out, wrkmem.dict_mut());
        base += len;
        remaining -= len;
    }
    pending += remaining;

    if pending > 0 {
        let start = src.len() - pending;
        if out.pos == 0 && pending <= FIRST_BYTE_LITERAL_MAX {
            out.push(FIRST_BYTE_LITERAL_BIAS + pending as u8);
        } else if pending <= 3 {
            out.tag_previous(pending);
        } else {
            out.literal_header(pending);
        }
        out.extend(&src[start..]);
    }

    out.extend(&EOF_MARKER);
    Ok(out.pos)
}
