//! Bounds-checked LZO1X decompressor.
//!
//! Every read from the compressed input and every write to the output is
//! checked.  Malformed, truncated or hostile input produces one of the
//! `LZO_E_*` codes: it never panics and never touches memory outside the two
//! slices:
//!
//! - reading past the end of `src` → [`LzoCode::INPUT_OVERRUN`]
//! - writing past the end of `dst` → [`LzoCode::OUTPUT_OVERRUN`]
//! - a match reaching before the start of `dst` → [`LzoCode::LOOKBEHIND_OVERRUN`]
//! - bytes left after the end-of-stream marker → [`LzoCode::INPUT_NOT_CONSUMED`]
//!
//! The decoder needs no workspace; it is reentrant.

use super::status::LzoCode;
use super::types::{FIRST_BYTE_LITERAL_BIAS, M2_MAX_OFFSET};

type Result<T> = core::result::Result<T, LzoCode>;

/// Where the decoder is in the instruction grammar.
#[derive(Clone, Copy)]
enum Step {
    /// Expecting a literal-run header or a match.
    Instruction,
    /// Just copied a literal run; a byte below 16 is a 3-byte M1 match.
    AfterLiteralRun,
    /// Decode the match introduced by this instruction byte.
    Match(usize),
    /// A match finished; its state bits decide what follows.
    MatchDone,
    /// Copy 1–3 trailing literals, then read the next match instruction.
    Trailing(usize),
}

// ─────────────────────────────────────────────────────────────────────────────
// Bounds helpers
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
fn need_ip(src: &[u8], ip: usize, n: usize) -> Result<()> {
    if src.len() - ip < n {
        return Err(LzoCode::INPUT_OVERRUN);
    }
    Ok(())
}

#[inline(always)]
fn need_op(dst: &[u8], op: usize, n: usize) -> Result<()> {
    if dst.len() - op < n {
        return Err(LzoCode::OUTPUT_OVERRUN);
    }
    Ok(())
}

/// Read a zero-extended run length: each `0x00` adds 255, the first non-zero
/// byte ends the run and is added too.
#[inline]
fn read_run(src: &[u8], ip: &mut usize) -> Result<usize> {
    let mut len = 0usize;
    loop {
        need_ip(src, *ip, 1)?;
        let b = src[*ip];
        *ip += 1;
        if b != 0 {
            return Ok(len + b as usize);
        }
        len += 255;
    }
}

/// Read the 14-bit distance field shared by M3 and M4.
#[inline(always)]
fn read_distance(src: &[u8], ip: &mut usize) -> Result<usize> {
    need_ip(src, *ip, 2)?;
    let d = (src[*ip] as usize >> 2) | ((src[*ip + 1] as usize) << 6);
    *ip += 2;
    Ok(d)
}

#[inline(always)]
fn copy_literals(src: &[u8], ip: &mut usize, dst: &mut [u8], op: &mut usize, n: usize) {
    dst[*op..*op + n].copy_from_slice(&src[*ip..*ip + n]);
    *ip += n;
    *op += n;
}

/// Copy `len` bytes from `dist` bytes behind the cursor.  Source and
/// destination may overlap; bytes are copied front to back.
#[inline]
fn copy_match(dst: &mut [u8], op: &mut usize, dist: usize, len: usize) -> Result<()> {
    if dist > *op {
        return Err(LzoCode::LOOKBEHIND_OVERRUN);
    }
    need_op(dst, *op, len)?;
    let from = *op - dist;
    if dist >= len {
        dst.copy_within(from..from + len, *op);
    } else {
        for k in 0..len {
            dst[*op + k] = dst[from + k];
        }
    }
    *op += len;
    Ok(())
}

#[inline]
fn finish(src: &[u8], ip: usize, op: usize) -> Result<usize> {
    if ip == src.len() {
        Ok(op)
    } else if ip < src.len() {
        Err(LzoCode::INPUT_NOT_CONSUMED)
    } else {
        Err(LzoCode::INPUT_OVERRUN)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

/// Decompress one complete LZO1X stream from `src` into `dst`.
///
/// `dst.len()` is the output bound.  Returns the number of bytes written on
/// success.  The stream must end with the end-of-stream marker and consume
/// `src` exactly.
pub fn lzo1x_decompress_safe(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let mut ip = 0usize;
    let mut op = 0usize;

    need_ip(src, ip, 1)?;
    let mut step = Step::Instruction;
    if src[0] > FIRST_BYTE_LITERAL_BIAS {
        let t = (src[0] - FIRST_BYTE_LITERAL_BIAS) as usize;
        ip = 1;
        if t < 4 {
            step = Step::Trailing(t);
        } else {
            need_op(dst, op, t)?;
            need_ip(src, ip, t + 3)?;
            copy_literals(src, &mut ip, dst, &mut op, t);
            step = Step::AfterLiteralRun;
        }
    }

    loop {
        step = match step {
            Step::Instruction => {
                need_ip(src, ip, 3)?;
                let mut t = src[ip] as usize;
                ip += 1;
                if t >= 16 {
                    Step::Match(t)
                } else {
                    if t == 0 {
                        t = 15 + read_run(src, &mut ip)?;
                    }
                    need_op(dst, op, t + 3)?;
                    need_ip(src, ip, t + 6)?;
                    copy_literals(src, &mut ip, dst, &mut op, t + 3);
                    Step::AfterLiteralRun
                }
            }

            Step::AfterLiteralRun => {
                need_ip(src, ip, 1)?;
                let t = src[ip] as usize;
                ip += 1;
                if t >= 16 {
                    Step::Match(t)
                } else {
                    need_ip(src, ip, 1)?;
                    let dist = 1 + M2_MAX_OFFSET + (t >> 2) + ((src[ip] as usize) << 2);
                    ip += 1;
                    copy_match(dst, &mut op, dist, 3)?;
                    Step::MatchDone
                }
            }

            Step::Match(t) => {
                if t >= 64 {
                    // M2: length 3..=8, distance up to 2 KiB.
                    need_ip(src, ip, 1)?;
                    let dist = 1 + ((t >> 2) & 7) + ((src[ip] as usize) << 3);
                    ip += 1;
                    copy_match(dst, &mut op, dist, (t >> 5) + 1)?;
                } else if t >= 32 {
                    // M3: distance up to 16 KiB.
                    let mut len = t & 31;
                    if len == 0 {
                        len = 31 + read_run(src, &mut ip)?;
                    }
                    let dist = 1 + read_distance(src, &mut ip)?;
                    copy_match(dst, &mut op, dist, len + 2)?;
                } else if t >= 16 {
                    // M4: distance 16 KiB..48 KiB, or end of stream.
                    let mut dist = (t & 8) << 11;
                    let mut len = t & 7;
                    if len == 0 {
                        len = 7 + read_run(src, &mut ip)?;
                    }
                    dist += read_distance(src, &mut ip)?;
                    if dist == 0 {
                        return finish(src, ip, op);
                    }
                    copy_match(dst, &mut op, dist + 0x4000, len + 2)?;
                } else {
                    // M1 after a match: 2 bytes, distance up to 1 KiB.
                    need_ip(src, ip, 1)?;
                    let dist = 1 + (t >> 2) + ((src[ip] as usize) << 2);
                    ip += 1;
                    copy_match(dst, &mut op, dist, 2)?;
                }
                Step::MatchDone
            }

            Step::MatchDone => match (src[ip - 2] & 3) as usize {
                0 => Step::Instruction,
                t => Step::Trailing(t),
            },

            Step::Trailing(t) => {
                need_op(dst, op, t)?;
                need_ip(src, ip, t + 1)?;
                copy_literals(src, &mut ip, dst, &mut op, t);
                let next = src[ip] as usize;
                ip += 1;
                Step::Match(next)
            }
        };
    }
}
