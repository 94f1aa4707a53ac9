//! Cyclic search patterns.
//!
//! A pattern is a run of 4-byte blocks, each an `A` marker followed by the
//! block's own byte offset in three lowercase base-36 digits:
//!
//! ```text
//! A000A004A008A00cA00g...
//! ```
//!
//! Feeding a pattern into a target and reading back any 4 bytes of it
//! (from a register, a crash dump, a log line) identifies the offset they
//! came from. The marker is uppercase and the digits lowercase, so every
//! 4-byte window is unique.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{BytesError, Result};

const BLOCK_LEN: usize = 4;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Longest pattern whose block offsets still fit in three base-36 digits.
pub const MAX_PATTERN_LEN: usize = 36 * 36 * 36;

/// Generate exactly `len` bytes of cyclic pattern.
pub fn cyclic_pattern(len: usize) -> Result<Bytes> {
    if len > MAX_PATTERN_LEN {
        return Err(BytesError::OutOfRange {
            offset: 0,
            needed: len,
            available: MAX_PATTERN_LEN,
        });
    }
    let mut out = BytesMut::with_capacity(len + BLOCK_LEN);
    let mut offset = 0;
    while out.len() < len {
        out.put_u8(b'A');
        out.put_slice(&base36(offset));
        offset += BLOCK_LEN;
    }
    out.truncate(len);
    Ok(out.freeze())
}

/// Find the offset of `needle` inside the cyclic pattern.
///
/// Returns `None` for empty needles and for bytes that never occur in a
/// pattern.
pub fn cyclic_find(needle: impl AsRef<[u8]>) -> Option<usize> {
    let needle = needle.as_ref();
    if needle.is_empty() || needle.len() > MAX_PATTERN_LEN {
        return None;
    }
    let haystack = cyclic_pattern(MAX_PATTERN_LEN).ok()?;
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn base36(mut value: usize) -> [u8; 3] {
    let mut out = [b'0'; 3];
    for slot in out.iter_mut().rev() {
        *slot = DIGITS[value % 36];
        value /= 36;
    }
    out
}
