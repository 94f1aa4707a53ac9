use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{BytesError, Result};

/// Concatenate blocks into one owned sequence, in order.
///
/// Zero blocks yield an empty sequence; zero-length blocks contribute nothing.
pub fn concat<I, B>(blocks: I) -> Bytes
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut out = BytesMut::new();
    for block in blocks {
        out.put_slice(block.as_ref());
    }
    out.freeze()
}

/// Copy `len` bytes starting at `start`; `None` takes everything after `start`.
///
/// Out-of-range requests are clamped: a `start` past the end yields an empty
/// sequence and a `len` running past the end yields the remainder.
pub fn slice(data: impl AsRef<[u8]>, start: usize, len: Option<usize>) -> Bytes {
    let data = data.as_ref();
    let start = start.min(data.len());
    let end = match len {
        Some(len) => start.saturating_add(len).min(data.len()),
        None => data.len(),
    };
    Bytes::copy_from_slice(&data[start..end])
}

/// Return a reversed copy.
pub fn reverse(data: impl AsRef<[u8]>) -> Bytes {
    data.as_ref().iter().rev().copied().collect::<Vec<u8>>().into()
}

/// Fill `dest[offset..]` with the leading bytes of `src`.
///
/// Exactly `dest.len() - offset` bytes are read from `src[0..]`. Returns the
/// number of bytes written. Fails without touching `dest` if `offset` is past
/// the end of `dest` or `src` is too short.
pub fn copy_into(dest: &mut [u8], src: impl AsRef<[u8]>, offset: usize) -> Result<usize> {
    let src = src.as_ref();
    let Some(needed) = dest.len().checked_sub(offset) else {
        return Err(BytesError::OutOfRange {
            offset,
            needed: 0,
            available: dest.len(),
        });
    };
    if src.len() < needed {
        tracing::trace!(offset, needed, available = src.len(), "copy_into source too short");
        return Err(BytesError::OutOfRange {
            offset,
            needed,
            available: src.len(),
        });
    }
    dest[offset..].copy_from_slice(&src[..needed]);
    Ok(needed)
}
