use crate::error::{BytesError, Result};

/// Round `n` up to the nearest multiple of `to` (page and section alignment).
pub fn round_up(n: u64, to: u64) -> Result<u64> {
    if to == 0 {
        return Err(BytesError::ZeroAlignment);
    }
    let rem = n % to;
    if rem == 0 {
        return Ok(n);
    }
    n.checked_add(to - rem).ok_or(BytesError::OutOfRange {
        offset: usize::try_from(n).unwrap_or(usize::MAX),
        needed: usize::try_from(to - rem).unwrap_or(usize::MAX),
        available: usize::try_from(u64::MAX - n).unwrap_or(usize::MAX),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_page() {
        assert_eq!(round_up(0, 0x1000).unwrap(), 0);
        assert_eq!(round_up(1, 0x1000).unwrap(), 0x1000);
        assert_eq!(round_up(0x1000, 0x1000).unwrap(), 0x1000);
        assert_eq!(round_up(0x1001, 0x1000).unwrap(), 0x2000);
        assert_eq!(round_up(7, 3).unwrap(), 9);
    }

    #[test]
    fn zero_alignment_is_rejected() {
        assert!(matches!(round_up(5, 0), Err(BytesError::ZeroAlignment)));
    }

    #[test]
    fn overflow_is_rejected() {
        assert!(round_up(u64::MAX, 2).is_err());
        assert_eq!(round_up(u64::MAX, 1).unwrap(), u64::MAX);
    }
}
