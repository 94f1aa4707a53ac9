//! Canonical byte-sequence normalization for binlayout.
//!
//! Every input the layout engine accepts (raw buffers, text, `Bytes` views)
//! is normalized into one owned [`Bytes`] before any engine logic runs.
//! Nothing in this crate mutates its inputs; every operation returns a
//! fresh, independently owned sequence.
//!
//! - [`normalize`]: conversions between bytes, text, byte-strings and hex
//! - [`ops`]: concatenation, clamped slicing, reversal, copy-into
//! - [`align`]: rounding offsets up to page/section alignment
//! - [`pattern`]: cyclic search patterns for locating offsets in dumps

pub mod align;
pub mod error;
pub mod normalize;
pub mod ops;
pub mod pattern;

pub use align::round_up;
pub use bytes::Bytes;
pub use error::{BytesError, Result};
pub use normalize::{
    byte_string_to_bytes, bytes_to_byte_string, from_hex, to_bytes, to_hex, to_text,
};
pub use ops::{concat, copy_into, reverse, slice};
pub use pattern::{cyclic_find, cyclic_pattern, MAX_PATTERN_LEN};
