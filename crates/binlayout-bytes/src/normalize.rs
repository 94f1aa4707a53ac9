use bytes::Bytes;

use crate::error::{BytesError, Result};

/// Copy any byte-like input into an owned canonical sequence.
///
/// Text inputs (`&str`, `String`) are taken as their UTF-8 encoding. Use
/// [`byte_string_to_bytes`] when every character stands for one raw byte.
pub fn to_bytes(data: impl AsRef<[u8]>) -> Bytes {
    Bytes::copy_from_slice(data.as_ref())
}

/// Convert a byte-string into bytes without UTF-8 encoding.
///
/// Each character must be in U+0000..=U+00FF and becomes exactly one byte,
/// so `"\u{7f}ELF"` yields `7f 45 4c 46` and `"\u{ff}"` yields the single
/// byte `ff` rather than its two-byte UTF-8 form.
pub fn byte_string_to_bytes(text: &str) -> Result<Bytes> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| u8::try_from(ch).map_err(|_| BytesError::NotAByte { ch, index }))
        .collect::<Result<Vec<u8>>>()
        .map(Bytes::from)
}

/// Inverse of [`byte_string_to_bytes`]: every byte becomes the character
/// with the same code point.
pub fn bytes_to_byte_string(data: impl AsRef<[u8]>) -> String {
    data.as_ref().iter().map(|&b| char::from(b)).collect()
}

/// Decode bytes as UTF-8 text. Invalid sequences become U+FFFD.
pub fn to_text(data: impl AsRef<[u8]>) -> String {
    String::from_utf8_lossy(data.as_ref()).into_owned()
}

/// Encode bytes as lowercase hex, two digits per byte.
pub fn to_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(data.as_ref())
}

/// Decode lowercase or uppercase hex text.
///
/// Malformed input is rejected: odd lengths and non-hex digits return
/// [`BytesError::InvalidHex`] instead of being skipped.
pub fn from_hex(text: &str) -> Result<Bytes> {
    hex::decode(text)
        .map(Bytes::from)
        .map_err(|err| BytesError::InvalidHex(format!("{err} in {text:?}")))
}
