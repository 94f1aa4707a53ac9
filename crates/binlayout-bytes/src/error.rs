/// Errors that can occur while normalizing or slicing byte sequences.
#[derive(Debug, thiserror::Error)]
pub enum BytesError {
    /// The hex text has an odd length or contains a non-hex digit.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// A byte-string character is outside U+0000..=U+00FF.
    #[error("character {ch:?} at index {index} is not a single byte")]
    NotAByte { ch: char, index: usize },

    /// A copy or arithmetic operation would run past the available range.
    #[error("out of range: offset {offset} needs {needed} bytes, {available} available")]
    OutOfRange {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Alignment to a multiple of zero was requested.
    #[error("alignment must be greater than zero")]
    ZeroAlignment,
}

pub type Result<T> = std::result::Result<T, BytesError>;
