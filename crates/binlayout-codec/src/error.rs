use binlayout_schema::{ScalarKind, SchemaError};

/// Errors raised while decoding or encoding a layout.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried and no partial value is returned.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Decoded literal bytes differ from the schema's magic.
    #[error("magic mismatch at {path}: expected {expected}, found {found}")]
    MagicMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// The source ends before the field does.
    #[error("short buffer at {path}: need {needed} bytes, {available} available")]
    ShortBuffer {
        path: String,
        needed: usize,
        available: usize,
    },

    /// Input is longer than the layout and trailing bytes are not allowed.
    #[error("trailing bytes after {consumed}-byte layout ({total} bytes given)")]
    TrailingBytes { consumed: usize, total: usize },

    /// The layout's total size does not fit in `usize`.
    #[error("layout size overflows the address space")]
    SizeOverflow,

    /// The layout is larger than the configured encode limit.
    #[error("layout of {size} bytes exceeds encode limit of {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// An integer does not fit its declared width and signedness.
    #[error("value {value} out of range for {kind} at {path}")]
    Range {
        path: String,
        value: i128,
        kind: ScalarKind,
    },

    /// A value has the wrong shape for its descriptor.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A record lacks a field the schema requires.
    #[error("missing field {path}")]
    MissingField { path: String },

    /// Preserved padding bytes have the wrong length.
    #[error("padding at {path} must be {expected} bytes, got {found}")]
    PaddingLength {
        path: String,
        expected: usize,
        found: usize,
    },

    /// A padding value is not valid hex.
    #[error("invalid padding bytes at {path}: {source}")]
    Bytes {
        path: String,
        #[source]
        source: binlayout_bytes::BytesError,
    },

    /// The schema itself is invalid (including unknown types).
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

pub type Result<T> = std::result::Result<T, CodecError>;
