use std::fmt;
use std::io;

use binlayout::bytes::BytesError;
use binlayout::{CodecError, SchemaError};

// Exit code constants aligned with rsfulmen/DDR-0002 semantics.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn bytes_error(context: &str, err: BytesError) -> CliError {
    let code = match err {
        BytesError::InvalidHex(_) | BytesError::NotAByte { .. } => DATA_INVALID,
        BytesError::OutOfRange { .. } | BytesError::ZeroAlignment => USAGE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn schema_error(context: &str, err: SchemaError) -> CliError {
    let code = match &err {
        SchemaError::LoadFailed(_) => FAILURE,
        SchemaError::Bytes(_) => DATA_INVALID,
        SchemaError::UnknownType(_)
        | SchemaError::DuplicateField(_)
        | SchemaError::DuplicateSchema(_)
        | SchemaError::InvalidNotation(_)
        | SchemaError::TooDeep { .. }
        | SchemaError::Json(_)
        | SchemaError::NoSchema(_) => USAGE,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn codec_error(context: &str, err: CodecError) -> CliError {
    match err {
        CodecError::Schema(err) => schema_error(context, err),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn json_error(context: &str, err: serde_json::Error) -> CliError {
    let code = if err.is_io() { INTERNAL } else { DATA_INVALID };
    CliError::new(code, format!("{context}: {err}"))
}
