/// Errors that can occur while building, parsing or loading schemas.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The notation names a type the engine does not know.
    #[error("unknown type: {0:?}")]
    UnknownType(String),

    /// A composite declares the same field name twice.
    #[error("duplicate field: {0:?}")]
    DuplicateField(String),

    /// The notation is well-formed JSON but not a valid schema.
    #[error("invalid schema notation: {0}")]
    InvalidNotation(String),

    /// A schema file defines the same schema name twice.
    #[error("schema {0:?} defined more than once")]
    DuplicateSchema(String),

    /// Composites are nested deeper than the configured limit.
    #[error("schema nesting depth {depth} exceeds max {max}")]
    TooDeep { depth: usize, max: usize },

    /// A schema file or directory could not be loaded.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// The notation is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A magic literal is not a valid byte-string.
    #[error("invalid magic literal: {0}")]
    Bytes(#[from] binlayout_bytes::BytesError),

    /// No schema registered under the given name.
    #[error("no schema registered as {0:?}")]
    NoSchema(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
