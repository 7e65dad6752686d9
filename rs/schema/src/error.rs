use thiserror::Error;

/// A single validation failure for one column. Failures are accumulated
/// across the whole tree before being raised, so one build surfaces every
/// broken column at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Invalid parquet type: {type_name}, for Column: {column}")]
    UnresolvedType { type_name: String, column: String },

    #[error("Unsupported parquet encoding: {encoding}, for Column: {column}")]
    UnsupportedEncoding { encoding: String, column: String },

    #[error("Unsupported compression method: {method}, for Column: {column}")]
    UnsupportedCompression { method: String, column: String },

    #[error("Invalid decimal schema for Column: {column}: {reason}")]
    InvalidDecimalSpec { column: String, reason: String },

    #[error("Invalid schema for Column: {column}: field must declare either a type or nested fields")]
    UnsupportedSchemaConstruct { column: String },
}

/// Combined failure for a whole schema build. Display joins every
/// individual message on its own line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"))]
pub struct SchemaBuildError {
    pub errors: Vec<FieldError>,
}
