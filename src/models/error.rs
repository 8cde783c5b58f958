use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown {field}: '{value}'")]
    UnknownVariant { field: &'static str, value: String },

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Bad date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Bad value for {field}: '{value}'")]
    InvalidValue { field: String, value: String },
}
