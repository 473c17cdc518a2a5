//! Converter error type.
//!
//! Only precondition violations surface as errors; content anomalies become
//! warnings of a [`crate::Deserialization`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConverterError {
    #[error("argument `{0}` must not be absent")]
    NullArgument(&'static str),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
