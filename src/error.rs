//! Error types for the ingestion engine
//!
//! Malformed content inside a decoded document never produces an error: it is
//! coerced to defaults or silently dropped. The variants below cover the two
//! conditions that do surface to the caller.

use std::fmt;

/// Errors that can occur while ingesting a document
#[derive(Debug, Clone, PartialEq)]
pub enum IngestError {
    /// Invalid configuration or call parameters
    InvalidInput(String),

    /// The raw bytes are not a decodable JSON tree
    DecodingError(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            IngestError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::DecodingError(format!(
            "{} (line {}, column {})",
            err,
            err.line(),
            err.column()
        ))
    }
}
