//! Codec error types

use thiserror::Error;

use super::DocType;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Failures turning documents into bytes and back
#[derive(Debug, Error)]
pub enum CodecError {
    /// An in-memory record could not be serialized
    #[error("failed to encode {doc_type} {key}: {source}")]
    Encode {
        doc_type: DocType,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored bytes are not a valid document of the requested kind
    #[error("failed to decode {doc_type} at key {key}: {source}")]
    Decode {
        doc_type: DocType,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Document parsed but carries another discriminator
    #[error("document at key {key} has docType {found}, expected {expected}")]
    WrongDocType {
        key: String,
        expected: DocType,
        found: DocType,
    },

    /// Stored bytes are not UTF-8 and cannot be returned as text
    #[error("document at key {key} is not valid UTF-8")]
    InvalidUtf8 { key: String },
}

impl CodecError {
    /// Returns true for failures caused by stored bytes (as opposed to
    /// failures encoding an in-memory record)
    pub fn is_decode(&self) -> bool {
        !matches!(self, CodecError::Encode { .. })
    }
}
