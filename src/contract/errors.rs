//! Record contract errors
//!
//! Every failure aborts the current transaction. Messages name the
//! offending key or field.

use std::fmt;

use crate::document::{CodecError, DocType};
use crate::query::QueryError;
use crate::state::StoreError;

/// Contract error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractErrorCode {
    /// Create on an id that is already present
    RecAlreadyExists,
    /// Key or query miss on read/update
    RecNotFound,
    /// State store or query engine failure
    RecStorageError,
    /// Stored document could not be decoded
    RecDecodeError,
    /// In-memory record could not be encoded
    RecEncodeError,
}

impl ContractErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ContractErrorCode::RecAlreadyExists => "REC_ALREADY_EXISTS",
            ContractErrorCode::RecNotFound => "REC_NOT_FOUND",
            ContractErrorCode::RecStorageError => "REC_STORAGE_ERROR",
            ContractErrorCode::RecDecodeError => "REC_DECODE_ERROR",
            ContractErrorCode::RecEncodeError => "REC_ENCODE_ERROR",
        }
    }
}

impl fmt::Display for ContractErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Record contract error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    code: ContractErrorCode,
    message: String,
}

impl ContractError {
    pub fn already_exists(doc_type: DocType, key: &str) -> Self {
        Self {
            code: ContractErrorCode::RecAlreadyExists,
            message: format!("{} {} already exists", doc_type, key),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self {
            code: ContractErrorCode::RecNotFound,
            message: format!("{} does not exist", what.into()),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self {
            code: ContractErrorCode::RecStorageError,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ContractErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ContractErrorCode::RecNotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.code == ContractErrorCode::RecAlreadyExists
    }
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ContractError {}

impl From<StoreError> for ContractError {
    fn from(err: StoreError) -> Self {
        Self::storage(format!("failed to access world state: {}", err))
    }
}

impl From<QueryError> for ContractError {
    fn from(err: QueryError) -> Self {
        Self::storage(format!("failed to execute query: {}", err))
    }
}

impl From<CodecError> for ContractError {
    fn from(err: CodecError) -> Self {
        let code = if err.is_decode() {
            ContractErrorCode::RecDecodeError
        } else {
            ContractErrorCode::RecEncodeError
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

/// Result type for contract operations
pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_names_key() {
        let err = ContractError::already_exists(DocType::User, "u1");
        assert_eq!(err.code().code(), "REC_ALREADY_EXISTS");
        assert!(err.message().contains("u1"));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_display_format() {
        let err = ContractError::not_found("user u9");
        assert_eq!(format!("{}", err), "REC_NOT_FOUND: user u9 does not exist");
    }

    #[test]
    fn test_store_and_query_errors_are_storage() {
        let err: ContractError = StoreError::EmptyKey.into();
        assert_eq!(err.code(), ContractErrorCode::RecStorageError);
        let err: ContractError = QueryError::Closed.into();
        assert_eq!(err.code(), ContractErrorCode::RecStorageError);
    }

    #[test]
    fn test_codec_errors_split_by_direction() {
        let err: ContractError = CodecError::InvalidUtf8 {
            key: "u1".to_string(),
        }
        .into();
        assert_eq!(err.code(), ContractErrorCode::RecDecodeError);
        assert!(err.message().contains("u1"));
    }
}
