//! API error types
//!
//! API errors are pass-through: contract error codes reach the caller
//! unchanged. Only request-shape problems and commit rejections get codes
//! of their own.

use std::fmt;

use crate::contract::ContractError;
use crate::ledger::CommitError;

/// API error severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable error
    Error,
    /// System must halt
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Malformed envelope or arguments
    RecInvalidRequest,
    /// Function name not recognised
    RecUnknownFunction,
    /// Transaction lost an optimistic-concurrency race; resubmit
    RecCommitConflict,
    /// Ledger could not order the commit
    RecCommitFailed,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::RecInvalidRequest => "REC_INVALID_REQUEST",
            ApiErrorCode::RecUnknownFunction => "REC_UNKNOWN_FUNCTION",
            ApiErrorCode::RecCommitConflict => "REC_COMMIT_CONFLICT",
            ApiErrorCode::RecCommitFailed => "REC_COMMIT_FAILED",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            ApiErrorCode::RecCommitFailed => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with preserved subsystem error information
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Original error code string (from contract or API)
    code: String,
    message: String,
    severity: Severity,
}

impl ApiError {
    fn with_code(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code().to_string(),
            message: message.into(),
            severity: code.severity(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::with_code(ApiErrorCode::RecInvalidRequest, reason)
    }

    /// Create an unknown function error
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::with_code(
            ApiErrorCode::RecUnknownFunction,
            format!("Unknown function: {}", name.into()),
        )
    }

    /// Create from a contract error (pass-through)
    pub fn from_contract_error(err: ContractError) -> Self {
        Self {
            code: err.code().code().to_string(),
            message: err.message().to_string(),
            severity: Severity::Error,
        }
    }

    /// Create from a commit rejection
    pub fn from_commit_error(err: CommitError) -> Self {
        let code = if err.is_retryable() {
            ApiErrorCode::RecCommitConflict
        } else {
            ApiErrorCode::RecCommitFailed
        };
        Self::with_code(code, err.to_string())
    }

    /// Returns the error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }

    /// Returns whether resubmitting the same request may succeed
    pub fn is_retryable(&self) -> bool {
        self.code == ApiErrorCode::RecCommitConflict.code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocType;
    use uuid::Uuid;

    #[test]
    fn test_invalid_request_error() {
        let err = ApiError::invalid_request("missing field");
        assert_eq!(err.code(), "REC_INVALID_REQUEST");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_unknown_function_error() {
        let err = ApiError::unknown_function("DeleteUser");
        assert_eq!(err.code(), "REC_UNKNOWN_FUNCTION");
        assert!(err.message().contains("DeleteUser"));
    }

    #[test]
    fn test_contract_error_passes_through() {
        let err = ApiError::from_contract_error(ContractError::already_exists(DocType::User, "u1"));
        assert_eq!(err.code(), "REC_ALREADY_EXISTS");
        assert!(err.message().contains("u1"));
    }

    #[test]
    fn test_conflict_is_retryable() {
        let err = ApiError::from_commit_error(CommitError::Conflict {
            tx_id: Uuid::nil(),
            key: "u1".to_string(),
            read_version: 0,
            current_version: 3,
        });
        assert_eq!(err.code(), "REC_COMMIT_CONFLICT");
        assert!(err.is_retryable());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_display_format() {
        let err = ApiError::invalid_request("bad");
        assert_eq!(format!("{}", err), "REC_INVALID_REQUEST: bad");
    }
}
