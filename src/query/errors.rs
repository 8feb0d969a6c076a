//! Query error types

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Selector query failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Selector text is malformed
    #[error("invalid selector: {reason}")]
    InvalidSelector { reason: String },

    /// Selector uses syntax beyond equality predicates
    #[error("unsupported selector feature: {feature}")]
    Unsupported { feature: String },

    /// Engine failed to evaluate the selector
    #[error("query execution failed: {reason}")]
    Execution { reason: String },

    /// Cursor failed while producing the next result
    #[error("failed to read next query result: {reason}")]
    Cursor { reason: String },

    /// Cursor was used after close
    #[error("query cursor already closed")]
    Closed,
}

impl QueryError {
    /// Create an invalid selector error
    pub fn invalid_selector(reason: impl Into<String>) -> Self {
        QueryError::InvalidSelector {
            reason: reason.into(),
        }
    }
}
