//! API Layer for recordledger
//!
//! Parses invocation requests, runs each one as a single ledger
//! transaction through the record contract, and renders the response.
//!
//! # Design Principles
//!
//! - One request, one transaction
//! - Contract error codes passed through unchanged
//! - Commit conflicts surface as a retryable code, never retried here
//!
//! # Supported Functions
//!
//! - CreateUser, ReadUser, GetUserByEmail, GetAllUsers, UpdateUserLastLogin
//! - CreateAlert, GetAllAlerts
//! - CreateAsset (deprecated no-op)

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, Severity};
pub use handler::{ApiHandler, Executed};
pub use request::{CreateAlertRequest, CreateAssetRequest, CreateUserRequest, Function, Request};
pub use response::{ErrorResponse, Response, SuccessResponse};
