//! State Store interface
//!
//! The minimal key-value primitive the record contract runs against:
//! `get` and `put` of opaque bytes by string key, inside one transaction.
//!
//! # Contract
//!
//! - `get` observes the transaction's read snapshot plus its own staged
//!   writes (read-your-own-writes)
//! - `put` only stages; durability and conflict detection happen at commit
//! - No delete, no range scan, no secondary index
//!
//! Implementations record every `get` in the transaction read set, which is
//! why both methods take `&mut self`.

use thiserror::Error;

/// Result type for state store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// State store failures. All are fatal to the current transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Keys must be non-empty
    #[error("empty key is not allowed")]
    EmptyKey,

    /// Backend read failure
    #[error("failed to read key {key}: {reason}")]
    Read { key: String, reason: String },

    /// Backend write failure
    #[error("failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Per-transaction key-value access.
pub trait StateStore {
    /// Returns the value at `key`, or `None` if it was never written.
    fn get(&mut self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stages `value` at `key`; visible to later reads in this transaction.
    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Returns true if `key` currently holds a value. Counts as a read.
    fn contains(&mut self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
