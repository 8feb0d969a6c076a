//! Ledger error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use super::commit::CommitAuthorityError;

/// Commit rejection. The transaction's staged writes are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// A key in the read set changed after it was read; resubmit.
    #[error(
        "transaction {tx_id} conflicts on key {key}: read version {read_version}, current version {current_version}"
    )]
    Conflict {
        tx_id: Uuid,
        key: String,
        read_version: u64,
        current_version: u64,
    },

    /// Commit identity could not be assigned
    #[error("transaction {tx_id} could not be ordered: {source}")]
    Ordering {
        tx_id: Uuid,
        #[source]
        source: CommitAuthorityError,
    },
}

impl CommitError {
    /// Returns true if resubmitting the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommitError::Conflict { .. })
    }
}

/// Outcome of `Ledger::submit`.
#[derive(Debug, Error)]
pub enum SubmitError<E> {
    /// The operation itself failed; nothing was committed
    #[error("{0}")]
    Aborted(E),

    /// The operation succeeded but its transaction was rejected at commit
    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Result type for snapshot persistence
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot file failures. Loading failures are fatal at startup.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem failure
    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not a snapshot or its body is malformed
    #[error("malformed snapshot {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    /// Body does not match its recorded checksum
    #[error("snapshot {path} checksum mismatch: expected {expected:08x}, computed {actual:08x}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },

    /// Target already exists (init)
    #[error("snapshot {path} already exists")]
    AlreadyExists { path: PathBuf },
}
