//! Commit identities and the authority that hands them out
//!
//! Commit identities totally order every committed transaction. They are
//! assigned exactly once, strictly increasing, and survive snapshot reload.

use serde::{Deserialize, Serialize};

/// A totally ordered, opaque commit identity.
///
/// `CommitId::new(0)` denotes the empty ledger: nothing is committed at or
/// below it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(u64);

impl CommitId {
    /// Creates a new CommitId with the given value.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A stable snapshot boundary: every version with a commit id above
/// `upper_bound` is invisible to the transaction holding this view.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReadView {
    read_upper_bound: CommitId,
}

impl ReadView {
    /// Creates a read view with the given upper bound.
    #[inline]
    pub fn new(upper_bound: CommitId) -> Self {
        Self {
            read_upper_bound: upper_bound,
        }
    }

    /// Returns the upper bound commit identity.
    #[inline]
    pub fn upper_bound(&self) -> CommitId {
        self.read_upper_bound
    }
}

/// Tracks the highest commit identity and assigns the next one.
#[derive(Debug, Default)]
pub struct CommitAuthority {
    highest_commit_id: u64,
}

impl CommitAuthority {
    /// Authority for an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authority resuming after `commit_id` (snapshot reload).
    pub fn from_replayed_commit(commit_id: CommitId) -> Self {
        Self {
            highest_commit_id: commit_id.value(),
        }
    }

    /// Returns the identity the next commit will receive.
    pub fn next_commit_id(&self) -> CommitId {
        CommitId::new(self.highest_commit_id + 1)
    }

    /// Records `commit_id` as committed. Must be exactly `next_commit_id()`.
    pub fn mark_committed(&mut self, commit_id: CommitId) -> Result<(), CommitAuthorityError> {
        let id_value = commit_id.value();
        if id_value != self.highest_commit_id + 1 {
            return Err(CommitAuthorityError::OutOfOrder {
                attempted: id_value,
                expected: self.highest_commit_id + 1,
            });
        }
        self.highest_commit_id = id_value;
        Ok(())
    }

    /// Returns the highest committed identity (zero for an empty ledger).
    pub fn highest_commit_id(&self) -> CommitId {
        CommitId::new(self.highest_commit_id)
    }

    /// Read view over everything committed so far.
    pub fn current_snapshot(&self) -> ReadView {
        ReadView::new(self.highest_commit_id())
    }
}

/// Errors from commit authority operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitAuthorityError {
    /// Attempted to commit out of order.
    #[error("out of order commit: attempted {attempted} but expected {expected}")]
    OutOfOrder { attempted: u64, expected: u64 },
}
