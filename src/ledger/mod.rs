//! In-memory reference ledger for recordledger
//!
//! Provides what the record contract expects from its host: per-transaction
//! key-value access with read-your-own-writes, selector queries over a
//! consistent snapshot, and optimistic concurrency validated at commit.
//!
//! # Transaction Flow
//!
//! 1. `begin` fixes a read view at the highest committed identity
//! 2. Reads record the version they observed; writes are staged
//! 3. `commit` validates the read set against the latest committed versions
//! 4. On success all staged writes land under one new commit identity
//! 5. On conflict nothing is written and the caller resubmits
//!
//! No locks are held between `begin` and `commit`; the world-state mutex
//! only guards individual reads and the validate-and-apply step.
//!
//! A transaction's read view stays registered until it commits, aborts or
//! is dropped. Superseded versions older than the oldest registered view
//! are pruned when their key is next written.

mod checksum;
mod commit;
mod cursor;
mod errors;
mod snapshot;
mod transaction;
mod validation;
mod version;
mod world_state;

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observability::{Event, LedgerMetrics};

pub use commit::{CommitAuthority, CommitAuthorityError, CommitId, ReadView};
pub use cursor::MemoryCursor;
pub use errors::{CommitError, SnapshotError, SnapshotResult, SubmitError};
pub use transaction::{CommitOutcome, Transaction};
pub use validation::{validate_read_set, ReadWriteConflict, ValidationResult};
pub use version::{Version, VersionChain};
pub use world_state::WorldState;

/// Shared, versioned key-value ledger.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<WorldState>,
    metrics: Arc<LedgerMetrics>,
}

impl Ledger {
    /// Empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the ledger from a snapshot file
    pub fn load_snapshot(path: &Path) -> SnapshotResult<Self> {
        let state = snapshot::load(path)?;
        tracing::info!(
            event = %Event::SnapshotLoaded,
            path = %path.display(),
            keys = state.key_count(),
            highest_commit = state.highest_commit_id().value(),
            "ledger restored from snapshot"
        );
        Ok(Self {
            state: Mutex::new(state),
            metrics: Arc::default(),
        })
    }

    /// Writes the latest committed state to `path`
    pub fn save_snapshot(&self, path: &Path) -> SnapshotResult<()> {
        let state = self.state.lock();
        snapshot::save(&state, path)?;
        tracing::debug!(
            event = %Event::SnapshotSaved,
            path = %path.display(),
            highest_commit = state.highest_commit_id().value(),
            "ledger snapshot written"
        );
        Ok(())
    }

    /// Creates an empty snapshot file; fails if `path` already exists
    pub fn init_snapshot(path: &Path) -> SnapshotResult<()> {
        if path.exists() {
            return Err(SnapshotError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        snapshot::save(&WorldState::new(), path)
    }

    /// Starts a transaction reading everything committed so far
    pub fn begin(&self) -> Transaction<'_> {
        let view = self.state.lock().open_view();
        Transaction::new(self, view)
    }

    /// Runs `op` in a fresh transaction and commits it if `op` succeeds.
    ///
    /// A failing `op` aborts the transaction; none of its writes land.
    pub fn submit<T, E, F>(&self, op: F) -> Result<(T, CommitOutcome), SubmitError<E>>
    where
        F: FnOnce(&mut Transaction<'_>) -> Result<T, E>,
    {
        let mut tx = self.begin();
        match op(&mut tx) {
            Ok(value) => {
                let outcome = tx.commit()?;
                Ok((value, outcome))
            }
            Err(e) => {
                tx.abort();
                Err(SubmitError::Aborted(e))
            }
        }
    }

    /// Highest committed identity
    pub fn highest_commit_id(&self) -> CommitId {
        self.state.lock().highest_commit_id()
    }

    /// Latest committed value at `key`, outside any transaction
    pub fn committed_value(&self, key: &str) -> Option<Vec<u8>> {
        self.state.lock().latest(key).map(|v| v.value().to_vec())
    }

    /// Versions retained across all keys
    pub fn version_count(&self) -> usize {
        self.state.lock().version_count()
    }

    /// Operational counters
    pub fn metrics(&self) -> &LedgerMetrics {
        &self.metrics
    }
}
