//! Ledger transactions
//!
//! A transaction reads one snapshot (fixed at `begin`) overlaid with its own
//! staged writes, records the version of every key it read from that
//! snapshot, and publishes its writes only if commit-time validation
//! passes.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::observability::Event;
use crate::query::{QueryCursor, QueryEngine, QueryRecord, QueryResult, Selector};
use crate::state::{StateStore, StoreError, StoreResult};

use super::commit::{CommitId, ReadView};
use super::cursor::MemoryCursor;
use super::errors::CommitError;
use super::validation::validate_read_set;
use super::Ledger;

/// Result of a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Transaction identity
    pub tx_id: Uuid,
    /// Commit identity, or `None` for a read-only transaction
    pub commit_id: Option<CommitId>,
    /// Number of keys written
    pub writes: usize,
}

/// One in-flight ledger transaction.
pub struct Transaction<'a> {
    ledger: &'a Ledger,
    tx_id: Uuid,
    view: ReadView,
    read_set: BTreeMap<String, u64>,
    write_set: BTreeMap<String, Vec<u8>>,
    view_released: bool,
}

impl<'a> Transaction<'a> {
    pub(super) fn new(ledger: &'a Ledger, view: ReadView) -> Self {
        Self {
            ledger,
            tx_id: Uuid::new_v4(),
            view,
            read_set: BTreeMap::new(),
            write_set: BTreeMap::new(),
            view_released: false,
        }
    }

    /// Transaction identity
    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    /// Snapshot this transaction reads
    pub fn read_view(&self) -> ReadView {
        self.view
    }

    /// Keys read from the snapshot, with the version observed (0 = absent)
    pub fn read_set(&self) -> &BTreeMap<String, u64> {
        &self.read_set
    }

    /// Keys staged for write
    pub fn write_keys(&self) -> impl Iterator<Item = &str> {
        self.write_set.keys().map(String::as_str)
    }

    /// Validates the read set and installs the staged writes.
    ///
    /// Read-only transactions always succeed without consuming a commit
    /// identity.
    pub fn commit(mut self) -> Result<CommitOutcome, CommitError> {
        let tx_id = self.tx_id;
        let read_set = std::mem::take(&mut self.read_set);
        let write_set = std::mem::take(&mut self.write_set);

        let writes = write_set.len();
        if writes == 0 {
            return Ok(CommitOutcome {
                tx_id,
                commit_id: None,
                writes,
            });
        }

        let ledger = self.ledger;
        let mut state = ledger.state.lock();
        // Validation reads latest versions only; the view no longer pins history
        state.release_view(self.view);
        self.view_released = true;

        if let Some(conflict) = validate_read_set(&read_set, &state).first_conflict() {
            ledger.metrics.increment_conflicted();
            tracing::info!(
                event = %Event::TxConflict,
                tx_id = %tx_id,
                key = %conflict.key,
                read_version = conflict.read_version,
                current_version = conflict.current_version,
                "transaction rejected at commit"
            );
            return Err(CommitError::Conflict {
                tx_id,
                key: conflict.key.clone(),
                read_version: conflict.read_version,
                current_version: conflict.current_version,
            });
        }

        let commit_id = state
            .apply(write_set)
            .map_err(|source| CommitError::Ordering { tx_id, source })?;
        drop(state);

        ledger.metrics.increment_committed();
        tracing::debug!(
            event = %Event::TxCommitted,
            tx_id = %tx_id,
            commit_id = commit_id.value(),
            writes,
            "transaction committed"
        );

        Ok(CommitOutcome {
            tx_id,
            commit_id: Some(commit_id),
            writes,
        })
    }

    /// Discards staged writes.
    pub fn abort(self) {
        self.ledger.metrics.increment_aborted();
        tracing::debug!(
            event = %Event::TxAborted,
            tx_id = %self.tx_id,
            discarded = self.write_set.len(),
            "transaction aborted"
        );
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.view_released {
            self.ledger.state.lock().release_view(self.view);
        }
    }
}

impl StateStore for Transaction<'_> {
    fn get(&mut self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        // Own writes are not tracked in the read set
        if let Some(value) = self.write_set.get(key) {
            return Ok(Some(value.clone()));
        }

        let (version, value) = {
            let state = self.ledger.state.lock();
            match state.visible(key, self.view) {
                Some(v) => (v.commit_id().value(), Some(v.value().to_vec())),
                None => (0, None),
            }
        };

        // First observation wins; the snapshot cannot change under us
        self.read_set.entry(key.to_string()).or_insert(version);
        Ok(value)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.write_set.insert(key.to_string(), value);
        Ok(())
    }
}

impl QueryEngine for Transaction<'_> {
    /// Evaluates against the snapshot only. Staged writes and matched keys
    /// are not part of the read set (no phantom protection).
    fn query(&mut self, selector: &Selector) -> QueryResult<QueryCursor> {
        let records: Vec<QueryRecord> = {
            let state = self.ledger.state.lock();
            state
                .visible_entries(self.view)
                .filter(|(_, version)| {
                    // Values that are not JSON are never selectable
                    serde_json::from_slice::<Value>(version.value())
                        .map(|doc| selector.matches(&doc))
                        .unwrap_or(false)
                })
                .map(|(key, version)| QueryRecord {
                    key: key.to_string(),
                    value: version.value().to_vec(),
                })
                .collect()
        };

        self.ledger.metrics.increment_queries_executed();
        tracing::debug!(
            event = %Event::QueryExecuted,
            tx_id = %self.tx_id,
            selector = %selector.to_query_string(),
            matches = records.len(),
            "selector query evaluated"
        );

        let cursor = MemoryCursor::new(records, Arc::clone(&self.ledger.metrics));
        Ok(QueryCursor::new(Box::new(cursor)))
    }
}
