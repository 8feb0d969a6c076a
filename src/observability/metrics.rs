//! Ledger counters
//!
//! Counters only, monotonic, reset on process start. The number of open
//! cursors is derived from the opened and closed counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by a ledger and its cursors
///
/// Relaxed ordering throughout; values are exact once the ledger is idle.
#[derive(Debug, Default)]
pub struct LedgerMetrics {
    transactions_committed: AtomicU64,
    transactions_conflicted: AtomicU64,
    transactions_aborted: AtomicU64,
    queries_executed: AtomicU64,
    cursors_opened: AtomicU64,
    cursors_closed: AtomicU64,
}

impl LedgerMetrics {
    /// All counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_committed(&self) {
        self.transactions_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_conflicted(&self) {
        self.transactions_conflicted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_aborted(&self) {
        self.transactions_aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cursor_opened(&self) {
        self.cursors_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cursor_closed(&self) {
        self.cursors_closed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn transactions_committed(&self) -> u64 {
        self.transactions_committed.load(Ordering::Relaxed)
    }

    pub fn transactions_conflicted(&self) -> u64 {
        self.transactions_conflicted.load(Ordering::Relaxed)
    }

    pub fn transactions_aborted(&self) -> u64 {
        self.transactions_aborted.load(Ordering::Relaxed)
    }

    pub fn queries_executed(&self) -> u64 {
        self.queries_executed.load(Ordering::Relaxed)
    }

    /// Cursors opened and not yet closed
    pub fn cursors_open(&self) -> u64 {
        let opened = self.cursors_opened.load(Ordering::Relaxed);
        let closed = self.cursors_closed.load(Ordering::Relaxed);
        opened.saturating_sub(closed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            transactions_committed: self.transactions_committed(),
            transactions_conflicted: self.transactions_conflicted(),
            transactions_aborted: self.transactions_aborted(),
            queries_executed: self.queries_executed(),
            cursors_open: self.cursors_open(),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub transactions_committed: u64,
    pub transactions_conflicted: u64,
    pub transactions_aborted: u64,
    pub queries_executed: u64,
    pub cursors_open: u64,
}
