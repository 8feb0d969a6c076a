//! In-memory query cursor
//!
//! Results are fully materialised when the query runs; the cursor only
//! hands them out and tracks whether it is still open.

use std::sync::Arc;

use crate::observability::LedgerMetrics;
use crate::query::{QueryError, QueryRecord, QueryResult, ResultsIterator};

/// Cursor over a materialised result set
pub struct MemoryCursor {
    records: std::vec::IntoIter<QueryRecord>,
    metrics: Arc<LedgerMetrics>,
    open: bool,
}

impl MemoryCursor {
    /// Opens a cursor over `records`
    pub fn new(records: Vec<QueryRecord>, metrics: Arc<LedgerMetrics>) -> Self {
        metrics.cursor_opened();
        Self {
            records: records.into_iter(),
            metrics,
            open: true,
        }
    }
}

impl ResultsIterator for MemoryCursor {
    fn next_record(&mut self) -> QueryResult<Option<QueryRecord>> {
        if !self.open {
            return Err(QueryError::Closed);
        }
        Ok(self.records.next())
    }

    fn close(&mut self) -> QueryResult<()> {
        if self.open {
            self.open = false;
            self.metrics.cursor_closed();
        }
        Ok(())
    }
}
