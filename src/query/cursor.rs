//! Query result cursors
//!
//! Engines hand out results through `ResultsIterator`. Callers hold them
//! through `QueryCursor`, which guarantees the engine cursor is released
//! exactly once: explicitly via `close`, or on drop for early exits and
//! error paths.

use super::errors::QueryResult;

/// One matching document as returned by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Store key of the document
    pub key: String,
    /// Raw document bytes, exactly as stored
    pub value: Vec<u8>,
}

/// Engine-side cursor over query results.
pub trait ResultsIterator {
    /// Returns the next record, or `None` once exhausted.
    fn next_record(&mut self) -> QueryResult<Option<QueryRecord>>;

    /// Releases the cursor. Must be idempotent.
    fn close(&mut self) -> QueryResult<()>;
}

/// Scoped owner of an engine cursor.
pub struct QueryCursor {
    inner: Box<dyn ResultsIterator>,
    closed: bool,
}

impl QueryCursor {
    /// Wraps an engine cursor
    pub fn new(inner: Box<dyn ResultsIterator>) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    /// Closes the cursor, surfacing any release failure
    pub fn close(mut self) -> QueryResult<()> {
        self.closed = true;
        self.inner.close()
    }
}

impl Iterator for QueryCursor {
    type Item = QueryResult<QueryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.inner.next_record().transpose()
    }
}

impl Drop for QueryCursor {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.inner.close() {
            tracing::warn!(error = %e, "failed to release query cursor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingIter {
        remaining: Vec<QueryRecord>,
        closes: Rc<Cell<u32>>,
    }

    impl ResultsIterator for CountingIter {
        fn next_record(&mut self) -> QueryResult<Option<QueryRecord>> {
            Ok(self.remaining.pop())
        }

        fn close(&mut self) -> QueryResult<()> {
            self.closes.set(self.closes.get() + 1);
            Ok(())
        }
    }

    fn cursor(n: usize, closes: &Rc<Cell<u32>>) -> QueryCursor {
        let remaining = (0..n)
            .map(|i| QueryRecord {
                key: format!("k{}", i),
                value: vec![],
            })
            .collect();
        QueryCursor::new(Box::new(CountingIter {
            remaining,
            closes: Rc::clone(closes),
        }))
    }

    #[test]
    fn test_explicit_close_releases_once() {
        let closes = Rc::new(Cell::new(0));
        let mut c = cursor(2, &closes);
        assert!(c.next().is_some());
        c.close().unwrap();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_drop_releases_unclosed_cursor() {
        let closes = Rc::new(Cell::new(0));
        {
            let mut c = cursor(3, &closes);
            let _ = c.next();
        }
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn test_iterates_all_records() {
        let closes = Rc::new(Cell::new(0));
        let c = cursor(3, &closes);
        assert_eq!(c.count(), 3);
        assert_eq!(closes.get(), 1);
    }
}
