//! Selector Query Engine interface for recordledger
//!
//! Field-based reads over the whole document population, used where a key
//! lookup cannot answer the question ("the user with this email", "every
//! alert").
//!
//! # Design Principles
//!
//! - Selectors are equality-only and always scoped by `docType`
//! - Full evaluation at query time, no caching
//! - Results arrive through a cursor that is always released

mod cursor;
mod errors;
mod filter;
mod selector;

pub use cursor::{QueryCursor, QueryRecord, ResultsIterator};
pub use errors::{QueryError, QueryResult};
pub use filter::PredicateFilter;
pub use selector::{Predicate, Selector, DOC_TYPE_FIELD};

/// Evaluates selectors against the document population visible to the
/// current transaction.
pub trait QueryEngine {
    /// Runs `selector`, returning matches in an order that is deterministic
    /// for a given snapshot.
    fn query(&mut self, selector: &Selector) -> QueryResult<QueryCursor>;
}
