//! recordledger - transactional user and alert records over a versioned
//! key-value ledger
//!
//! Layers, leaves first:
//!
//! - `document`: User and Alert records and their JSON encoding
//! - `state`: per-transaction key-value access
//! - `query`: equality selectors over the document population
//! - `ledger`: in-memory optimistic-concurrency ledger implementing both
//! - `contract`: the record operations
//! - `api`: request envelope and dispatch, one request per transaction
//! - `cli`: init / invoke / start

pub mod api;
pub mod cli;
pub mod contract;
pub mod document;
pub mod ledger;
pub mod observability;
pub mod query;
pub mod state;
