//! Record contract for recordledger
//!
//! Per-kind operations over `User` and `Alert` documents. Each operation
//! runs inside one ledger transaction that the caller passes in; the
//! contract keeps no state of its own beyond a clock.
//!
//! # Concurrency
//!
//! Check-then-write sequences (the existence check in `create_user`, the
//! read-modify-write in `update_user_last_login`) take no locks. Every
//! `get` lands in the transaction's read set, so a concurrent writer to the
//! same key causes the commit to be rejected and resubmitted.
//!
//! # Cursors
//!
//! Query cursors are closed explicitly on success and released on drop on
//! every early return.

mod alerts;
mod clock;
mod compat;
mod errors;
mod users;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::{ContractError, ContractErrorCode, ContractResult};

use crate::document::{decode_collection, encode_collection, format_timestamp, Document};
use crate::query::{QueryEngine, QueryRecord, Selector};
use crate::state::StateStore;

/// Everything an operation needs from its host transaction.
pub trait TransactionStub: StateStore + QueryEngine {}

impl<T: StateStore + QueryEngine + ?Sized> TransactionStub for T {}

/// The record contract. Stateless apart from its time source.
#[derive(Debug, Clone, Default)]
pub struct RecordContract<C: Clock = SystemClock> {
    clock: C,
}

impl RecordContract<SystemClock> {
    /// Contract stamping records with local wall-clock time
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> RecordContract<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn timestamp(&self) -> String {
        format_timestamp(self.clock.now())
    }

    /// Every document of kind `D`, re-encoded as one JSON array.
    ///
    /// All-or-nothing: one undecodable document fails the whole call.
    fn encode_all<D, S>(&self, stub: &mut S) -> ContractResult<String>
    where
        D: Document,
        S: TransactionStub + ?Sized,
    {
        let mut cursor = stub.query(&Selector::for_type(D::DOC_TYPE))?;
        let records = cursor.by_ref().collect::<Result<Vec<QueryRecord>, _>>()?;
        cursor.close()?;

        let docs: Vec<D> = decode_collection(
            records
                .iter()
                .map(|r| (r.key.as_str(), r.value.as_slice())),
        )?;
        Ok(encode_collection(&docs)?)
    }
}
