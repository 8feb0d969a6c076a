//! Lifecycle and operation event names
//!
//! Every structured log line carries one of these as its `event` field, so
//! log consumers can filter on a fixed vocabulary instead of message text.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    // Boot & lifecycle
    BootStart,
    BootComplete,
    ConfigLoaded,
    Serving,
    ShutdownComplete,

    // Snapshot
    SnapshotCreated,
    SnapshotLoaded,
    SnapshotSaved,

    // Transactions
    TxSubmitted,
    TxCommitted,
    TxConflict,
    TxAborted,

    // Query
    QueryExecuted,

    // Contract
    UserCreated,
    UserLoginRecorded,
    AlertCreated,
    DeprecatedCall,

    // Request surface
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "RECORDLEDGER_STARTUP_BEGIN",
            Event::BootComplete => "RECORDLEDGER_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "RECORDLEDGER_SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::SnapshotCreated => "SNAPSHOT_CREATED",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::SnapshotSaved => "SNAPSHOT_SAVED",

            Event::TxSubmitted => "TX_SUBMITTED",
            Event::TxCommitted => "TX_COMMITTED",
            Event::TxConflict => "TX_CONFLICT",
            Event::TxAborted => "TX_ABORTED",

            Event::QueryExecuted => "QUERY_COMPLETE",

            Event::UserCreated => "USER_CREATED",
            Event::UserLoginRecorded => "USER_LOGIN_RECORDED",
            Event::AlertCreated => "ALERT_CREATED",
            Event::DeprecatedCall => "DEPRECATED_CALL",

            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
