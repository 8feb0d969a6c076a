//! API Handler for recordledger
//!
//! Runs each request as one ledger transaction through the record
//! contract. Takes no lock of its own: concurrent requests race
//! optimistically and losers are reported as `REC_COMMIT_CONFLICT`.

use serde_json::Value;

use crate::contract::{Clock, ContractResult, RecordContract, SystemClock};
use crate::ledger::{CommitOutcome, Ledger, SubmitError, Transaction};
use crate::observability::Event;

use super::errors::{ApiError, ApiResult};
use super::request::Request;
use super::response::Response;

/// Result of an executed request
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    /// Operation payload as JSON (`null` for operations without a result)
    pub data: Value,
    /// Commit details of the transaction
    pub outcome: CommitOutcome,
}

/// Request entry point bound to one ledger
pub struct ApiHandler<'a, C: Clock = SystemClock> {
    ledger: &'a Ledger,
    contract: RecordContract<C>,
}

impl<'a> ApiHandler<'a, SystemClock> {
    /// Handler stamping records with local wall-clock time
    pub fn new(ledger: &'a Ledger) -> Self {
        Self::with_contract(ledger, RecordContract::new())
    }
}

impl<'a, C: Clock> ApiHandler<'a, C> {
    pub fn with_contract(ledger: &'a Ledger, contract: RecordContract<C>) -> Self {
        Self { ledger, contract }
    }

    pub fn ledger(&self) -> &Ledger {
        self.ledger
    }

    pub fn contract(&self) -> &RecordContract<C> {
        &self.contract
    }

    /// Handle a raw JSON request string
    pub fn handle(&self, json_request: &str) -> Response {
        let result = Request::parse(json_request).and_then(|request| self.execute(request));

        match result {
            Ok(executed) => Response::success(executed.data),
            Err(e) => {
                tracing::info!(
                    event = %Event::RequestRejected,
                    code = e.code(),
                    message = e.message(),
                    "request failed"
                );
                Response::error(&e)
            }
        }
    }

    /// Runs a parsed request in a fresh transaction
    pub fn execute(&self, request: Request) -> ApiResult<Executed> {
        let function = request.function();

        match self.ledger.submit(|tx| self.dispatch(tx, request)) {
            Ok((payload, outcome)) => {
                tracing::debug!(
                    event = %Event::TxSubmitted,
                    function = function.name(),
                    tx_id = %outcome.tx_id,
                    commit_id = outcome.commit_id.map(|id| id.value()),
                    "request executed"
                );
                Ok(Executed {
                    data: payload.map(into_json).unwrap_or(Value::Null),
                    outcome,
                })
            }
            Err(SubmitError::Aborted(e)) => Err(ApiError::from_contract_error(e)),
            Err(SubmitError::Commit(e)) => Err(ApiError::from_commit_error(e)),
        }
    }

    #[allow(deprecated)]
    fn dispatch(&self, tx: &mut Transaction<'_>, request: Request) -> ContractResult<Option<String>> {
        let contract = &self.contract;
        match request {
            Request::CreateUser(r) => contract
                .create_user(tx, &r.id, &r.name, &r.email, &r.phone, &r.password, &r.role, &r.status)
                .map(|_| None),
            Request::ReadUser { id } => contract.read_user(tx, &id).map(Some),
            Request::GetUserByEmail { email } => contract.get_user_by_email(tx, &email).map(Some),
            Request::GetAllUsers => contract.get_all_users(tx).map(Some),
            Request::UpdateUserLastLogin { id } => {
                contract.update_user_last_login(tx, &id).map(|_| None)
            }
            Request::CreateAlert(r) => contract
                .create_alert(
                    tx,
                    &r.id,
                    &r.title,
                    &r.message,
                    &r.severity,
                    &r.method,
                    &r.created_by,
                    r.recipients,
                )
                .map(|_| None),
            Request::GetAllAlerts => contract.get_all_alerts(tx).map(Some),
            Request::CreateAsset(r) => contract
                .create_asset(&r.id, &r.color, r.size, &r.owner, r.appraised_value)
                .map(|_| None),
        }
    }
}

/// Operation payloads are JSON text; anything else is passed as a string.
fn into_json(payload: String) -> Value {
    match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(_) => Value::String(payload),
    }
}
