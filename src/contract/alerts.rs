//! Alert operations

use crate::document::{encode, Alert};
use crate::observability::Event;

use super::{Clock, ContractResult, RecordContract, TransactionStub};

impl<C: Clock> RecordContract<C> {
    /// Stores an active alert at key `id`, replacing whatever was there.
    #[allow(clippy::too_many_arguments)]
    pub fn create_alert<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
        id: &str,
        title: &str,
        message: &str,
        severity: &str,
        method: &str,
        created_by: &str,
        recipients: i64,
    ) -> ContractResult<()> {
        let now = self.timestamp();
        let alert = Alert::new(id, title, message, severity, method, created_by, recipients, &now);
        stub.put(id, encode(&alert)?)?;

        tracing::info!(
            event = %Event::AlertCreated,
            id,
            severity,
            recipients,
            "alert created"
        );
        Ok(())
    }

    /// Every alert as one JSON array.
    pub fn get_all_alerts<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
    ) -> ContractResult<String> {
        self.encode_all::<Alert, S>(stub)
    }
}

#[cfg(test)]
mod tests {
    use crate::contract::{ContractErrorCode, ManualClock, RecordContract};
    use crate::ledger::Ledger;
    use crate::state::StateStore;
    use serde_json::Value;

    fn contract() -> RecordContract<ManualClock> {
        RecordContract::with_clock(ManualClock::starting_at("2024-05-01T10:00:00-05:00").unwrap())
    }

    fn alerts(contract: &RecordContract<ManualClock>, ledger: &Ledger) -> Vec<Value> {
        let encoded = contract.get_all_alerts(&mut ledger.begin()).unwrap();
        serde_json::from_str(&encoded).unwrap()
    }

    #[test]
    fn test_create_alert_defaults() {
        let (contract, ledger) = (contract(), Ledger::new());
        ledger
            .submit(|tx| contract.create_alert(tx, "a1", "Flood", "Go uphill", "high", "sms", "u1", 40))
            .unwrap();

        let all = alerts(&contract, &ledger);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["status"], "active");
        assert_eq!(all[0]["recipients"], 40);
        assert_eq!(all[0]["createdBy"], "u1");
        assert_eq!(all[0]["timestamp"], "2024-05-01T10:00:00-05:00");
    }

    #[test]
    fn test_create_alert_overwrites() {
        let (contract, ledger) = (contract(), Ledger::new());
        for title in ["First", "Second"] {
            ledger
                .submit(|tx| contract.create_alert(tx, "a1", title, "m", "low", "email", "u1", 1))
                .unwrap();
        }

        let all = alerts(&contract, &ledger);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["title"], "Second");
    }

    #[test]
    fn test_negative_recipients_accepted() {
        let (contract, ledger) = (contract(), Ledger::new());
        ledger
            .submit(|tx| contract.create_alert(tx, "a1", "t", "m", "low", "email", "u1", -3))
            .unwrap();
        assert_eq!(alerts(&contract, &ledger)[0]["recipients"], -3);
    }

    #[test]
    fn test_get_all_alerts_ignores_users() {
        let (contract, ledger) = (contract(), Ledger::new());
        ledger
            .submit(|tx| contract.create_user(tx, "u1", "A", "a@x.io", "", "", "", ""))
            .unwrap();
        assert!(alerts(&contract, &ledger).is_empty());
    }

    #[test]
    fn test_undecodable_alert_fails_whole_listing() {
        let (contract, ledger) = (contract(), Ledger::new());
        ledger
            .submit(|tx| contract.create_alert(tx, "a1", "t", "m", "low", "email", "u1", 1))
            .unwrap();
        // Right discriminator, wrong shape
        ledger
            .submit(|tx| tx.put("a2", br#"{"docType":"alert","recipients":"many"}"#.to_vec()))
            .unwrap();

        let err = contract.get_all_alerts(&mut ledger.begin()).unwrap_err();
        assert_eq!(err.code(), ContractErrorCode::RecDecodeError);
        assert!(err.message().contains("a2"));
        assert_eq!(ledger.metrics().cursors_open(), 0);
    }
}
