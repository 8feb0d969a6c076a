//! User operations

use crate::document::{decode, encode, fold_email, CodecError, DocType, User};
use crate::observability::Event;
use crate::query::Selector;

use super::{Clock, ContractError, ContractResult, RecordContract, TransactionStub};

fn into_text(key: &str, bytes: Vec<u8>) -> ContractResult<String> {
    String::from_utf8(bytes).map_err(|_| {
        CodecError::InvalidUtf8 {
            key: key.to_string(),
        }
        .into()
    })
}

impl<C: Clock> RecordContract<C> {
    /// Creates a user at key `id`. Fails if anything is already stored there.
    ///
    /// `email` is stored lower-cased. Email uniqueness is not checked.
    #[allow(clippy::too_many_arguments)]
    pub fn create_user<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
        id: &str,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
        role: &str,
        status: &str,
    ) -> ContractResult<()> {
        if stub.contains(id)? {
            return Err(ContractError::already_exists(DocType::User, id));
        }

        let now = self.timestamp();
        let user = User::new(id, name, email, phone, password, role, status, &now);
        stub.put(id, encode(&user)?)?;

        tracing::info!(event = %Event::UserCreated, id, role, "user created");
        Ok(())
    }

    /// Returns the stored user document at `id` verbatim.
    pub fn read_user<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
        id: &str,
    ) -> ContractResult<String> {
        match stub.get(id)? {
            Some(bytes) => into_text(id, bytes),
            None => Err(ContractError::not_found(format!("user {}", id))),
        }
    }

    /// Returns the first user (in engine order) whose email matches,
    /// compared lower-cased.
    ///
    /// With duplicate emails the result depends on engine order; the
    /// reference ledger returns the lowest key.
    pub fn get_user_by_email<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
        email: &str,
    ) -> ContractResult<String> {
        let email = fold_email(email);
        let selector = Selector::for_type(DocType::User).filter_eq("email", email.as_str());

        let mut cursor = stub.query(&selector)?;
        let first = cursor.next().transpose()?;
        cursor.close()?;

        match first {
            Some(record) => into_text(&record.key, record.value),
            None => Err(ContractError::not_found(format!(
                "user with email {}",
                email
            ))),
        }
    }

    /// Every user as one JSON array.
    pub fn get_all_users<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
    ) -> ContractResult<String> {
        self.encode_all::<User, S>(stub)
    }

    /// Sets `lastLogin` and `updatedAt` of user `id` to now.
    pub fn update_user_last_login<S: TransactionStub + ?Sized>(
        &self,
        stub: &mut S,
        id: &str,
    ) -> ContractResult<()> {
        let bytes = stub
            .get(id)?
            .ok_or_else(|| ContractError::not_found(format!("user {}", id)))?;
        let mut user: User = decode(id, &bytes)?;

        let now = self.timestamp();
        user.record_login(&now);
        stub.put(id, encode(&user)?)?;

        tracing::info!(event = %Event::UserLoginRecorded, id, at = %now, "user login recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::contract::{ContractErrorCode, ManualClock, RecordContract};
    use crate::ledger::Ledger;
    use crate::state::StateStore;
    use chrono::Duration;
    use serde_json::Value;

    fn contract() -> RecordContract<ManualClock> {
        RecordContract::with_clock(ManualClock::starting_at("2024-05-01T10:00:00Z").unwrap())
    }

    fn create(contract: &RecordContract<ManualClock>, ledger: &Ledger, id: &str, email: &str) {
        ledger
            .submit(|tx| contract.create_user(tx, id, "Ana", email, "555", "pw", "admin", "active"))
            .unwrap();
    }

    #[test]
    fn test_create_then_read() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "Ana@X.io");

        let mut tx = ledger.begin();
        let doc: Value = serde_json::from_str(&contract.read_user(&mut tx, "u1").unwrap()).unwrap();
        assert_eq!(doc["email"], "ana@x.io");
        assert_eq!(doc["docType"], "user");
        assert_eq!(doc["createdAt"], "2024-05-01T10:00:00Z");
        assert_eq!(doc["lastLogin"], "");
    }

    #[test]
    fn test_create_existing_id_rejected() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "a@x.io");

        let mut tx = ledger.begin();
        let err = contract
            .create_user(&mut tx, "u1", "Other", "b@x.io", "", "", "", "")
            .unwrap_err();
        assert_eq!(err.code(), ContractErrorCode::RecAlreadyExists);
        assert!(err.message().contains("u1"));
    }

    #[test]
    fn test_create_in_same_transaction_sees_own_write() {
        let (contract, ledger) = (contract(), Ledger::new());
        let mut tx = ledger.begin();
        contract
            .create_user(&mut tx, "u1", "A", "a@x.io", "", "", "", "")
            .unwrap();
        let err = contract
            .create_user(&mut tx, "u1", "A", "a@x.io", "", "", "", "")
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_read_missing_user() {
        let (contract, ledger) = (contract(), Ledger::new());
        let err = contract.read_user(&mut ledger.begin(), "ghost").unwrap_err();
        assert_eq!(err.code(), ContractErrorCode::RecNotFound);
        assert!(err.message().contains("ghost"));
    }

    #[test]
    fn test_read_user_returns_stored_bytes_verbatim() {
        let (contract, ledger) = (contract(), Ledger::new());
        let raw = r#"{"docType":"user","id":"u7","extra":true}"#;
        ledger
            .submit(|tx| tx.put("u7", raw.as_bytes().to_vec()))
            .unwrap();
        assert_eq!(contract.read_user(&mut ledger.begin(), "u7").unwrap(), raw);
    }

    #[test]
    fn test_lookup_by_email_is_case_insensitive() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "Ana@X.io");

        let found = contract
            .get_user_by_email(&mut ledger.begin(), "ANA@x.IO")
            .unwrap();
        let doc: Value = serde_json::from_str(&found).unwrap();
        assert_eq!(doc["id"], "u1");
        assert_eq!(ledger.metrics().cursors_open(), 0);
    }

    #[test]
    fn test_lookup_by_unknown_email() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "a@x.io");
        let err = contract
            .get_user_by_email(&mut ledger.begin(), "b@x.io")
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.message().contains("b@x.io"));
        assert_eq!(ledger.metrics().cursors_open(), 0);
    }

    #[test]
    fn test_duplicate_emails_return_lowest_key() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u2", "dup@x.io");
        create(&contract, &ledger, "u1", "dup@x.io");

        let found = contract
            .get_user_by_email(&mut ledger.begin(), "dup@x.io")
            .unwrap();
        let doc: Value = serde_json::from_str(&found).unwrap();
        assert_eq!(doc["id"], "u1");
    }

    #[test]
    fn test_update_last_login() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "a@x.io");
        contract.clock().advance(Duration::seconds(5));

        ledger
            .submit(|tx| contract.update_user_last_login(tx, "u1"))
            .unwrap();

        let doc: Value =
            serde_json::from_str(&contract.read_user(&mut ledger.begin(), "u1").unwrap()).unwrap();
        assert_eq!(doc["lastLogin"], "2024-05-01T10:00:05Z");
        assert_eq!(doc["updatedAt"], doc["lastLogin"]);
        assert_eq!(doc["createdAt"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_update_missing_user() {
        let (contract, ledger) = (contract(), Ledger::new());
        let err = contract
            .update_user_last_login(&mut ledger.begin(), "ghost")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_undecodable_user() {
        let (contract, ledger) = (contract(), Ledger::new());
        ledger.submit(|tx| tx.put("u1", b"{oops".to_vec())).unwrap();
        let err = contract
            .update_user_last_login(&mut ledger.begin(), "u1")
            .unwrap_err();
        assert_eq!(err.code(), ContractErrorCode::RecDecodeError);
    }

    #[test]
    fn test_get_all_users_empty() {
        let (contract, ledger) = (contract(), Ledger::new());
        assert_eq!(contract.get_all_users(&mut ledger.begin()).unwrap(), "[]");
    }

    #[test]
    fn test_user_without_last_login_is_listed_and_updated() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "a@x.io");
        let legacy = r#"{"docType":"user","id":"u2","name":"Bo","email":"bo@x.io","phone":"","password":"","role":"viewer","status":"active","createdAt":"","updatedAt":""}"#;
        ledger
            .submit(|tx| tx.put("u2", legacy.as_bytes().to_vec()))
            .unwrap();

        let all: Value =
            serde_json::from_str(&contract.get_all_users(&mut ledger.begin()).unwrap()).unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);
        assert_eq!(all[1]["lastLogin"], "");

        ledger
            .submit(|tx| contract.update_user_last_login(tx, "u2"))
            .unwrap();
        let doc: Value =
            serde_json::from_str(&contract.read_user(&mut ledger.begin(), "u2").unwrap()).unwrap();
        assert_eq!(doc["lastLogin"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_lookup_folds_email_per_character() {
        let (contract, ledger) = (contract(), Ledger::new());
        create(&contract, &ledger, "u1", "İSA@X.IO");

        let found = contract
            .get_user_by_email(&mut ledger.begin(), "isa@x.io")
            .unwrap();
        let doc: Value = serde_json::from_str(&found).unwrap();
        assert_eq!(doc["email"], "isa@x.io");
    }
}
