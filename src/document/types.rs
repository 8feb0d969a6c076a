//! Document shapes stored in the world state
//!
//! Field declaration order is the persisted JSON order.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Status assigned to every alert at creation.
pub const ALERT_STATUS_ACTIVE: &str = "active";

/// Kind discriminator carried by every stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    User,
    Alert,
}

impl DocType {
    /// Returns the persisted tag
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::User => "user",
            DocType::Alert => "alert",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that can be stored under a single key and scoped by `docType`.
pub trait Document: Serialize + DeserializeOwned {
    /// Kind every instance of this type carries
    const DOC_TYPE: DocType;

    /// Store key of this document
    fn key(&self) -> &str;

    /// Discriminator as read from the document itself
    fn doc_type(&self) -> DocType;
}

/// Formats a timestamp the way records persist it: RFC 3339, whole
/// seconds, `Z` for UTC.
pub fn format_timestamp(at: DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Lower-cases an email one character at a time with the simple
/// per-character mapping, so `İ` folds to `i` and a final `Σ` to `σ`.
pub fn fold_email(email: &str) -> String {
    email
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// A registered user.
///
/// `email` is always lower-case once constructed through `User::new`.
/// `password` is stored exactly as given. Fields other than `docType` that
/// a stored document lacks decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "docType")]
    doc_type: DocType,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: String,
    #[serde(rename = "lastLogin", default)]
    pub last_login: String,
}

impl User {
    /// Creates a fresh user: email case-folded, `createdAt` = `updatedAt` =
    /// `now`, no login recorded yet.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: &str,
        phone: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
        status: impl Into<String>,
        now: &str,
    ) -> Self {
        Self {
            doc_type: DocType::User,
            id: id.into(),
            name: name.into(),
            email: fold_email(email),
            phone: phone.into(),
            password: password.into(),
            role: role.into(),
            status: status.into(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
            last_login: String::new(),
        }
    }

    /// Records a login at `now`; `updatedAt` moves with it.
    pub fn record_login(&mut self, now: &str) {
        self.last_login = now.to_string();
        self.updated_at = self.last_login.clone();
    }
}

impl Document for User {
    const DOC_TYPE: DocType = DocType::User;

    fn key(&self) -> &str {
        &self.id
    }

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}

/// A broadcast alert. Missing fields other than `docType` decode as
/// empty (or zero recipients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "docType")]
    doc_type: DocType,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub method: String,
    #[serde(rename = "createdBy", default)]
    pub created_by: String,
    #[serde(default)]
    pub recipients: i64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub status: String,
}

impl Alert {
    /// Creates an active alert stamped with `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
        method: impl Into<String>,
        created_by: impl Into<String>,
        recipients: i64,
        now: &str,
    ) -> Self {
        Self {
            doc_type: DocType::Alert,
            id: id.into(),
            title: title.into(),
            message: message.into(),
            severity: severity.into(),
            method: method.into(),
            created_by: created_by.into(),
            recipients,
            timestamp: now.to_string(),
            status: ALERT_STATUS_ACTIVE.to_string(),
        }
    }
}

impl Document for Alert {
    const DOC_TYPE: DocType = DocType::Alert;

    fn key(&self) -> &str {
        &self.id
    }

    fn doc_type(&self) -> DocType {
        self.doc_type
    }
}
