//! User domain types: pure data, no I/O, no async.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of login records returned by history queries.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// One successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRecord {
    /// Dotted-quad IPv4 address of the client.
    pub ip: String,
    pub timestamp: DateTime<Utc>,
}

/// A registered user. The password is never stored in clear text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Normalised (trimmed, lowercase) email address.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub login_records: Vec<LoginRecord>,
    pub created: DateTime<Utc>,
}

impl User {
    pub fn add_login_record(&mut self, ip: &str, at: DateTime<Utc>) {
        self.login_records.push(LoginRecord {
            ip: ip.to_string(),
            timestamp: at,
        });
    }

    /// Login records newest first, at most `limit` of them.
    #[must_use]
    pub fn recent_logins(&self, limit: usize) -> Vec<LoginRecord> {
        let mut records = self.login_records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        records
    }

    #[must_use]
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.login_records.iter().map(|r| r.timestamp).max()
    }
}

/// Sign-up / sign-in input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

/// Validated fields handed to the store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub created: DateTime<Utc>,
}

/// Per-user activity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub email: String,
    pub total_logins: usize,
    pub last_login: Option<DateTime<Utc>>,
}
