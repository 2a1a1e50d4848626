use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use uuid::Uuid;

/// A stored account. The password hash never leaves this module's callers;
/// anything returned to the HTTP boundary goes through [`AccountSummary`].
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for Account {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            verified: row.try_get("verified")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl Account {
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            verified: self.verified,
        }
    }

    /// Claims signed into the session token on successful authentication.
    #[must_use]
    pub fn session_claims(&self) -> SessionClaims {
        SessionClaims {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            verified: self.verified,
            exp: None,
        }
    }
}

/// Fields required to insert a new account (always unverified).
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Sanitized view of an account, safe to return to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub verified: bool,
}

/// Ephemeral claim set signed into the session token. Not persisted.
///
/// `exp` is only present when a session TTL is configured; the source system
/// issued tokens without an expiry claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub first_name: String,
    pub last_name: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// A live OTP record bound to an unverified account. At most one exists per
/// account; rows past the store TTL are unreadable.
#[derive(Debug, Clone)]
pub struct PendingVerification {
    pub id: Uuid,
    pub account_id: Uuid,
    pub otp_hash: String,
    pub created_at: DateTime<Utc>,
}

impl<'r> FromRow<'r, PgRow> for PendingVerification {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            account_id: row.try_get("account_id")?,
            otp_hash: row.try_get("otp_hash")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
