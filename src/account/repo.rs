//! Durable store contracts and their Postgres implementations.
//!
//! The service only sees the [`AccountStore`] and [`VerificationStore`]
//! traits, so tests substitute in-memory fakes. The Postgres implementations
//! carry the two invariants the application never re-checks in memory:
//! email uniqueness and at-most-one-pending-code, both unique indexes.
//!
//! TTL expiry is a lazy-expiry-on-read contract: reads filter on
//! `created_at`, so a row older than the TTL is indistinguishable from a row
//! that never existed. Expired rows are swept opportunistically on the next
//! write for the same account; no background process is involved.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

use crate::account::models::{Account, NewAccount, PendingVerification};

/// Outcome of inserting a new account against the unique email index.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(Account),
    DuplicateEmail,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Insert a new account (always unverified). Two concurrent inserts with
    /// the same email race on the store; exactly one observes `Created`.
    async fn insert(&self, account: NewAccount) -> Result<InsertOutcome>;

    /// Persist mutable fields of an existing account (the verified flip).
    async fn save(&self, account: &Account) -> Result<Account>;
}

#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Insert a pending record for the account. Fails if a live record
    /// already exists; callers check-then-insert, the unique index settles
    /// races.
    async fn put(&self, account_id: Uuid, otp_hash: &str) -> Result<PendingVerification>;

    /// Fetch the live (unexpired) record for the account, if any.
    async fn get(&self, account_id: Uuid) -> Result<Option<PendingVerification>>;

    /// Idempotent removal by record id.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn query_span(operation: &str, statement: &str) -> tracing::Span {
    tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = operation,
        db.statement = statement
    )
}

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let query = "SELECT id, first_name, last_name, email, password_hash, verified, created_at \
                     FROM accounts WHERE email = $1";
        sqlx::query_as::<_, Account>(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to look up account by email")
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let query = "SELECT id, first_name, last_name, email, password_hash, verified, created_at \
                     FROM accounts WHERE id = $1";
        sqlx::query_as::<_, Account>(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to look up account by id")
    }

    async fn insert(&self, account: NewAccount) -> Result<InsertOutcome> {
        let query = r"
            INSERT INTO accounts (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, password_hash, verified, created_at
        ";
        let row = sqlx::query_as::<_, Account>(query)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .fetch_one(&self.pool)
            .instrument(query_span("INSERT", query))
            .await;

        match row {
            Ok(created) => Ok(InsertOutcome::Created(created)),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::DuplicateEmail),
            Err(err) => Err(err).context("failed to insert account"),
        }
    }

    async fn save(&self, account: &Account) -> Result<Account> {
        let query = r"
            UPDATE accounts
            SET first_name = $2, last_name = $3, verified = $4
            WHERE id = $1
            RETURNING id, first_name, last_name, email, password_hash, verified, created_at
        ";
        sqlx::query_as::<_, Account>(query)
            .bind(account.id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.verified)
            .fetch_one(&self.pool)
            .instrument(query_span("UPDATE", query))
            .await
            .context("failed to save account")
    }
}

#[derive(Clone)]
pub struct PgVerificationStore {
    pool: PgPool,
    ttl: Duration,
}

impl PgVerificationStore {
    #[must_use]
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    fn ttl_secs(&self) -> f64 {
        self.ttl.as_secs_f64()
    }
}

#[async_trait]
impl VerificationStore for PgVerificationStore {
    async fn put(&self, account_id: Uuid, otp_hash: &str) -> Result<PendingVerification> {
        // Sweep any expired row first so the unique index only rejects a
        // genuinely live record.
        let mut tx = self
            .pool
            .begin()
            .await
            .context("begin pending-verification transaction")?;

        let sweep = "DELETE FROM pending_verifications \
                     WHERE account_id = $1 AND created_at <= now() - make_interval(secs => $2)";
        sqlx::query(sweep)
            .bind(account_id)
            .bind(self.ttl_secs())
            .execute(&mut *tx)
            .instrument(query_span("DELETE", sweep))
            .await
            .context("failed to sweep expired verification record")?;

        let insert = r"
            INSERT INTO pending_verifications (account_id, otp_hash)
            VALUES ($1, $2)
            RETURNING id, account_id, otp_hash, created_at
        ";
        let record = sqlx::query_as::<_, PendingVerification>(insert)
            .bind(account_id)
            .bind(otp_hash)
            .fetch_one(&mut *tx)
            .instrument(query_span("INSERT", insert))
            .await
            .context("failed to insert pending verification record")?;

        tx.commit()
            .await
            .context("commit pending-verification transaction")?;

        Ok(record)
    }

    async fn get(&self, account_id: Uuid) -> Result<Option<PendingVerification>> {
        let query = "SELECT id, account_id, otp_hash, created_at FROM pending_verifications \
                     WHERE account_id = $1 AND created_at > now() - make_interval(secs => $2)";
        sqlx::query_as::<_, PendingVerification>(query)
            .bind(account_id)
            .bind(self.ttl_secs())
            .fetch_optional(&self.pool)
            .instrument(query_span("SELECT", query))
            .await
            .context("failed to look up pending verification record")
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let query = "DELETE FROM pending_verifications WHERE id = $1";
        sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .instrument(query_span("DELETE", query))
            .await
            .context("failed to delete pending verification record")?;

        Ok(())
    }
}
