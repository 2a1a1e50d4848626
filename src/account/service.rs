//! The account state machine: sign-up, OTP confirmation, sign-in.
//!
//! Each operation is a short linear protocol over the injected stores. No
//! in-process mutable state is shared between requests; uniqueness and the
//! one-pending-code rule are settled by the store, so concurrent requests
//! need no application-level locking.
//!
//! Partial-failure policy: writes that already landed stay. If the
//! notification dispatch fails after sign-up persisted the account and its
//! pending code, the caller sees the generic error and recovers by signing
//! in once the code expires, which issues a fresh one.

use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::account::crypto::{self, TokenIssuer, DEFAULT_BCRYPT_COST};
use crate::account::error::AuthError;
use crate::account::models::{AccountSummary, NewAccount};
use crate::account::repo::{AccountStore, InsertOutcome, VerificationStore};
use crate::account::validate::{strong_password, valid_email};
use crate::email::{verification_email, EmailMessage, EmailSender};

const DEFAULT_NOTIFY_TIMEOUT_SECONDS: u64 = 10;

const MSG_EMPTY_FIELDS: &str = "Fields should not be empty";
const MSG_INVALID_EMAIL: &str = "Please enter a valid email";
const MSG_PASSWORD_MISMATCH: &str = "Both passwords should match";
const MSG_WEAK_PASSWORD: &str = "Password not meet the criteria, it must include a length of 8 \
                                 or more characters, 1 uppercase letter and 1 symbol";

#[derive(Clone, Copy, Debug)]
pub struct AccountConfig {
    bcrypt_cost: u32,
    notify_timeout: Duration,
}

impl AccountConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            notify_timeout: Duration::from_secs(DEFAULT_NOTIFY_TIMEOUT_SECONDS),
        }
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub fn with_notify_timeout(mut self, notify_timeout: Duration) -> Self {
        self.notify_timeout = notify_timeout;
        self
    }

    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    #[must_use]
    pub fn notify_timeout(&self) -> Duration {
        self.notify_timeout
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A verified caller's summary plus their signed session token.
#[derive(Debug)]
pub struct VerifiedSession {
    pub summary: AccountSummary,
    pub token: String,
}

/// Result of a successful sign-in.
#[derive(Debug)]
pub enum SignInOutcome {
    /// Account is verified; a session token was issued.
    Verified(VerifiedSession),
    /// Account is unverified and had no live code; a fresh OTP was sent.
    OtpSent(AccountSummary),
}

pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    verifications: Arc<dyn VerificationStore>,
    sender: Arc<dyn EmailSender>,
    tokens: TokenIssuer,
    config: AccountConfig,
}

impl AccountService {
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        verifications: Arc<dyn VerificationStore>,
        sender: Arc<dyn EmailSender>,
        tokens: TokenIssuer,
        config: AccountConfig,
    ) -> Self {
        Self {
            accounts,
            verifications,
            sender,
            tokens,
            config,
        }
    }

    /// Register a new unverified account and send it a one-time code.
    ///
    /// The account and its pending code are persisted before the email is
    /// dispatched; a dispatch failure leaves both in place.
    ///
    /// # Errors
    /// `Validation`, `DuplicateEmail`, or `Infrastructure`.
    #[instrument(skip(self, password, confirm_password))]
    pub async fn sign_up(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AccountSummary, AuthError> {
        if [first_name, last_name, email, password, confirm_password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::Validation(MSG_EMPTY_FIELDS.to_string()));
        }

        if !valid_email(email) {
            return Err(AuthError::Validation(MSG_INVALID_EMAIL.to_string()));
        }

        if password != confirm_password {
            return Err(AuthError::Validation(MSG_PASSWORD_MISMATCH.to_string()));
        }

        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        if !strong_password(password) {
            return Err(AuthError::Validation(MSG_WEAK_PASSWORD.to_string()));
        }

        let otp = crypto::generate_otp();
        let password_hash = crypto::hash_secret(password, self.config.bcrypt_cost)?;
        let otp_hash = crypto::hash_secret(&otp, self.config.bcrypt_cost)?;

        // Account first, then the pending code; both durable before any
        // notification is attempted.
        let account = match self
            .accounts
            .insert(NewAccount {
                first_name: first_name.trim().to_string(),
                last_name: last_name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?
        {
            InsertOutcome::Created(account) => account,
            InsertOutcome::DuplicateEmail => return Err(AuthError::DuplicateEmail),
        };

        self.verifications.put(account.id, &otp_hash).await?;

        self.dispatch(&verification_email(&account.email, &account.first_name, &otp))
            .await?;

        Ok(account.summary())
    }

    /// Consume a pending code and flip the account to verified (terminal).
    ///
    /// The verified flag is persisted before the pending record is deleted;
    /// a crash in between leaves harmless residue that expires on its own,
    /// never an unverified account without a code.
    ///
    /// # Errors
    /// `Validation`, `NotFound`, `AlreadyVerified`, `NoPendingOtp`,
    /// `InvalidOtp`, or `Infrastructure`.
    #[instrument(skip(self, otp))]
    pub async fn confirm_otp(
        &self,
        account_id: &str,
        otp: &str,
    ) -> Result<VerifiedSession, AuthError> {
        if account_id.trim().is_empty() || otp.trim().is_empty() {
            return Err(AuthError::Validation(MSG_EMPTY_FIELDS.to_string()));
        }

        // An id that does not parse cannot name an account.
        let Ok(id) = Uuid::parse_str(account_id.trim()) else {
            return Err(AuthError::NotFound);
        };

        let mut account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound)?;

        if account.verified {
            return Err(AuthError::AlreadyVerified);
        }

        // Expired and never-created are the same thing at this layer.
        let pending = self
            .verifications
            .get(account.id)
            .await?
            .ok_or(AuthError::NoPendingOtp)?;

        if !crypto::verify_secret(&pending.otp_hash, otp.trim()) {
            return Err(AuthError::InvalidOtp);
        }

        account.verified = true;
        let account = self.accounts.save(&account).await?;
        self.verifications.delete(pending.id).await?;

        let token = self.tokens.issue(&account.session_claims())?;

        Ok(VerifiedSession {
            summary: account.summary(),
            token,
        })
    }

    /// Authenticate by email and password.
    ///
    /// A verified account gets a session token. An unverified account with a
    /// live code is told to wait out the TTL; with none, a fresh code is
    /// issued and sent.
    ///
    /// # Errors
    /// `Validation`, `NotFound`, `WrongPassword`, `OtpCooldown`, or
    /// `Infrastructure`.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInOutcome, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AuthError::Validation(MSG_EMPTY_FIELDS.to_string()));
        }

        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !crypto::verify_secret(&account.password_hash, password) {
            return Err(AuthError::WrongPassword);
        }

        if account.verified {
            let token = self.tokens.issue(&account.session_claims())?;
            return Ok(SignInOutcome::Verified(VerifiedSession {
                summary: account.summary(),
                token,
            }));
        }

        if self.verifications.get(account.id).await?.is_some() {
            return Err(AuthError::OtpCooldown);
        }

        let otp = crypto::generate_otp();
        let otp_hash = crypto::hash_secret(&otp, self.config.bcrypt_cost)?;
        self.verifications.put(account.id, &otp_hash).await?;

        self.dispatch(&verification_email(&account.email, &account.first_name, &otp))
            .await?;

        Ok(SignInOutcome::OtpSent(account.summary()))
    }

    /// Fire-and-forget dispatch with a request-level timeout so a slow mail
    /// transport cannot stall the response; persisted state is unaffected.
    async fn dispatch(&self, message: &EmailMessage) -> Result<(), AuthError> {
        match timeout(self.config.notify_timeout, self.sender.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                error!("Notification dispatch failed: {err:?}");
                Err(AuthError::Infrastructure(
                    err.context("notification dispatch failed"),
                ))
            }
            Err(_) => {
                error!("Notification dispatch timed out");
                Err(AuthError::Infrastructure(anyhow!(
                    "notification dispatch timed out"
                )))
            }
        }
    }
}
