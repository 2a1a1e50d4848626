//! Error taxonomy for the account state machine.
//!
//! Every operation is total: any input resolves to success or exactly one of
//! these variants. The HTTP boundary maps all of them to 400 with the
//! variant's message; `Infrastructure` deliberately surfaces only a generic
//! message so internal detail never leaks to the caller.

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Empty or malformed fields, password mismatch, weak password.
    #[error("{0}")]
    Validation(String),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("User not exists")]
    NotFound,

    #[error("User already verified")]
    AlreadyVerified,

    /// No live OTP record. Store-level expiry makes "expired" and "never
    /// created" indistinguishable here, by contract.
    #[error("No verification code is pending for this account")]
    NoPendingOtp,

    #[error("Otp is invalid")]
    InvalidOtp,

    #[error("Password not match")]
    WrongPassword,

    #[error("Please wait 10 mins to make another otp request")]
    OtpCooldown,

    /// Store, notification, hashing, or signing failure. The cause is logged
    /// at the boundary; the caller sees only the generic message.
    #[error("Something error occurred")]
    Infrastructure(#[source] anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Infrastructure(err)
    }
}

impl AuthError {
    /// The source system answered every rejection with 400, including
    /// internal faults. Preserved as the external contract.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
