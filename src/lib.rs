//! # Sesame (email/password account service)
//!
//! `sesame` registers accounts, proves ownership of an email address with a
//! 4-digit one-time code (OTP), and authenticates returning users by issuing
//! a signed session token (JWT).
//!
//! ## Account lifecycle
//!
//! Accounts are created `unverified`. A bcrypt-hashed OTP is stored alongside
//! the account and mailed to the address; a successful `/api/verify-otp`
//! flips the account to `verified`, which is terminal. Pending codes live for
//! 10 minutes; while one is live, no second code is ever issued for the same
//! account. Sign-in against an unverified account re-issues a code only after
//! the previous one expired.
//!
//! ## Invariants
//!
//! - **Email uniqueness** is a database constraint, not application logic:
//!   concurrent duplicate sign-ups race on the unique index and exactly one
//!   wins.
//! - **At most one pending code** per account, also a unique index.
//! - **TTL expiry** is a store-level guarantee: a code older than the TTL is
//!   unreadable through the store API, indistinguishable from never created.
//!
//! Secrets (passwords and OTPs) are bcrypt-hashed with a per-call salt; raw
//! values are never persisted or logged.

pub mod account;
pub mod api;
pub mod cli;
pub mod email;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
