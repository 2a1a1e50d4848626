//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the
//! appropriate action, such as starting the API server with its full
//! configuration.

use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;
    let jwt_secret = matches
        .get_one::<String>("jwt-secret")
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --jwt-secret")?;
    let otp_ttl_seconds = matches
        .get_one::<u64>("otp-ttl-seconds")
        .copied()
        .unwrap_or(600);
    let bcrypt_cost = matches.get_one::<u32>("bcrypt-cost").copied().unwrap_or(7);
    let notify_timeout_seconds = matches
        .get_one::<u64>("notify-timeout-seconds")
        .copied()
        .unwrap_or(10);
    let session_ttl_seconds = matches.get_one::<i64>("session-ttl-seconds").copied();

    Ok(Action::Server(Args {
        port,
        dsn,
        jwt_secret,
        otp_ttl_seconds,
        bcrypt_cost,
        notify_timeout_seconds,
        session_ttl_seconds,
    }))
}
