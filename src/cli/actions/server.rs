use crate::{
    account::{crypto::TokenIssuer, service::AccountConfig},
    api,
};
use anyhow::Result;
use secrecy::SecretString;
use std::time::Duration;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub jwt_secret: SecretString,
    pub otp_ttl_seconds: u64,
    pub bcrypt_cost: u32,
    pub notify_timeout_seconds: u64,
    pub session_ttl_seconds: Option<i64>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database is unreachable or the server fails to
/// start.
pub async fn execute(args: Args) -> Result<()> {
    let tokens = TokenIssuer::new(args.jwt_secret, args.session_ttl_seconds);

    let config = AccountConfig::new()
        .with_bcrypt_cost(args.bcrypt_cost)
        .with_notify_timeout(Duration::from_secs(args.notify_timeout_seconds));

    api::new(
        args.port,
        args.dsn,
        Duration::from_secs(args.otp_ttl_seconds),
        tokens,
        config,
    )
    .await
}
