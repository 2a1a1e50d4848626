use clap::{Arg, Command};

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("jwt-secret")
                .long("jwt-secret")
                .help("Secret key used to sign session tokens")
                .env("SESAME_JWT_SECRET_KEY")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("otp-ttl-seconds")
                .long("otp-ttl-seconds")
                .help("Lifetime of a pending verification code")
                .env("SESAME_OTP_TTL_SECONDS")
                .default_value("600")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("bcrypt-cost")
                .long("bcrypt-cost")
                .help("bcrypt work factor for password and OTP hashing")
                .env("SESAME_BCRYPT_COST")
                .default_value("7")
                .value_parser(clap::value_parser!(u32).range(4..=31)),
        )
        .arg(
            Arg::new("notify-timeout-seconds")
                .long("notify-timeout-seconds")
                .help("Upper bound on a single notification dispatch")
                .env("SESAME_NOTIFY_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Session token lifetime; when unset, tokens carry no expiry claim")
                .env("SESAME_SESSION_TTL_SECONDS")
                .value_parser(clap::value_parser!(i64)),
        )
}
