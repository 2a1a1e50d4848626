//! Tracing subscriber setup.
//!
//! Log verbosity comes from repeated `-v` flags (or `SESAME_LOG_LEVEL`);
//! `RUST_LOG` refines the filter further as usual.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Install the global subscriber.
///
/// # Errors
/// Returns an error if a global subscriber is already set.
pub fn init(verbosity_level: Option<tracing::Level>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    let default_level = verbosity_level.unwrap_or(tracing::Level::ERROR);

    // RUST_LOG=
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let subscriber = Registry::default().with(fmt_layer).with(env_filter);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")
}
