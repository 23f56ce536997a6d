//! Diagnostic logging.
//!
//! Console output meant for the user goes through the crate's `info!`,
//! `success!`, `warning!` and `error!` macros. Everything else (storage
//! failures, corrupt documents, HTTP retries) is emitted with `tracing` and
//! lands on stderr, filtered by `WHIZZYVERSE_LOG`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config;

/// Installs the global `tracing` subscriber. Safe to call more than once.
pub fn init() {
    let env_filter = EnvFilter::try_new(config::log_filter())
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
