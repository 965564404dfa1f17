//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Derive default filter directives from the configured log level
//!
//! # Design Decisions
//! - RUST_LOG, when set, wins over the config file level
//! - One subscriber for the process; init is called once from main

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `log_level` comes from `observability.log_level`; the RUST_LOG
/// environment variable takes precedence when present.
pub fn init_logging(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "hostswap_proxy={log_level},tower_http={log_level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
