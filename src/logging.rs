//! Logging setup.
//!
//! The library only emits `tracing` events. Applications and tests call
//! [`init_logging`] once to install a subscriber that prints them.

use crate::config::DEFAULT_LOG_FILTER;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `filter` is used, falling back to
/// [`DEFAULT_LOG_FILTER`] if it does not parse. Returns false if a global
/// subscriber was already installed.
pub fn init_logging(filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_thread_names(true))
        .try_init()
        .is_ok()
}
