//! Tracing setup for the assessment pipeline.
//!
//! Structured logging uses the `tracing` crate; the filter is read from the
//! `SAFESTEP_LOG` environment variable and defaults to `info`.

use std::sync::Once;

use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable controlling the log filter.
pub const LOG_FILTER_ENV: &str = "SAFESTEP_LOG";

static INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// Called once at program startup; subsequent calls are ignored so library
/// consumers and tests can invoke it freely.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = fmt::layer().with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}
