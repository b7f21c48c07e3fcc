//! Logging
//!
//! Builds the logger handed to [`crate::app::run`]. Nothing here installs a
//! global subscriber; the binary scopes the dispatcher to the run.

use std::io;

use tracing::Dispatch;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
};

use crate::config::{LogFormat, LoggingConfig};

/// Build a log dispatcher from the logging settings.
///
/// Logs go to stderr so stdout stays free for the receipt.
pub fn dispatch(config: &LoggingConfig) -> Dispatch {
    match config.log_format {
        LogFormat::Compact => with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn with_layer<L>(config: &LoggingConfig, fmt_layer: L) -> Dispatch
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config));

    Dispatch::new(subscriber)
}
