//! Log output for the waifu voice server
//!
//! Installs a `tracing-subscriber` registry writing either human readable or
//! JSON lines to stdout.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use waifu_config::{LogFormat, TelemetryConfig};

/// Initialize logging from configuration
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this more
/// than once keeps the first subscriber.
///
/// # Errors
///
/// Returns an error if the filter directives cannot be parsed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = env_filter(config)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json().flatten_event(true)).try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("logging already initialized: {e}");
    }

    Ok(())
}

fn env_filter(config: &TelemetryConfig) -> anyhow::Result<EnvFilter> {
    let directives = filter_directives(config);

    EnvFilter::try_new(&directives).map_err(|e| anyhow::anyhow!("invalid log filter '{directives}': {e}"))
}

/// `RUST_LOG` if set, otherwise the configured filter
fn filter_directives(config: &TelemetryConfig) -> String {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.log_filter().to_owned())
}
