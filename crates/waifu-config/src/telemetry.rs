use serde::Deserialize;

/// Log output configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default)]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

/// Rendering of log lines on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl TelemetryConfig {
    pub const DEFAULT_LOG_FILTER: &str = "info";

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(Self::DEFAULT_LOG_FILTER)
    }
}
