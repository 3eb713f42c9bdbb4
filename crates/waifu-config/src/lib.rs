#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
pub mod lexicon;
mod loader;
pub mod server;
pub mod telemetry;
pub mod tts;
pub mod voices;

use serde::Deserialize;
use waifu_markup::MarkupEngine;

pub use cors::*;
pub use health::*;
pub use lexicon::*;
pub use server::*;
pub use telemetry::*;
pub use tts::*;
pub use voices::*;

/// Top-level waifu voice configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Log output configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Request defaults and synthesis provider
    #[serde(default)]
    pub tts: TtsConfig,
    /// Character and emotion tables
    #[serde(default)]
    pub voices: VoicesConfig,
    /// Expression and punctuation rules
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

impl Config {
    /// Build the markup engine described by the voice and lexicon sections
    ///
    /// # Errors
    ///
    /// Returns an error if a table contains duplicate ids or invalid rules
    pub fn markup_engine(&self) -> anyhow::Result<MarkupEngine> {
        let voices = self
            .voices
            .table()
            .map_err(|e| anyhow::anyhow!("invalid voices configuration: {e}"))?;
        let lexicon = self
            .lexicon
            .lexicon()
            .map_err(|e| anyhow::anyhow!("invalid lexicon configuration: {e}"))?;

        Ok(MarkupEngine::new(lexicon, voices))
    }
}
