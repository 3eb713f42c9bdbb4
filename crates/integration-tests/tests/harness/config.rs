//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use waifu_config::{Config, CorsConfig, HealthConfig, ServerConfig, TtsProviderConfig, TtsProviderType};
use waifu_markup::{CharacterProfile, ExpressionRule};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults and no provider
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                ..Config::default()
            },
        }
    }

    /// Add an Azure provider pointed at a mock backend
    pub fn with_azure_provider(mut self, base_url: &str) -> Self {
        self.config.tts.provider = Some(TtsProviderConfig {
            provider_type: TtsProviderType::Azure,
            api_key: SecretString::from("test-key"),
            region: "eastus".to_owned(),
            base_url: Some(base_url.parse().expect("valid URL")),
            output_format: "riff-24khz-16bit-mono-pcm".to_owned(),
            timeout: "5s".to_owned(),
        });
        self
    }

    /// Set the character and emotion used when a request names none
    pub fn with_defaults(mut self, character: &str, emotion: Option<&str>) -> Self {
        self.config.tts.default_character = character.to_owned();
        self.config.tts.default_emotion = emotion.map(str::to_owned);
        self
    }

    /// Limit the accepted text length
    pub fn with_max_text_chars(mut self, max: usize) -> Self {
        self.config.tts.max_text_chars = max;
        self
    }

    /// Add or replace a character
    pub fn with_character(mut self, character: CharacterProfile) -> Self {
        self.config.voices.characters.push(character);
        self
    }

    /// Add or override an expression rule
    pub fn with_expression(mut self, rule: ExpressionRule) -> Self {
        self.config.lexicon.expressions.push(rule);
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
