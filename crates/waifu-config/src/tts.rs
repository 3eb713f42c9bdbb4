use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Request defaults and the synthesis provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Character used when a request names none
    #[serde(default = "default_character")]
    pub default_character: String,
    /// Emotion used when a request names none
    ///
    /// Unset leaves such requests with the character's plain voice.
    #[serde(default)]
    pub default_emotion: Option<String>,
    /// Longest accepted input text, in characters
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Without a provider only the markup preview is served
    #[serde(default)]
    pub provider: Option<TtsProviderConfig>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            default_character: default_character(),
            default_emotion: None,
            max_text_chars: default_max_text_chars(),
            provider: None,
        }
    }
}

/// Configuration of the speech synthesis provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsProviderConfig {
    #[serde(rename = "type")]
    pub provider_type: TtsProviderType,
    pub api_key: SecretString,
    /// Service region, used to derive the endpoint
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override, mainly for tests and private deployments
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Audio format requested from the provider
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// Request timeout as a duration string, e.g. "30s"
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

impl TtsProviderConfig {
    /// Parsed request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is not a valid duration string
    pub fn timeout(&self) -> anyhow::Result<Duration> {
        duration_str::parse(&self.timeout).map_err(|e| anyhow::anyhow!("invalid tts timeout '{}': {e}", self.timeout))
    }
}

/// Supported synthesis providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TtsProviderType {
    /// Azure Cognitive Services neural voices
    Azure,
}

fn default_character() -> String {
    "sakura".to_owned()
}

const fn default_max_text_chars() -> usize {
    5000
}

fn default_region() -> String {
    "eastus".to_owned()
}

fn default_output_format() -> String {
    "riff-44100hz-16bit-mono-pcm".to_owned()
}

fn default_timeout() -> String {
    "30s".to_owned()
}
