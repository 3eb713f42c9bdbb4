use std::path::Path;

use secrecy::ExposeSecret;
use waifu_markup::AUTO_EMOTION;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Expand, deserialize and validate configuration text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the provider settings are unusable, the tables
    /// do not build, or the request defaults name unknown ids
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server_config()?;
        self.validate_provider_config()?;
        self.validate_defaults()?;
        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_provider_config(&self) -> anyhow::Result<()> {
        let Some(ref provider) = self.tts.provider else {
            return Ok(());
        };

        if provider.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("tts.provider.api_key must not be empty");
        }

        if provider.region.trim().is_empty() && provider.base_url.is_none() {
            anyhow::bail!("tts.provider needs a region or a base_url");
        }

        provider.timeout()?;

        Ok(())
    }

    /// Build the tables once and check the request defaults against them
    fn validate_defaults(&self) -> anyhow::Result<()> {
        if self.tts.max_text_chars == 0 {
            anyhow::bail!("tts.max_text_chars must be greater than 0");
        }

        let engine = self.markup_engine()?;

        if engine.voices().character(&self.tts.default_character).is_none() {
            anyhow::bail!(
                "tts.default_character '{}' is not a configured character",
                self.tts.default_character
            );
        }

        if let Some(ref emotion) = self.tts.default_emotion
            && emotion != AUTO_EMOTION
            && engine.voices().emotion(emotion).is_none()
        {
            anyhow::bail!("tts.default_emotion '{emotion}' is not a configured emotion");
        }

        Ok(())
    }
}
