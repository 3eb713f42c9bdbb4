pub mod azure;

use async_trait::async_trait;

use crate::types::SpeechResponse;

/// Speech synthesis backend that turns SSML into audio
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize a complete SSML document
    async fn synthesize(&self, ssml: &str) -> crate::error::Result<SpeechResponse>;

    /// Get the provider name
    fn name(&self) -> &str;

    /// Whether the provider can take requests
    fn is_ready(&self) -> bool {
        true
    }
}
