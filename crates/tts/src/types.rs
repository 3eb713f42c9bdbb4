use serde::{Deserialize, Serialize};
use waifu_markup::MarkupDocument;

/// Body of `/synthesize` and `/markup`
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisRequest {
    /// Text to speak
    pub text: String,
    /// Character id, the configured default when absent
    #[serde(default)]
    pub character: Option<String>,
    /// Emotion id or `auto`, the configured default when absent
    #[serde(default)]
    pub emotion: Option<String>,
}

/// Markup rendered for one request, with the ids actually applied
#[derive(Debug, Clone)]
pub struct RenderedMarkup {
    pub character: String,
    pub emotion: Option<String>,
    pub document: MarkupDocument,
}

impl RenderedMarkup {
    /// Download name of the synthesized audio
    pub fn file_name(&self) -> String {
        format!("{}_{}.wav", self.character, self.emotion.as_deref().unwrap_or("neutral"))
    }
}

/// Raw audio response from a speech provider
#[derive(Debug)]
pub struct SpeechResponse {
    /// Raw audio bytes
    pub audio: Vec<u8>,
    /// Content type of the audio (e.g. "audio/wav")
    pub content_type: String,
}

/// Characters, emotions and expressions served by `/voices`
#[derive(Debug, Serialize)]
pub struct VoiceCatalog {
    pub characters: Vec<CharacterEntry>,
    pub emotions: Vec<EmotionEntry>,
    pub expressions: Vec<ExpressionEntry>,
    pub default_character: String,
    pub provider: Option<String>,
    pub provider_available: bool,
}

#[derive(Debug, Serialize)]
pub struct CharacterEntry {
    pub id: String,
    pub display_name: String,
    pub voice: String,
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmotionEntry {
    pub id: String,
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExpressionEntry {
    pub pattern: String,
    pub phonetic: String,
}
