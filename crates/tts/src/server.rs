use std::sync::Arc;

use waifu_config::TtsProviderType;
use waifu_markup::{MarkupEngine, check_input};

use crate::{
    error::{Result, TtsError},
    provider::{SpeechProvider, azure::AzureSpeechProvider},
    types::{CharacterEntry, EmotionEntry, ExpressionEntry, RenderedMarkup, SpeechResponse, SynthesisRequest, VoiceCatalog},
};

/// Request defaults applied before transformation
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub character: String,
    pub emotion: Option<String>,
    pub max_text_chars: usize,
}

/// Voice server turning requests into markup and markup into audio
pub struct Server {
    engine: Arc<MarkupEngine>,
    provider: Option<Box<dyn SpeechProvider>>,
    defaults: RequestDefaults,
}

impl Server {
    pub fn new(engine: Arc<MarkupEngine>, provider: Option<Box<dyn SpeechProvider>>, defaults: RequestDefaults) -> Self {
        Self {
            engine,
            provider,
            defaults,
        }
    }

    pub fn engine(&self) -> &MarkupEngine {
        &self.engine
    }

    /// Whether `/synthesize` can reach a provider
    pub fn provider_ready(&self) -> bool {
        self.provider.as_ref().is_some_and(|provider| provider.is_ready())
    }

    /// Validate a request, fill in defaults and render its markup
    ///
    /// An `auto` emotion is replaced by the detected one, so the returned ids
    /// are the ones that shaped the document.
    pub fn render(&self, request: &SynthesisRequest) -> Result<RenderedMarkup> {
        check_input(&request.text, self.defaults.max_text_chars)?;

        let character = non_empty(request.character.as_deref()).unwrap_or(&self.defaults.character);
        let emotion = non_empty(request.emotion.as_deref()).or(self.defaults.emotion.as_deref());
        let (emotion, document) = self.engine.transform_with_emotion(&request.text, character, emotion)?;

        tracing::debug!("rendered markup for {character} ({})", emotion.unwrap_or("no emotion"));

        Ok(RenderedMarkup {
            character: character.to_owned(),
            emotion: emotion.map(str::to_owned),
            document,
        })
    }

    /// Render a request and hand its markup to the provider
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<(RenderedMarkup, SpeechResponse)> {
        let provider = self.provider.as_ref().ok_or(TtsError::ProviderUnavailable)?;

        let rendered = self.render(request)?;

        tracing::info!(
            "synthesizing {} chars for {} with {}",
            request.text.chars().count(),
            rendered.character,
            provider.name()
        );

        let speech = provider.synthesize(&rendered.document.to_ssml()).await?;

        Ok((rendered, speech))
    }

    /// Everything a client can pick from
    pub fn catalog(&self) -> VoiceCatalog {
        let voices = self.engine.voices();

        VoiceCatalog {
            characters: voices
                .characters()
                .map(|character| CharacterEntry {
                    id: character.id.clone(),
                    display_name: character.display_name.clone(),
                    voice: character.voice_identity.clone(),
                    style: character.style.clone(),
                })
                .collect(),
            emotions: voices
                .emotions()
                .map(|emotion| EmotionEntry {
                    id: emotion.id.clone(),
                    style: emotion.style.clone(),
                })
                .collect(),
            expressions: self
                .engine
                .lexicon()
                .expressions()
                .iter()
                .map(|rule| ExpressionEntry {
                    pattern: rule.pattern.clone(),
                    phonetic: rule.phonetic.clone(),
                })
                .collect(),
            default_character: self.defaults.character.clone(),
            provider: self.provider.as_ref().map(|provider| provider.name().to_owned()),
            provider_available: self.provider_ready(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Builder for constructing the voice server from configuration
pub struct TtsServerBuilder<'a> {
    config: &'a waifu_config::Config,
}

impl<'a> TtsServerBuilder<'a> {
    pub const fn new(config: &'a waifu_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let engine = self
            .config
            .markup_engine()
            .map_err(|e| TtsError::ConfigError(e.to_string()))?;

        let provider: Option<Box<dyn SpeechProvider>> = match &self.config.tts.provider {
            Some(provider_config) => {
                tracing::debug!("Initializing speech provider: {}", provider_config.provider_type);

                match provider_config.provider_type {
                    TtsProviderType::Azure => Some(Box::new(AzureSpeechProvider::from_config(provider_config)?)),
                }
            }
            None => {
                tracing::info!("No speech provider configured, only markup previews are served");
                None
            }
        };

        let defaults = RequestDefaults {
            character: self.config.tts.default_character.clone(),
            emotion: self.config.tts.default_emotion.clone(),
            max_text_chars: self.config.tts.max_text_chars,
        };

        tracing::debug!(
            "voice server initialized with {} characters and {} emotions",
            engine.voices().characters().count(),
            engine.voices().emotions().count()
        );

        Ok(Server::new(Arc::new(engine), provider, defaults))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use waifu_markup::{MarkupError, Prosody};

    use super::*;

    /// Provider that records the markup it receives
    #[derive(Default)]
    struct RecordingProvider {
        received: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SpeechProvider for RecordingProvider {
        async fn synthesize(&self, ssml: &str) -> Result<SpeechResponse> {
            self.received.lock().unwrap().push(ssml.to_owned());

            Ok(SpeechResponse {
                audio: b"RIFF".to_vec(),
                content_type: "audio/wav".to_owned(),
            })
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn defaults() -> RequestDefaults {
        RequestDefaults {
            character: "sakura".to_owned(),
            emotion: None,
            max_text_chars: 50,
        }
    }

    fn server(provider: Option<Box<dyn SpeechProvider>>) -> Server {
        Server::new(Arc::new(MarkupEngine::builtin()), provider, defaults())
    }

    fn request(text: &str, character: Option<&str>, emotion: Option<&str>) -> SynthesisRequest {
        SynthesisRequest {
            text: text.to_owned(),
            character: character.map(str::to_owned),
            emotion: emotion.map(str::to_owned),
        }
    }

    #[test]
    fn defaults_fill_missing_ids() {
        let rendered = server(None).render(&request("Konnichiwa!", None, Some(""))).unwrap();

        assert_eq!(rendered.character, "sakura");
        assert!(rendered.emotion.is_none());
        assert_eq!(rendered.file_name(), "sakura_neutral.wav");
        assert_eq!(
            rendered.document.prosody(),
            Prosody {
                pitch_pct: 20,
                rate_pct: 8,
                volume_pct: 15,
            }
        );
    }

    #[test]
    fn default_emotion_applies() {
        let server = Server::new(
            Arc::new(MarkupEngine::builtin()),
            None,
            RequestDefaults {
                emotion: Some("shy".to_owned()),
                ..defaults()
            },
        );

        let rendered = server.render(&request("um, hello", Some("rei"), None)).unwrap();
        assert_eq!(rendered.file_name(), "rei_shy.wav");
        assert_eq!(rendered.document.style(), Some("gentle"));
    }

    #[test]
    fn auto_emotion_is_reported() {
        let rendered = server(None)
            .render(&request("Ehehe, so funny", Some("miku"), Some("auto")))
            .unwrap();

        assert_eq!(rendered.emotion.as_deref(), Some("giggly"));
        assert_eq!(rendered.file_name(), "miku_giggly.wav");
    }

    #[test]
    fn invalid_requests() {
        let server = server(None);

        let err = server.render(&request("   ", None, None)).unwrap_err();
        assert!(matches!(err, TtsError::Markup(MarkupError::MalformedInput(_))));

        let err = server.render(&request(&"a".repeat(51), None, None)).unwrap_err();
        assert!(matches!(err, TtsError::Markup(MarkupError::MalformedInput(_))));

        let err = server.render(&request("hi", Some("asuka"), None)).unwrap_err();
        assert!(matches!(err, TtsError::Markup(MarkupError::UnknownCharacter(id)) if id == "asuka"));

        let err = server.render(&request("hi", None, Some("bored"))).unwrap_err();
        assert!(matches!(err, TtsError::Markup(MarkupError::UnknownEmotion(id)) if id == "bored"));
    }

    #[tokio::test]
    async fn synthesize_sends_rendered_markup() {
        let provider = RecordingProvider::default();
        let received = Arc::clone(&provider.received);
        let server = server(Some(Box::new(provider)));

        let (rendered, speech) = server
            .synthesize(&request("Ara ara~ That's so kawaii!", Some("sakura"), Some("cheerful")))
            .await
            .unwrap();

        assert_eq!(speech.audio, b"RIFF");
        assert!(format!("{speech:?}").contains("audio/wav"));
        assert_eq!(rendered.file_name(), "sakura_cheerful.wav");

        let received = received.lock().unwrap();
        assert_eq!(received.as_slice(), [rendered.document.to_ssml()]);
        assert!(received[0].contains(r#"<prosody pitch="+28%" rate="+11%" volume="+15%">"#));
    }

    #[tokio::test]
    async fn synthesize_without_provider() {
        let err = server(None).synthesize(&request("hello", None, None)).await.unwrap_err();
        assert!(matches!(err, TtsError::ProviderUnavailable));
    }

    #[test]
    fn catalog_lists_tables() {
        let catalog = server(Some(Box::new(RecordingProvider::default()))).catalog();

        assert_eq!(catalog.characters.len(), 4);
        assert_eq!(catalog.characters[0].id, "sakura");
        assert_eq!(catalog.characters[0].voice, "en-US-JennyNeural");
        assert_eq!(catalog.emotions.len(), 9);
        assert!(catalog.expressions.iter().any(|e| e.pattern == "ara ara"));
        assert_eq!(catalog.provider.as_deref(), Some("recording"));
        assert!(catalog.provider_available);
    }

    #[test]
    fn builder_without_provider() {
        let config = waifu_config::Config::default();
        let server = TtsServerBuilder::new(&config).build().unwrap();

        assert!(!server.provider_ready());
        assert!(server.catalog().provider.is_none());
    }
}
