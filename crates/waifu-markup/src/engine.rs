use crate::{
    composer::{MarkupDocument, compose},
    detector::EmotionDetector,
    error::{MarkupError, Result},
    lexicon::Lexicon,
    voice::{AUTO_EMOTION, VoiceTable},
};

/// Text to markup pipeline over immutable tables
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MarkupEngine {
    lexicon: Lexicon,
    voices: VoiceTable,
    detector: EmotionDetector,
}

impl MarkupEngine {
    pub fn new(lexicon: Lexicon, voices: VoiceTable) -> Self {
        Self {
            detector: EmotionDetector::new(&lexicon),
            lexicon,
            voices,
        }
    }

    /// Engine over the built-in lexicon, characters and emotions
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin(), VoiceTable::builtin())
    }

    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub const fn voices(&self) -> &VoiceTable {
        &self.voices
    }

    /// Emotion that will actually be applied for a request
    ///
    /// `auto` is replaced by the best detected emotion the voice table knows,
    /// or by none at all.
    pub fn effective_emotion<'a>(&'a self, text: &str, emotion: Option<&'a str>) -> Option<&'a str> {
        match emotion {
            Some(AUTO_EMOTION) => {
                let detected = self
                    .detector
                    .scores(text)
                    .into_iter()
                    .map(|(id, _)| id)
                    .find(|id| self.voices.emotion(id).is_some());

                tracing::debug!("auto emotion detected as {detected:?}");
                detected
            }
            other => other,
        }
    }

    /// Transform text into a markup document for a character and emotion
    pub fn transform(&self, text: &str, character: &str, emotion: Option<&str>) -> Result<MarkupDocument> {
        self.transform_with_emotion(text, character, emotion)
            .map(|(_, document)| document)
    }

    /// Transform text and report the emotion that shaped the document
    ///
    /// `auto` runs the detector once up front. Explicit ids are resolved
    /// before any text is rewritten, so an unknown character or emotion fails
    /// without doing that work.
    pub fn transform_with_emotion<'a>(
        &'a self,
        text: &str,
        character: &str,
        emotion: Option<&'a str>,
    ) -> Result<(Option<&'a str>, MarkupDocument)> {
        let emotion = self.effective_emotion(text, emotion);
        let voice = self.voices.resolve(character, emotion)?;

        let tokens = self.lexicon.rewrite(text);
        tracing::debug!(
            "transformed {} chars into {} tokens for {character}/{}",
            text.chars().count(),
            tokens.len(),
            emotion.unwrap_or("none")
        );

        Ok((emotion, compose(tokens, &voice)))
    }
}

impl Default for MarkupEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Reject empty, blank or over-long text before it reaches the engine
pub fn check_input(text: &str, max_chars: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(MarkupError::MalformedInput("text must not be empty".to_owned()));
    }

    let chars = text.chars().count();
    if chars > max_chars {
        return Err(MarkupError::MalformedInput(format!(
            "text is {chars} characters long, the limit is {max_chars}"
        )));
    }

    Ok(())
}
