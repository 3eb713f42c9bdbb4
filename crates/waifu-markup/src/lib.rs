//! Text to speech markup for anime character voices
//!
//! Raw text is rewritten into a token stream (phonetic spellings for informal
//! expressions, pauses and emphasis for punctuation), a character profile is
//! merged with an optional emotion, and both are rendered as SSML for a
//! neural synthesis provider.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod composer;
mod detector;
mod engine;
mod error;
mod lexicon;
mod rewriter;
mod voice;

pub use composer::{MarkupDocument, Prosody, compose};
pub use detector::EmotionDetector;
pub use engine::{MarkupEngine, check_input};
pub use error::{MarkupError, Result};
pub use lexicon::{
    EmphasisLevel, ExpressionRule, Lexicon, PunctuationRule, builtin_expressions, builtin_punctuation,
};
pub use rewriter::{Token, rewrite};
pub use voice::{
    AUTO_EMOTION, CharacterProfile, EmotionModifier, ResolvedVoice, VoiceTable, builtin_characters, builtin_emotions,
};
