//! Character profiles, emotion modifiers and their additive merge

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{MarkupError, Result};

/// Emotion id that asks for detection instead of naming a modifier
pub const AUTO_EMOTION: &str = "auto";

/// Base voice parameters of a character
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterProfile {
    pub id: String,
    pub display_name: String,
    /// Provider voice name (e.g. "en-US-JennyNeural")
    pub voice_identity: String,
    #[serde(default)]
    pub base_pitch_pct: i32,
    #[serde(default)]
    pub base_rate_pct: i32,
    #[serde(default)]
    pub base_volume_pct: i32,
    /// Speaking style used when the emotion does not name one
    #[serde(default)]
    pub style: Option<String>,
}

/// Deltas applied on top of a character's base parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmotionModifier {
    pub id: String,
    #[serde(default)]
    pub pitch_delta_pct: i32,
    #[serde(default)]
    pub rate_delta_pct: i32,
    #[serde(default)]
    pub volume_delta_pct: i32,
    #[serde(default)]
    pub style: Option<String>,
}

/// Zero-delta modifier standing in for an absent emotion
static NO_EMOTION: EmotionModifier = EmotionModifier {
    id: String::new(),
    pitch_delta_pct: 0,
    rate_delta_pct: 0,
    volume_delta_pct: 0,
    style: None,
};

/// Concrete parameters for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVoice {
    pub voice_identity: String,
    pub style: Option<String>,
    pub pitch_pct: i32,
    pub rate_pct: i32,
    pub volume_pct: i32,
}

/// Read-only lookup table of characters and emotions
#[derive(Debug, Clone)]
pub struct VoiceTable {
    characters: IndexMap<String, CharacterProfile>,
    emotions: IndexMap<String, EmotionModifier>,
}

impl VoiceTable {
    /// Build a table, rejecting duplicate ids and the reserved `auto` emotion
    pub fn new(
        characters: impl IntoIterator<Item = CharacterProfile>,
        emotions: impl IntoIterator<Item = EmotionModifier>,
    ) -> Result<Self> {
        let mut character_map = IndexMap::new();
        for character in characters {
            if character_map.contains_key(&character.id) {
                return Err(MarkupError::DuplicateCharacter(character.id));
            }
            character_map.insert(character.id.clone(), character);
        }

        let mut emotion_map = IndexMap::new();
        for emotion in emotions {
            if emotion.id == AUTO_EMOTION {
                return Err(MarkupError::ReservedEmotion(emotion.id));
            }
            if emotion_map.contains_key(&emotion.id) {
                return Err(MarkupError::DuplicateEmotion(emotion.id));
            }
            emotion_map.insert(emotion.id.clone(), emotion);
        }

        Ok(Self {
            characters: character_map,
            emotions: emotion_map,
        })
    }

    /// Table holding the built-in characters and emotions
    pub fn builtin() -> Self {
        Self {
            characters: builtin_characters().into_iter().map(|c| (c.id.clone(), c)).collect(),
            emotions: builtin_emotions().into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// Merge a character's base parameters with an optional emotion
    ///
    /// The merge is a plain sum. Bounds are left to the composer.
    pub fn resolve(&self, character_id: &str, emotion_id: Option<&str>) -> Result<ResolvedVoice> {
        let character = self
            .characters
            .get(character_id)
            .ok_or_else(|| MarkupError::UnknownCharacter(character_id.to_owned()))?;

        let emotion = match emotion_id {
            Some(id) => self
                .emotions
                .get(id)
                .ok_or_else(|| MarkupError::UnknownEmotion(id.to_owned()))?,
            None => &NO_EMOTION,
        };

        Ok(ResolvedVoice {
            voice_identity: character.voice_identity.clone(),
            style: emotion.style.clone().or_else(|| character.style.clone()),
            pitch_pct: character.base_pitch_pct.saturating_add(emotion.pitch_delta_pct),
            rate_pct: character.base_rate_pct.saturating_add(emotion.rate_delta_pct),
            volume_pct: character.base_volume_pct.saturating_add(emotion.volume_delta_pct),
        })
    }

    pub fn character(&self, id: &str) -> Option<&CharacterProfile> {
        self.characters.get(id)
    }

    pub fn emotion(&self, id: &str) -> Option<&EmotionModifier> {
        self.emotions.get(id)
    }

    /// Characters in configuration order
    pub fn characters(&self) -> impl Iterator<Item = &CharacterProfile> {
        self.characters.values()
    }

    /// Emotions in configuration order
    pub fn emotions(&self) -> impl Iterator<Item = &EmotionModifier> {
        self.emotions.values()
    }
}

/// (id, display name, voice, style, pitch, rate, volume)
const CHARACTERS: &[(&str, &str, &str, &str, i32, i32, i32)] = &[
    ("sakura", "Sakura", "en-US-JennyNeural", "cheerful", 20, 8, 15),
    ("yuki", "Yuki", "en-US-AriaNeural", "chat", 15, -8, 15),
    ("rei", "Rei", "en-US-SaraNeural", "chat", 8, -12, 15),
    ("miku", "Miku", "en-US-MichelleNeural", "excited", 25, 15, 15),
];

/// (id, pitch, rate, volume, style)
const EMOTIONS: &[(&str, i32, i32, i32, &str)] = &[
    ("cheerful", 8, 3, 0, "cheerful"),
    ("giggly", 12, 5, 0, "excited"),
    ("teasing", 2, -8, 0, "chat"),
    ("shy", 6, -15, -20, "gentle"),
    ("excited", 15, 12, 0, "excited"),
    ("sad", -10, -20, 0, "sad"),
    ("neutral", 0, 0, 0, "chat"),
    ("angry", 5, 8, 0, "angry"),
    ("surprised", 18, 15, 0, "excited"),
];

pub fn builtin_characters() -> Vec<CharacterProfile> {
    CHARACTERS
        .iter()
        .map(|&(id, name, voice, style, pitch, rate, volume)| CharacterProfile {
            id: id.to_owned(),
            display_name: name.to_owned(),
            voice_identity: voice.to_owned(),
            base_pitch_pct: pitch,
            base_rate_pct: rate,
            base_volume_pct: volume,
            style: Some(style.to_owned()),
        })
        .collect()
}

pub fn builtin_emotions() -> Vec<EmotionModifier> {
    EMOTIONS
        .iter()
        .map(|&(id, pitch, rate, volume, style)| EmotionModifier {
            id: id.to_owned(),
            pitch_delta_pct: pitch,
            rate_delta_pct: rate,
            volume_delta_pct: volume,
            style: Some(style.to_owned()),
        })
        .collect()
}
