use serde::Deserialize;
use waifu_markup::{CharacterProfile, EmotionModifier, MarkupError, VoiceTable, builtin_characters, builtin_emotions};

/// Character and emotion tables
///
/// Configured entries are appended to the built-in ones. An entry whose id
/// matches a built-in replaces it in place.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoicesConfig {
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
    #[serde(default)]
    pub characters: Vec<CharacterProfile>,
    #[serde(default)]
    pub emotions: Vec<EmotionModifier>,
}

impl Default for VoicesConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            characters: Vec::new(),
            emotions: Vec::new(),
        }
    }
}

impl VoicesConfig {
    /// Build the voice table
    ///
    /// # Errors
    ///
    /// Returns an error if two configured entries share an id or an emotion
    /// uses a reserved id
    pub fn table(&self) -> Result<VoiceTable, MarkupError> {
        let (characters, emotions) = if self.include_builtin {
            (
                overlay(builtin_characters(), &self.characters, |c| &c.id),
                overlay(builtin_emotions(), &self.emotions, |e| &e.id),
            )
        } else {
            (self.characters.clone(), self.emotions.clone())
        };

        VoiceTable::new(characters, emotions)
    }
}

/// Replace built-ins that share an id with the first configured entry,
/// append the rest in configuration order
fn overlay<T: Clone>(builtin: Vec<T>, configured: &[T], id: impl Fn(&T) -> &String) -> Vec<T> {
    let mut used = vec![false; configured.len()];

    let mut merged: Vec<T> = builtin
        .into_iter()
        .map(|entry| {
            match configured
                .iter()
                .enumerate()
                .find(|(index, custom)| !used[*index] && id(custom) == id(&entry))
            {
                Some((index, custom)) => {
                    used[index] = true;
                    custom.clone()
                }
                None => entry,
            }
        })
        .collect();

    merged.extend(
        configured
            .iter()
            .zip(used)
            .filter(|(_, used)| !used)
            .map(|(custom, _)| custom.clone()),
    );

    merged
}

#[allow(clippy::missing_const_for_fn)]
fn default_include_builtin() -> bool {
    true
}
