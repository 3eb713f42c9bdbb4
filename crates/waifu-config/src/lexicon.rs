use serde::Deserialize;
use waifu_markup::{ExpressionRule, Lexicon, MarkupError, PunctuationRule, builtin_expressions, builtin_punctuation};

/// Expression and punctuation rules
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconConfig {
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
    #[serde(default)]
    pub expressions: Vec<ExpressionRule>,
    #[serde(default)]
    pub punctuation: Vec<PunctuationRule>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            expressions: Vec::new(),
            punctuation: Vec::new(),
        }
    }
}

impl LexiconConfig {
    /// Build the lexicon
    ///
    /// A configured expression drops every built-in rule that matches the
    /// same text. A configured punctuation rule replaces the built-in rule
    /// for its symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression has an empty pattern
    pub fn lexicon(&self) -> Result<Lexicon, MarkupError> {
        if !self.include_builtin {
            return Lexicon::new(self.expressions.clone(), self.punctuation.clone());
        }

        // configured rules first so they win among patterns of equal length
        let expressions = self.expressions.iter().cloned().chain(
            builtin_expressions()
                .into_iter()
                .filter(|builtin| !self.expressions.iter().any(|custom| custom.same_pattern(builtin))),
        );

        let punctuation = builtin_punctuation().into_iter().chain(self.punctuation.iter().cloned());

        Lexicon::new(expressions, punctuation)
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_include_builtin() -> bool {
    true
}
