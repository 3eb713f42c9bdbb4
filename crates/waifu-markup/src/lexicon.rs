//! Expression and punctuation tables used by the rewriter

use std::{cmp::Reverse, collections::HashMap};

use serde::Deserialize;

use crate::error::{MarkupError, Result};

/// Emphasis strength attached to a span of content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmphasisLevel {
    /// Light emphasis, rendered as `moderate`
    Short,
    /// Heavy emphasis, rendered as `strong`
    Strong,
}

impl EmphasisLevel {
    /// Value of the SSML `level` attribute
    pub const fn ssml_level(self) -> &'static str {
        match self {
            Self::Short => "moderate",
            Self::Strong => "strong",
        }
    }
}

/// Informal expression replaced by a pronunciation-friendly spelling
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpressionRule {
    /// Text to look for in the input
    pub pattern: String,
    /// Spelling handed to the synthesis engine instead of the pattern
    pub phonetic: String,
    /// Match the pattern exactly instead of ignoring ASCII case
    #[serde(default)]
    pub case_sensitive: bool,
    /// Pause inserted right after the expression
    #[serde(default)]
    pub pause_ms: Option<u32>,
    /// Emotion this expression hints at when a request asks for `auto`
    #[serde(default)]
    pub emotion: Option<String>,
}

impl ExpressionRule {
    pub fn new(pattern: impl Into<String>, phonetic: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            phonetic: phonetic.into(),
            case_sensitive: false,
            pause_ms: None,
            emotion: None,
        }
    }

    #[must_use]
    pub const fn with_pause(mut self, pause_ms: u32) -> Self {
        self.pause_ms = Some(pause_ms);
        self
    }

    #[must_use]
    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotion = Some(emotion.into());
        self
    }

    #[must_use]
    pub const fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    /// Byte length of the match if `text` starts with this rule's pattern
    ///
    /// Case folding is ASCII-only, so non-ASCII bytes must match exactly and
    /// the returned length always lands on a char boundary of `text`.
    fn match_len(&self, text: &str) -> Option<usize> {
        let pattern = self.pattern.as_bytes();
        let candidate = text.as_bytes().get(..pattern.len())?;

        let matched = if self.case_sensitive {
            candidate == pattern
        } else {
            candidate.eq_ignore_ascii_case(pattern)
        };

        matched.then_some(pattern.len())
    }

    /// Whether two rules would match the same input
    pub fn same_pattern(&self, other: &Self) -> bool {
        if self.case_sensitive || other.case_sensitive {
            self.pattern == other.pattern
        } else {
            self.pattern.eq_ignore_ascii_case(&other.pattern)
        }
    }
}

/// Pause (and optional emphasis) triggered by a punctuation symbol
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PunctuationRule {
    pub symbol: char,
    pub pause_ms: u32,
    /// Emphasis applied to the literal run right before the symbol
    #[serde(default)]
    pub emphasis: Option<EmphasisLevel>,
}

impl PunctuationRule {
    pub const fn new(symbol: char, pause_ms: u32) -> Self {
        Self {
            symbol,
            pause_ms,
            emphasis: None,
        }
    }

    #[must_use]
    pub const fn with_emphasis(mut self, level: EmphasisLevel) -> Self {
        self.emphasis = Some(level);
        self
    }
}

/// Immutable set of expression and punctuation rules
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// Sorted longest pattern first, configuration order among equal lengths
    expressions: Vec<ExpressionRule>,
    punctuation: HashMap<char, PunctuationRule>,
}

impl Lexicon {
    /// Build a lexicon from rule lists
    ///
    /// A later punctuation rule for the same symbol replaces the earlier one.
    pub fn new(
        expressions: impl IntoIterator<Item = ExpressionRule>,
        punctuation: impl IntoIterator<Item = PunctuationRule>,
    ) -> Result<Self> {
        let expressions: Vec<_> = expressions.into_iter().collect();

        if let Some(rule) = expressions.iter().find(|rule| rule.pattern.is_empty()) {
            return Err(MarkupError::EmptyPattern {
                phonetic: rule.phonetic.clone(),
            });
        }

        Ok(Self::assemble(expressions, punctuation))
    }

    /// Lexicon made of the built-in rule tables only
    pub fn builtin() -> Self {
        Self::assemble(builtin_expressions(), builtin_punctuation())
    }

    fn assemble(mut expressions: Vec<ExpressionRule>, punctuation: impl IntoIterator<Item = PunctuationRule>) -> Self {
        // stable sort keeps configuration order for patterns of equal length
        expressions.sort_by_key(|rule| Reverse(rule.pattern.chars().count()));

        let punctuation = punctuation.into_iter().map(|rule| (rule.symbol, rule)).collect();

        Self {
            expressions,
            punctuation,
        }
    }

    /// Expression rules, longest pattern first
    pub fn expressions(&self) -> &[ExpressionRule] {
        &self.expressions
    }

    pub const fn punctuation(&self) -> &HashMap<char, PunctuationRule> {
        &self.punctuation
    }

    pub fn punctuation_rule(&self, symbol: char) -> Option<&PunctuationRule> {
        self.punctuation.get(&symbol)
    }

    /// Longest expression that starts at the beginning of `text`
    pub fn match_expression(&self, text: &str) -> Option<(&ExpressionRule, usize)> {
        self.expressions
            .iter()
            .find_map(|rule| rule.match_len(text).map(|len| (rule, len)))
    }
}

/// (pattern, phonetic, trailing pause, hinted emotion)
const EXPRESSIONS: &[(&str, &str, Option<u32>, Option<&str>)] = &[
    ("konnichiwa", "koh-nee-chee-wah", None, Some("cheerful")),
    ("ohayo", "oh-hah-yoh", None, Some("cheerful")),
    ("arigatou", "ah-ree-gah-toh", None, Some("cheerful")),
    ("sumimasen", "soo-mee-mah-sen", None, Some("shy")),
    ("ara ara", "ah-rah ah-rah", Some(400), Some("teasing")),
    ("ehehe", "eh-heh-heh", Some(300), Some("giggly")),
    ("ufufu", "oo-foo-foo", Some(300), Some("giggly")),
    ("kawaii", "kah-wah-ee", Some(200), Some("excited")),
    ("sugoi", "soo-goh-ee", Some(200), Some("excited")),
    ("baka", "bah-kah", None, Some("teasing")),
    ("onegai", "oh-neh-gah-ee", None, None),
    ("gomen", "goh-men", None, Some("shy")),
    ("kyaa", "kyah", None, Some("excited")),
    ("yatta", "yah-ttah", None, Some("excited")),
    ("こんにちは", "koh-nee-chee-wah", None, Some("cheerful")),
    ("おはよう", "oh-hah-yoh", None, Some("cheerful")),
    ("ありがとう", "ah-ree-gah-toh", None, Some("cheerful")),
    ("すみません", "soo-mee-mah-sen", None, Some("shy")),
    ("あらあら", "ah-rah ah-rah", Some(400), Some("teasing")),
    ("えへへ", "eh-heh-heh", Some(300), Some("giggly")),
    ("うふふ", "oo-foo-foo", Some(300), Some("giggly")),
    ("かわいい", "kah-wah-ee", Some(200), Some("excited")),
    ("すごい", "soo-goh-ee", Some(200), Some("excited")),
    ("ばか", "bah-kah", None, Some("teasing")),
    ("おねがい", "oh-neh-gah-ee", None, None),
    ("ごめん", "goh-men", None, Some("shy")),
    ("きゃー", "kyah", None, Some("excited")),
    ("やった", "yah-ttah", None, Some("excited")),
];

/// (symbol, pause, emphasis on the preceding run)
const PUNCTUATION: &[(char, u32, Option<EmphasisLevel>)] = &[
    ('!', 200, Some(EmphasisLevel::Short)),
    ('?', 300, None),
    ('.', 250, None),
    (',', 150, None),
    ('…', 500, None),
    ('♪', 300, None),
    ('！', 200, Some(EmphasisLevel::Short)),
    ('？', 300, None),
    ('。', 250, None),
    ('、', 150, None),
];

/// Built-in expression rules in table order
pub fn builtin_expressions() -> Vec<ExpressionRule> {
    EXPRESSIONS
        .iter()
        .map(|&(pattern, phonetic, pause_ms, emotion)| ExpressionRule {
            pause_ms,
            emotion: emotion.map(str::to_owned),
            ..ExpressionRule::new(pattern, phonetic)
        })
        .collect()
}

/// Built-in punctuation rules in table order
pub fn builtin_punctuation() -> Vec<PunctuationRule> {
    PUNCTUATION
        .iter()
        .map(|&(symbol, pause_ms, emphasis)| PunctuationRule {
            symbol,
            pause_ms,
            emphasis,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expressions_sorted_longest_first() {
        let lexicon = Lexicon::new(
            [ExpressionRule::new("ara", "ah-rah"), ExpressionRule::new("ara ara", "ah-rah ah-rah")],
            [],
        )
        .unwrap();

        let patterns: Vec<_> = lexicon.expressions().iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, ["ara ara", "ara"]);
    }

    #[test]
    fn equal_length_keeps_configuration_order() {
        let lexicon = Lexicon::new(
            [ExpressionRule::new("nya", "first"), ExpressionRule::new("NYA", "second")],
            [],
        )
        .unwrap();

        let (rule, len) = lexicon.match_expression("nya~").unwrap();
        assert_eq!(rule.phonetic, "first");
        assert_eq!(len, 3);
    }

    #[test]
    fn match_ignores_ascii_case_by_default() {
        let lexicon = Lexicon::builtin();

        let (rule, len) = lexicon.match_expression("KaWaIi desu").unwrap();
        assert_eq!(rule.phonetic, "kah-wah-ee");
        assert_eq!(len, "kawaii".len());
    }

    #[test]
    fn case_sensitive_rule_requires_exact_case() {
        let lexicon = Lexicon::new([ExpressionRule::new("UwU", "oo-woo").case_sensitive()], []).unwrap();

        assert!(lexicon.match_expression("UwU").is_some());
        assert!(lexicon.match_expression("uwu").is_none());
    }

    #[test]
    fn kana_patterns_match_on_char_boundaries() {
        let lexicon = Lexicon::builtin();

        let text = "あらあら、ね";
        let (rule, len) = lexicon.match_expression(text).unwrap();
        assert_eq!(rule.phonetic, "ah-rah ah-rah");
        assert!(text.is_char_boundary(len));
        assert_eq!(&text[len..], "、ね");
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let err = Lexicon::new([ExpressionRule::new("", "nothing")], []).unwrap_err();
        assert_eq!(
            err,
            MarkupError::EmptyPattern {
                phonetic: "nothing".to_owned()
            }
        );
    }

    #[test]
    fn later_punctuation_rule_replaces_earlier() {
        let lexicon = Lexicon::new(
            [],
            [PunctuationRule::new('!', 200), PunctuationRule::new('!', 600)],
        )
        .unwrap();

        assert_eq!(lexicon.punctuation().len(), 1);
        assert_eq!(lexicon.punctuation_rule('!').unwrap().pause_ms, 600);
    }

    #[test]
    fn expressions_hint_emotions() {
        let lexicon = Lexicon::builtin();

        let (rule, _) = lexicon.match_expression("gomen ne").unwrap();
        assert_eq!(rule.emotion.as_deref(), Some("shy"));

        let (rule, _) = lexicon.match_expression("onegai").unwrap();
        assert!(rule.emotion.is_none());

        let rule = ExpressionRule::new("nyan", "nyahn").with_emotion("giggly");
        assert_eq!(rule.emotion.as_deref(), Some("giggly"));
    }

    #[test]
    fn tilde_is_not_a_pause_symbol() {
        assert!(Lexicon::builtin().punctuation_rule('~').is_none());
    }

    #[test]
    fn emphasis_level_parses_from_config_names() {
        assert_eq!("short".parse::<EmphasisLevel>().unwrap(), EmphasisLevel::Short);
        assert_eq!(EmphasisLevel::Strong.to_string(), "strong");
        assert_eq!(EmphasisLevel::Short.ssml_level(), "moderate");
    }
}
