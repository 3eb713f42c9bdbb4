//! Keyword based emotion guessing for requests that ask for `auto`

use std::cmp::Reverse;

use regex::Regex;

use crate::lexicon::Lexicon;

/// Weight of a known expression compared to a plain pattern hit
const EXPRESSION_WEIGHT: u32 = 2;

/// Patterns per emotion, in tie-breaking order
const PATTERNS: &[(&str, &[&str])] = &[
    (
        "cheerful",
        &[
            "♪",
            r"\byay\b",
            r"\bawesome\b",
            r"\bgreat\b",
            r"\bwonderful\b",
            r"\bhappy\b",
            r"\bjoy",
            r"\bsmil(?:e|es|ed|ing)\b",
            r"\blaugh",
        ],
    ),
    (
        "giggly",
        &[
            r"\behehe",
            r"\bhehe",
            r"\bhihi",
            r"\bufufu",
            r"\bfunny\b",
            r"\blol\b",
            r"\bhaha",
            r"\bgiggl",
            r"\btehe",
        ],
    ),
    (
        "teasing",
        &[
            r"\bara ara\b",
            r"\bara~",
            r"\bohh?\?",
            r"\breally\?",
            r"\bis that so\b",
            r"\bhmm+~",
            r"\binteresting\b",
            r"~\s*$",
        ],
    ),
    (
        "shy",
        &[
            r"\bum+\b",
            r"\buh+\b",
            r"\bmaybe\b",
            r"\bperhaps\b",
            r"\bi think\b",
            r"\bsort of\b",
            r"\bkind of\b",
            r"\bblush",
            r"\bembarrass",
        ],
    ),
    (
        "excited",
        &[
            r"\bwow!+",
            r"\bamazing!+",
            r"\bincredible!+",
            r"\bfantastic!+",
            r"\byes!+",
            r"\bomg\b",
            r"\bcan't wait\b",
        ],
    ),
    (
        "sad",
        &[
            r"\bsad\b",
            r"\bcr(?:y|ies|ied|ying)\b",
            r"\btears?\b",
            r"\bsorry\b",
            r"\bhurts?\b",
            r"\bpain\b",
            r"\bdisappointed\b",
            r"\bupset\b",
        ],
    ),
];

/// Expression of the lexicon that hints at an emotion
#[derive(Debug, Clone)]
struct ExpressionHint {
    pattern: String,
    case_sensitive: bool,
    emotion: String,
}

/// Scores text against per-emotion patterns
#[derive(Debug, Clone)]
pub struct EmotionDetector {
    patterns: Vec<(String, Vec<Regex>)>,
    expressions: Vec<ExpressionHint>,
}

impl EmotionDetector {
    /// Detector over the built-in patterns, weighing the lexicon's expressions
    ///
    /// Only expressions that name an emotion take part.
    pub fn new(lexicon: &Lexicon) -> Self {
        let patterns = PATTERNS
            .iter()
            .map(|&(emotion, patterns)| {
                let regexes = patterns
                    .iter()
                    .map(|pattern| Regex::new(&format!("(?i){pattern}")).expect("valid emotion regex"))
                    .collect();
                (emotion.to_owned(), regexes)
            })
            .collect();

        let expressions = lexicon
            .expressions()
            .iter()
            .filter_map(|rule| {
                let emotion = rule.emotion.clone()?;
                let pattern = if rule.case_sensitive {
                    rule.pattern.clone()
                } else {
                    rule.pattern.to_ascii_lowercase()
                };

                Some(ExpressionHint {
                    pattern,
                    case_sensitive: rule.case_sensitive,
                    emotion,
                })
            })
            .collect();

        Self { patterns, expressions }
    }

    /// Detector weighing the built-in lexicon
    pub fn builtin() -> Self {
        Self::new(&Lexicon::builtin())
    }

    /// Non-zero scores, highest first, table order among equal scores
    pub fn scores(&self, text: &str) -> Vec<(&str, u32)> {
        let lowercase = text.to_ascii_lowercase();

        let mut scores: Vec<(&str, u32)> = self
            .patterns
            .iter()
            .map(|(emotion, regexes)| {
                let hits = regexes.iter().map(|re| re.find_iter(text).count()).sum::<usize>();
                (emotion.as_str(), u32::try_from(hits).unwrap_or(u32::MAX))
            })
            .collect();

        for hint in &self.expressions {
            let haystack = if hint.case_sensitive { text } else { &lowercase };
            let occurrences = u32::try_from(haystack.matches(hint.pattern.as_str()).count()).unwrap_or(u32::MAX);

            if occurrences > 0
                && let Some((_, score)) = scores.iter_mut().find(|(id, _)| *id == hint.emotion)
            {
                *score = score.saturating_add(occurrences.saturating_mul(EXPRESSION_WEIGHT));
            }
        }

        scores.retain(|&(_, score)| score > 0);
        scores.sort_by_key(|&(_, score)| Reverse(score));
        scores
    }

    /// Best scoring emotion, if any pattern matched
    pub fn detect(&self, text: &str) -> Option<&str> {
        self.scores(text).first().map(|&(emotion, _)| emotion)
    }
}

impl Default for EmotionDetector {
    fn default() -> Self {
        Self::builtin()
    }
}
