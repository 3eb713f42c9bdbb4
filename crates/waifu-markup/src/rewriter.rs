use crate::lexicon::{EmphasisLevel, Lexicon, PunctuationRule};

/// Annotated unit of rewritten text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Plain content read as written
    Literal(String),
    /// Content read with emphasis
    Emphasized(String, EmphasisLevel),
    /// Silence in milliseconds
    Pause(u32),
}

impl Token {
    /// Spoken text carried by the token, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Literal(text) | Self::Emphasized(text, _) => Some(text),
            Self::Pause(_) => None,
        }
    }
}

/// Rewrite raw text into an annotated token stream
///
/// Expressions are matched longest-first at every position and replaced by
/// their phonetic spelling. Punctuation symbols become pauses and may
/// emphasize the literal run in front of them. Everything else is kept as
/// literal content, so the operation is total over any input.
pub fn rewrite(lexicon: &Lexicon, text: &str) -> Vec<Token> {
    let mut writer = TokenWriter::default();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some((rule, len)) = lexicon.match_expression(rest) {
            writer.flush_literal();
            writer.push(Token::Emphasized(rule.phonetic.clone(), EmphasisLevel::Strong));

            if let Some(pause_ms) = rule.pause_ms {
                writer.push_expression_pause(pause_ms);
            }

            rest = &rest[len..];
            continue;
        }

        if let Some(len) = ascii_ellipsis_len(rest)
            && let Some(rule) = lexicon.punctuation_rule(ELLIPSIS)
        {
            writer.punctuate(rule);
            rest = &rest[len..];
            continue;
        }

        let mut chars = rest.chars();
        let Some(ch) = chars.next() else { break };
        rest = chars.as_str();

        match lexicon.punctuation_rule(ch) {
            Some(rule) => writer.punctuate(rule),
            None => writer.literal.push(ch),
        }
    }

    writer.finish()
}

const ELLIPSIS: char = '…';

/// Length of a leading run of three or more ASCII dots, read as one ellipsis
fn ascii_ellipsis_len(text: &str) -> Option<usize> {
    let dots = text.bytes().take_while(|&b| b == b'.').count();
    (dots >= 3).then_some(dots)
}

impl Lexicon {
    /// See [`rewrite`]
    pub fn rewrite(&self, text: &str) -> Vec<Token> {
        rewrite(self, text)
    }
}

#[derive(Default)]
struct TokenWriter {
    tokens: Vec<Token>,
    literal: String,
    /// Last token is an expression's trailing pause that a directly
    /// following punctuation pause may absorb
    mergeable_pause: bool,
}

impl TokenWriter {
    fn push(&mut self, token: Token) {
        self.mergeable_pause = false;
        self.tokens.push(token);
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.push(Token::Literal(text));
        }
    }

    fn push_expression_pause(&mut self, pause_ms: u32) {
        self.push(Token::Pause(pause_ms));
        self.mergeable_pause = true;
    }

    fn punctuate(&mut self, rule: &PunctuationRule) {
        // emphasis only attaches to real content, never to an empty or blank run
        match rule.emphasis {
            Some(level) if !self.literal.trim().is_empty() => {
                let text = std::mem::take(&mut self.literal);
                self.push(Token::Emphasized(text, level));
            }
            _ => self.flush_literal(),
        }

        if self.mergeable_pause
            && let Some(Token::Pause(pause_ms)) = self.tokens.last_mut()
        {
            *pause_ms = (*pause_ms).max(rule.pause_ms);
            self.mergeable_pause = false;
            return;
        }

        self.push(Token::Pause(rule.pause_ms));
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush_literal();
        self.tokens
    }
}
