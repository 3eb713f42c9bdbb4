//! SSML rendering of a token stream with resolved voice parameters

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::{rewriter::Token, voice::ResolvedVoice};

const DEFAULT_LANG: &str = "en-US";

/// Intensity of a speaking style, `1` being the voice's neutral rendition
const STYLE_DEGREE: &str = "1.5";

const PITCH_BOUNDS: (i32, i32) = (-50, 50);
const RATE_BOUNDS: (i32, i32) = (-50, 100);
const VOLUME_BOUNDS: (i32, i32) = (-100, 100);

/// Relative prosody adjustments in percent, within provider bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prosody {
    pub pitch_pct: i32,
    pub rate_pct: i32,
    pub volume_pct: i32,
}

/// Complete markup document ready for a synthesis provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupDocument {
    lang: String,
    voice_identity: String,
    style: Option<String>,
    prosody: Prosody,
    tokens: Vec<Token>,
}

/// Wrap tokens in a voice and prosody envelope
pub fn compose(tokens: Vec<Token>, voice: &ResolvedVoice) -> MarkupDocument {
    let prosody = Prosody {
        pitch_pct: clamp("pitch", voice.pitch_pct, PITCH_BOUNDS),
        rate_pct: clamp("rate", voice.rate_pct, RATE_BOUNDS),
        volume_pct: clamp("volume", voice.volume_pct, VOLUME_BOUNDS),
    };

    MarkupDocument {
        lang: locale_of(&voice.voice_identity).to_owned(),
        voice_identity: voice.voice_identity.clone(),
        style: voice.style.clone(),
        prosody,
        tokens,
    }
}

fn clamp(name: &str, value: i32, (min, max): (i32, i32)) -> i32 {
    let clamped = value.clamp(min, max);

    if clamped != value {
        tracing::debug!("{name} of {value}% clamped to {clamped}%");
    }

    clamped
}

/// Locale prefix of a neural voice name (`en-US-JennyNeural` is `en-US`)
fn locale_of(voice_identity: &str) -> &str {
    let mut parts = voice_identity.splitn(3, '-');

    let (Some(language), Some(region)) = (parts.next(), parts.next()) else {
        return DEFAULT_LANG;
    };

    let is_code = |part: &str, len: std::ops::RangeInclusive<usize>| {
        len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_alphabetic())
    };

    if is_code(language, 2..=3) && is_code(region, 2..=4) {
        &voice_identity[..language.len() + 1 + region.len()]
    } else {
        DEFAULT_LANG
    }
}

impl MarkupDocument {
    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn voice_identity(&self) -> &str {
        &self.voice_identity
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub const fn prosody(&self) -> Prosody {
        self.prosody
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Render the document as an SSML string
    pub fn to_ssml(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MarkupDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xmlns:mstts="https://www.w3.org/2001/mstts" xml:lang="{}">"#,
            Attr(&self.lang)
        )?;
        write!(f, r#"<voice name="{}">"#, Attr(&self.voice_identity))?;

        if let Some(style) = &self.style {
            write!(
                f,
                r#"<mstts:express-as style="{}" styledegree="{STYLE_DEGREE}">"#,
                Attr(style)
            )?;
        }

        let Prosody {
            pitch_pct,
            rate_pct,
            volume_pct,
        } = self.prosody;
        write!(
            f,
            r#"<prosody pitch="{pitch_pct:+}%" rate="{rate_pct:+}%" volume="{volume_pct:+}%">"#
        )?;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => write!(f, "{}", Text(text))?,
                Token::Emphasized(text, level) => write!(
                    f,
                    r#"<emphasis level="{}">{}</emphasis>"#,
                    level.ssml_level(),
                    Text(text)
                )?,
                Token::Pause(ms) => write!(f, r#"<break time="{ms}ms"/>"#)?,
            }
        }

        f.write_str("</prosody>")?;

        if self.style.is_some() {
            f.write_str("</mstts:express-as>")?;
        }

        f.write_str("</voice></speak>")
    }
}

/// Character data escaped for element content
struct Text<'a>(&'a str);

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        escape(f, self.0, false)
    }
}

/// Character data escaped for a quoted attribute value
struct Attr<'a>(&'a str);

impl fmt::Display for Attr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        escape(f, self.0, true)
    }
}

fn escape(f: &mut fmt::Formatter<'_>, text: &str, quotes: bool) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if quotes => f.write_str("&quot;")?,
            '\'' if quotes => f.write_str("&apos;")?,
            _ => f.write_char(ch)?,
        }
    }

    Ok(())
}
