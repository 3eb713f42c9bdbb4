use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarkupError>;

/// Errors raised while building tables or transforming a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// Character id is not present in the voice table
    #[error("unknown character: {0}")]
    UnknownCharacter(String),

    /// Emotion id was supplied but is not present in the voice table
    #[error("unknown emotion: {0}")]
    UnknownEmotion(String),

    /// Caller-level input check failed (empty or over-long text)
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Two character profiles share the same id
    #[error("duplicate character id: {0}")]
    DuplicateCharacter(String),

    /// Two emotion modifiers share the same id
    #[error("duplicate emotion id: {0}")]
    DuplicateEmotion(String),

    /// Emotion id collides with a reserved request keyword
    #[error("emotion id '{0}' is reserved")]
    ReservedEmotion(String),

    /// Expression rule with an empty pattern
    #[error("expression rule for '{phonetic}' has an empty pattern")]
    EmptyPattern { phonetic: String },
}

impl MarkupError {
    /// Whether the error was caused by the request rather than the tables
    pub const fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCharacter(_) | Self::UnknownEmotion(_) | Self::MalformedInput(_)
        )
    }
}
