use thiserror::Error;

pub type Result<T, E = TranscriptionError> = core::result::Result<T, E>;

/// Failure conditions a caller must tell apart before extracting intents
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// Audio was captured but no words could be recognised
    #[error("could not understand audio")]
    Unintelligible,
    /// The transcription service could not be reached or has no more input
    #[error("transcription unavailable: {0}")]
    Unavailable(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscriptionError {
    /// Whether asking again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, TranscriptionError::Unintelligible)
    }
}
