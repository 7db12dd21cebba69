//! Media error types.

use thiserror::Error;

pub type MediaResult<T> = Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Mixing tool unavailable")]
    MixerUnavailable,

    #[error("Mix failed: {0}")]
    MixFailed(String),

    #[error("Empty mix output")]
    EmptyOutput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    pub fn mix_failed(msg: impl Into<String>) -> Self {
        Self::MixFailed(msg.into())
    }
}
