//! AI client error types.

use thiserror::Error;

pub type DetectorResult<T> = Result<T, DetectorError>;

/// Errors from the label detection service.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The image itself was rejected (malformed, wrong format, too large).
    /// This is the only detector failure that aborts a pipeline run.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Detection request failed: {0}")]
    RequestFailed(String),

    #[error("Detection service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl DetectorError {
    /// Whether this failure means the input image is unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, DetectorError::InvalidImage(_))
    }
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Errors from the text-generation service.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Prompt rejected: {0}")]
    Rejected(String),

    #[error("Generation timed out: {0}")]
    Timeout(String),

    #[error("Generation throttled: {0}")]
    Throttled(String),

    #[error("Malformed generation response: {0}")]
    InvalidResponse(String),

    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SynthResult<T> = Result<T, SynthError>;

/// Errors from the speech-synthesis service.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The service rejected the (voice, engine) combination or the text.
    #[error("Synthesis rejected: {0}")]
    Validation(String),

    #[error("Synthesis failed: {0}")]
    Synthesis(String),
}

impl SynthError {
    /// Whether this is a validation-class rejection, eligible for the
    /// standard-engine retry.
    pub fn is_validation(&self) -> bool {
        matches!(self, SynthError::Validation(_))
    }
}
