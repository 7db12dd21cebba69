//! Pipeline error types and degradation tags.

use std::fmt;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal pipeline errors. Everything else degrades in place.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input image was rejected by the detector (malformed, wrong
    /// format, too large). The only caller-visible failure.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PipelineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Which stage substituted a fallback value during a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// Detector failed; generic default label set used
    Detection,
    /// Text generation failed; templated fallback story used
    Generation,
    /// Speech synthesis failed; empty narration payload
    Synthesis,
    /// Mixing unavailable or failed; narration-only output
    Mixing,
    /// Record write failed; logged and swallowed
    Persistence,
}

impl Degradation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Degradation::Detection => "detection",
            Degradation::Generation => "generation",
            Degradation::Synthesis => "synthesis",
            Degradation::Mixing => "mixing",
            Degradation::Persistence => "persistence",
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
