//! Cultural analysis and narration pipeline.
//!
//! Sequences label detection, cultural classification, story generation,
//! speech synthesis, and audio mixing into one always-completing run. Every
//! stage after input validation isolates its own failure and substitutes a
//! well-defined fallback value; the orchestrator collects degradation tags
//! instead of propagating stage errors.

pub mod classifier;
pub mod config;
pub mod deadline;
pub mod error;
pub mod mixing;
pub mod narration;
pub mod processor;
pub mod rng;
pub mod selection;
pub mod story;
pub mod style;

pub use config::PipelineConfig;
pub use deadline::Deadline;
pub use error::{Degradation, PipelineError, PipelineResult};
pub use processor::{PipelineOutcome, ProcessingContext};
pub use rng::{RandomSource, SeededRandom, ThreadRandom};
