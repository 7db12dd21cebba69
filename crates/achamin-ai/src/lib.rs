//! AI service clients for the Achamin backend.
//!
//! This crate provides:
//! - Label detection (Amazon Rekognition)
//! - Text generation (Amazon Bedrock, Claude)
//! - Speech synthesis (Amazon Polly)
//!
//! Each collaborator is an async trait so the pipeline can substitute
//! in-memory doubles in tests; the AWS-backed implementations live next to
//! their trait.

pub mod detector;
pub mod error;
pub mod generator;
pub mod synthesizer;

pub use detector::{LabelDetector, RekognitionDetector};
pub use error::{DetectorError, DetectorResult, GeneratorError, GeneratorResult, SynthError, SynthResult};
pub use generator::{BedrockGenerator, GenerationRequest, TextGenerator};
pub use synthesizer::{PollySynthesizer, SpeechSynthesizer, VoiceEngine};
