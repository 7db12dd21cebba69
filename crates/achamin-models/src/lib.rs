//! Shared data models for the Achamin backend.
//!
//! This crate provides Serde-serializable types for:
//! - Detected image labels
//! - Cultural profiles and the profile catalog
//! - Narrative styles and generated stories
//! - Pipeline requests, results, and processing records
//! - Storage key layout

pub mod keys;
pub mod label;
pub mod profile;
pub mod record;
pub mod request;
pub mod story;

// Re-export common types
pub use label::{dedupe_labels, DetectionLabel, HIGH_CONFIDENCE};
pub use profile::{CulturalProfile, Mood, MusicStyle, ProfileCategory, StoryLength};
pub use record::ProcessingRecord;
pub use request::{AnalysisResult, NarrativeRequest, RequestId};
pub use story::{GeneratedStory, NarrativeStyle, StoryOrigin};
