//! Pipeline request identity and the assembled result.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::profile::{CulturalProfile, MusicStyle, StoryLength};
use crate::story::NarrativeStyle;

/// Unique identifier for one pipeline invocation.
///
/// Generated once at pipeline entry; every artifact key and record is
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input to story generation: the classified request state after label
/// detection and style selection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NarrativeRequest {
    pub request_id: RequestId,
    pub labels: Vec<String>,
    pub profile: CulturalProfile,
    pub style: NarrativeStyle,
}

impl NarrativeRequest {
    pub fn new(
        request_id: RequestId,
        labels: Vec<String>,
        profile: CulturalProfile,
        style: NarrativeStyle,
    ) -> Self {
        Self {
            request_id,
            labels,
            profile,
            style,
        }
    }
}

/// Final structured pipeline output, consumed by the transport boundary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Narration text
    pub cultural_context: String,

    /// Presigned reference to the narrated audio (mixed when mixing
    /// succeeded, narration-only otherwise)
    pub audio_url: String,

    /// Presigned reference to the background music asset
    pub music_url: String,

    /// Selected background music filename
    pub music_file: String,

    /// Selected music style
    pub music_style: MusicStyle,

    /// Selected narration voice
    pub voice_id: String,

    /// Labels detected in the image (after enrichment and dedup)
    pub detected_elements: Vec<String>,

    /// Cultural profile the labels mapped to
    pub image_metadata: CulturalProfile,

    pub request_id: RequestId,

    pub story_length: StoryLength,
}
