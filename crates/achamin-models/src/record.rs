//! Processing record persisted after each pipeline run.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::profile::{Mood, ProfileCategory};
use crate::request::RequestId;
use crate::story::GeneratedStory;

/// Max characters of story text kept in the record preview.
pub const STORY_PREVIEW_CHARS: usize = 200;

/// Best-effort metadata record of one pipeline run.
///
/// Absence of this record never invalidates a completed run; persistence
/// failures are logged and swallowed by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProcessingRecord {
    pub request_id: RequestId,

    /// Completion time of the run
    pub timestamp: DateTime<Utc>,

    /// Final label list fed into classification
    pub labels: Vec<String>,

    pub category: ProfileCategory,

    /// Story text truncated to [`STORY_PREVIEW_CHARS`]
    pub story_preview: String,

    /// Character count of the full story text
    pub story_chars: usize,

    /// Themes flattened to a comma-separated string
    pub themes: String,

    pub mood: Mood,
}

impl ProcessingRecord {
    /// Build the record for a completed run.
    pub fn new(
        request_id: RequestId,
        labels: Vec<String>,
        category: ProfileCategory,
        themes: String,
        mood: Mood,
        story: &GeneratedStory,
    ) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
            labels,
            category,
            story_preview: story.preview(STORY_PREVIEW_CHARS),
            story_chars: story.text.chars().count(),
            themes,
            mood,
        }
    }
}
