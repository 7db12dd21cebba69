//! Narrative style and generated story models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Narrative style used to build the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeStyle {
    /// Complete narrative arc with a hook and a closing reflection
    #[default]
    Storytelling,
    /// Structured introduction / context / significance walkthrough
    Educational,
    /// Imagery-led cultural meditation
    Poetic,
    /// Uplifting focus on ingenuity and resilience
    Inspirational,
}

impl NarrativeStyle {
    pub const ALL: &'static [NarrativeStyle] = &[
        NarrativeStyle::Storytelling,
        NarrativeStyle::Educational,
        NarrativeStyle::Poetic,
        NarrativeStyle::Inspirational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeStyle::Storytelling => "storytelling",
            NarrativeStyle::Educational => "educational",
            NarrativeStyle::Poetic => "poetic",
            NarrativeStyle::Inspirational => "inspirational",
        }
    }
}

impl fmt::Display for NarrativeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NarrativeStyle {
    type Err = NarrativeStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "storytelling" => Ok(NarrativeStyle::Storytelling),
            "educational" => Ok(NarrativeStyle::Educational),
            "poetic" => Ok(NarrativeStyle::Poetic),
            "inspirational" => Ok(NarrativeStyle::Inspirational),
            _ => Err(NarrativeStyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown narrative style: {0}")]
pub struct NarrativeStyleParseError(String);

/// Whether a story came from the generation service or the fallback template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoryOrigin {
    /// Produced by the text-generation service
    Generated,
    /// Deterministic fallback template
    Fallback,
}

/// A narration-ready story.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GeneratedStory {
    /// Post-processed narration text; never empty, always ends in
    /// terminal punctuation.
    pub text: String,
    pub style: NarrativeStyle,
    pub origin: StoryOrigin,
}

impl GeneratedStory {
    pub fn is_fallback(&self) -> bool {
        self.origin == StoryOrigin::Fallback
    }

    /// Preview of the story text, truncated for record storage.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() > max_chars {
            let truncated: String = self.text.chars().take(max_chars).collect();
            format!("{}...", truncated)
        } else {
            self.text.clone()
        }
    }
}
