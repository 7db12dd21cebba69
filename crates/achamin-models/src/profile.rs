//! Cultural profile catalog.
//!
//! Each image category maps to a fixed bundle of themes, mood, genre,
//! music style, story length, and voice characteristics. Profiles are
//! immutable once selected.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Image category determined by the label classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProfileCategory {
    /// Art, sculpture, pottery, weaving
    #[default]
    CulturalArtifacts,
    /// Ceremony, ritual, religious objects
    CeremonialObjects,
    /// Clothing, dress, costume, textile
    TraditionalClothing,
    /// Buildings, monuments
    ArchitecturalHeritage,
    /// Food, dishes, cooking
    CulinaryTraditions,
}

impl ProfileCategory {
    pub const ALL: &'static [ProfileCategory] = &[
        ProfileCategory::CulturalArtifacts,
        ProfileCategory::CeremonialObjects,
        ProfileCategory::TraditionalClothing,
        ProfileCategory::ArchitecturalHeritage,
        ProfileCategory::CulinaryTraditions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileCategory::CulturalArtifacts => "cultural_artifacts",
            ProfileCategory::CeremonialObjects => "ceremonial_objects",
            ProfileCategory::TraditionalClothing => "traditional_clothing",
            ProfileCategory::ArchitecturalHeritage => "architectural_heritage",
            ProfileCategory::CulinaryTraditions => "culinary_traditions",
        }
    }
}

impl fmt::Display for ProfileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Narrative mood attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Reverent,
    Mystical,
    Proud,
    AweInspiring,
    Warm,
    #[default]
    Neutral,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Reverent => "reverent",
            Mood::Mystical => "mystical",
            Mood::Proud => "proud",
            Mood::AweInspiring => "awe_inspiring",
            Mood::Warm => "warm",
            Mood::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Background music style attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum MusicStyle {
    #[default]
    AmbientWorld,
    EtherealAmbient,
    TraditionalFolk,
    EpicOrchestral,
    WarmAcoustic,
}

impl MusicStyle {
    pub const ALL: &'static [MusicStyle] = &[
        MusicStyle::AmbientWorld,
        MusicStyle::EtherealAmbient,
        MusicStyle::TraditionalFolk,
        MusicStyle::EpicOrchestral,
        MusicStyle::WarmAcoustic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MusicStyle::AmbientWorld => "ambient_world",
            MusicStyle::EtherealAmbient => "ethereal_ambient",
            MusicStyle::TraditionalFolk => "traditional_folk",
            MusicStyle::EpicOrchestral => "epic_orchestral",
            MusicStyle::WarmAcoustic => "warm_acoustic",
        }
    }
}

impl fmt::Display for MusicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MusicStyle {
    type Err = MusicStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ambient_world" => Ok(MusicStyle::AmbientWorld),
            "ethereal_ambient" => Ok(MusicStyle::EtherealAmbient),
            "traditional_folk" => Ok(MusicStyle::TraditionalFolk),
            "epic_orchestral" => Ok(MusicStyle::EpicOrchestral),
            "warm_acoustic" => Ok(MusicStyle::WarmAcoustic),
            _ => Err(MusicStyleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown music style: {0}")]
pub struct MusicStyleParseError(String);

/// Target story length for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl StoryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Medium => "medium",
            StoryLength::Long => "long",
        }
    }
}

impl fmt::Display for StoryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cultural profile: the fixed bundle of narrative attributes for one
/// image category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CulturalProfile {
    pub category: ProfileCategory,
    pub themes: Vec<String>,
    pub mood: Mood,
    pub genre: String,
    pub music_style: MusicStyle,
    pub story_length: StoryLength,
    pub voice_characteristics: Vec<String>,
}

impl CulturalProfile {
    /// Look up the catalog profile for a category.
    pub fn for_category(category: ProfileCategory) -> Self {
        let (themes, mood, genre, music_style, story_length, voices): (
            &[&str],
            Mood,
            &str,
            MusicStyle,
            StoryLength,
            &[&str],
        ) = match category {
            ProfileCategory::CulturalArtifacts => (
                &["heritage", "tradition", "artistry", "craftsmanship"],
                Mood::Reverent,
                "cultural_documentary",
                MusicStyle::AmbientWorld,
                StoryLength::Medium,
                &["warm", "knowledgeable"],
            ),
            ProfileCategory::CeremonialObjects => (
                &["ritual", "spirituality", "community", "celebration"],
                Mood::Mystical,
                "spiritual_narrative",
                MusicStyle::EtherealAmbient,
                StoryLength::Long,
                &["reverent", "storytelling"],
            ),
            ProfileCategory::TraditionalClothing => (
                &["identity", "beauty", "social_status", "cultural_pride"],
                Mood::Proud,
                "cultural_exploration",
                MusicStyle::TraditionalFolk,
                StoryLength::Medium,
                &["enthusiastic", "descriptive"],
            ),
            ProfileCategory::ArchitecturalHeritage => (
                &["history", "engineering", "community", "endurance"],
                Mood::AweInspiring,
                "historical_narrative",
                MusicStyle::EpicOrchestral,
                StoryLength::Long,
                &["authoritative", "narrative"],
            ),
            ProfileCategory::CulinaryTraditions => (
                &["nourishment", "family", "celebration", "sensory_experience"],
                Mood::Warm,
                "sensory_story",
                MusicStyle::WarmAcoustic,
                StoryLength::Short,
                &["friendly", "descriptive"],
            ),
        };

        Self {
            category,
            themes: themes.iter().map(|s| s.to_string()).collect(),
            mood,
            genre: genre.to_string(),
            music_style,
            story_length,
            voice_characteristics: voices.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Themes flattened to a comma-separated string (record storage form).
    pub fn themes_flat(&self) -> String {
        if self.themes.is_empty() {
            "none".to_string()
        } else {
            self.themes.join(",")
        }
    }
}

impl Default for CulturalProfile {
    fn default() -> Self {
        Self::for_category(ProfileCategory::CulturalArtifacts)
    }
}
