//! Narrative style selection.

use achamin_models::{Mood, NarrativeStyle};

/// Map a profile mood to its narrative style. Pure; unmapped moods take
/// the default style.
pub fn select_style(mood: Mood) -> NarrativeStyle {
    match mood {
        Mood::Reverent => NarrativeStyle::Storytelling,
        Mood::Mystical => NarrativeStyle::Poetic,
        Mood::Proud => NarrativeStyle::Inspirational,
        Mood::AweInspiring => NarrativeStyle::Storytelling,
        Mood::Warm => NarrativeStyle::Educational,
        Mood::Neutral => NarrativeStyle::Storytelling,
    }
}
