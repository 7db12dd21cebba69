//! Story generation: prompt building, narration post-processing, and the
//! deterministic fallback.

use tracing::warn;

use achamin_ai::{GenerationRequest, TextGenerator};
use achamin_models::{
    CulturalProfile, GeneratedStory, NarrativeRequest, NarrativeStyle, StoryOrigin,
};

use crate::deadline::Deadline;
use crate::error::Degradation;

/// Output budget for one story.
pub const MAX_STORY_TOKENS: u32 = 1500;

const TOP_P: f32 = 0.9;
const TOP_K: u32 = 250;

/// Pause marker inserted after sentence-terminal punctuation for narration
/// pacing.
const PAUSE: &str = "... ";

/// Sampling temperature per style; variety-emphasizing styles sample
/// hotter.
pub fn temperature_for(style: NarrativeStyle) -> f32 {
    match style {
        NarrativeStyle::Poetic | NarrativeStyle::Inspirational => 0.9,
        NarrativeStyle::Storytelling => 0.7,
        NarrativeStyle::Educational => 0.5,
    }
}

/// Build the style-specific generation prompt.
pub fn build_prompt(labels: &[String], profile: &CulturalProfile, style: NarrativeStyle) -> String {
    let elements = labels.join(", ");
    let themes = profile.themes.join(", ");
    let mood = profile.mood.as_str();
    let genre = &profile.genre;

    match style {
        NarrativeStyle::Storytelling => format!(
            "Create a captivating cultural story about an image containing: {elements}.\n\
             \n\
             Context:\n\
             - Themes: {themes}\n\
             - Mood: {mood}\n\
             - Genre: {genre}\n\
             \n\
             Story Requirements:\n\
             1. Begin with a compelling hook that draws the listener in\n\
             2. Weave together the cultural significance of the detected elements\n\
             3. Include sensory details that make the story vivid and immersive\n\
             4. Incorporate cultural wisdom or traditional knowledge\n\
             5. End with a meaningful reflection or lesson\n\
             6. Use language that evokes the {mood} mood\n\
             7. Structure as a complete narrative arc (beginning, middle, end)\n\
             \n\
             Make the story feel like an intimate cultural journey that connects past and present."
        ),
        NarrativeStyle::Educational => format!(
            "Create an educational cultural narrative about: {elements}.\n\
             \n\
             Context:\n\
             - Themes: {themes}\n\
             - Mood: {mood}\n\
             - Genre: {genre}\n\
             \n\
             Educational Structure:\n\
             1. Introduction: What we're looking at and why it matters\n\
             2. Historical Context: Origins and evolution of these cultural elements\n\
             3. Cultural Significance: What these elements mean to their community\n\
             4. Contemporary Relevance: How these traditions continue today\n\
             5. Global Connections: How this connects to universal human experiences\n\
             6. Reflection: Why preserving and understanding these traditions matters\n\
             \n\
             Use clear, engaging language that makes complex cultural concepts accessible."
        ),
        NarrativeStyle::Poetic => format!(
            "Craft a poetic cultural reflection on: {elements}.\n\
             \n\
             Context:\n\
             - Themes: {themes}\n\
             - Mood: {mood}\n\
             - Genre: {genre}\n\
             \n\
             Poetic Elements:\n\
             1. Use vivid imagery and metaphor to capture cultural essence\n\
             2. Employ rhythmic language that flows like poetry\n\
             3. Connect the physical elements to spiritual and emotional dimensions\n\
             4. Express the beauty and wisdom embedded in cultural traditions\n\
             5. Create emotional resonance with universal human experiences\n\
             6. Use language that honors the {mood} mood\n\
             \n\
             Make it feel like a cultural meditation that touches the soul."
        ),
        NarrativeStyle::Inspirational => format!(
            "Find inspiration in the cultural elements: {elements}.\n\
             \n\
             Context:\n\
             - Themes: {themes}\n\
             - Mood: {mood}\n\
             - Genre: {genre}\n\
             \n\
             Inspirational Focus:\n\
             1. Discover the creativity and ingenuity behind these traditions\n\
             2. Highlight the resilience and adaptability of cultural practices\n\
             3. Show how cultural diversity enriches human experience\n\
             4. Demonstrate the power of tradition to connect generations\n\
             5. Inspire appreciation for cultural heritage and preservation\n\
             6. Connect to universal values of beauty, wisdom, and community\n\
             \n\
             Make it uplifting and motivating while honoring cultural authenticity."
        ),
    }
}

/// Optimize story text for audio narration: a pause marker after each
/// sentence boundary, and a terminal period when the text lacks one.
pub fn optimize_for_narration(text: &str) -> String {
    let mut story = text.trim().to_string();

    story = story.replace(". ", &format!(". {}", PAUSE));
    story = story.replace("! ", &format!("! {}", PAUSE));
    story = story.replace("? ", &format!("? {}", PAUSE));

    if !story.ends_with(['.', '!', '?']) {
        story.push('.');
    }

    story
}

/// Deterministic fallback story referencing the detected labels.
pub fn fallback_text(labels: &[String]) -> String {
    format!(
        "A fascinating cultural story about {} that connects us to traditions and heritage.",
        labels.join(", ")
    )
}

/// Generate the narration story.
///
/// Any generation failure (timeout, malformed response, rejected prompt)
/// degrades to the templated fallback; this never surfaces as a pipeline
/// failure. The returned text is non-empty and ends in terminal
/// punctuation.
pub async fn generate_story(
    generator: &dyn TextGenerator,
    request: &NarrativeRequest,
    deadline: &Deadline,
) -> (GeneratedStory, Option<Degradation>) {
    let style = request.style;
    let generation = GenerationRequest {
        prompt: build_prompt(&request.labels, &request.profile, style),
        max_tokens: MAX_STORY_TOKENS,
        temperature: temperature_for(style),
        top_p: Some(TOP_P),
        top_k: Some(TOP_K),
    };

    let raw = match deadline.bound(generator.generate(&generation)).await {
        Some(Ok(text)) if !text.trim().is_empty() => Some(text),
        Some(Ok(_)) => {
            warn!("Generator returned empty text, using fallback story");
            None
        }
        Some(Err(e)) => {
            warn!("Story generation failed: {}", e);
            None
        }
        None => {
            warn!("Story generation hit the pipeline deadline");
            None
        }
    };

    match raw {
        Some(text) => (
            GeneratedStory {
                text: optimize_for_narration(&text),
                style,
                origin: StoryOrigin::Generated,
            },
            None,
        ),
        None => (
            GeneratedStory {
                text: fallback_text(&request.labels),
                style,
                origin: StoryOrigin::Fallback,
            },
            Some(Degradation::Generation),
        ),
    }
}
