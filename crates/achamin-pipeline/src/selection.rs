//! Voice and background-music selection.
//!
//! Both selectors pick uniformly from static candidate tables through the
//! injected [`RandomSource`], so selection is reproducible under a seeded
//! source.

use achamin_models::MusicStyle;

use crate::rng::RandomSource;

/// Voices used when no characteristic maps to a candidate.
pub const DEFAULT_VOICES: &[&str] = &["Joanna", "Matthew"];

/// Characteristic -> candidate voices.
const VOICE_TABLE: &[(&str, &[&str])] = &[
    ("warm", &["Joanna", "Salli", "Aditi"]),
    ("knowledgeable", &["Matthew", "Justin"]),
    ("reverent", &["Matthew", "Joanna"]),
    ("storytelling", &["Joanna", "Matthew", "Salli"]),
    ("enthusiastic", &["Salli", "Kendra"]),
    ("descriptive", &["Joanna", "Matthew"]),
    ("authoritative", &["Matthew", "Justin"]),
    ("narrative", &["Joanna", "Matthew"]),
    ("friendly", &["Salli", "Kendra", "Aditi"]),
];

/// A selected narration voice and the characteristics that produced it.
#[derive(Debug, Clone)]
pub struct VoiceSelection {
    pub voice_id: String,
    pub characteristics: Vec<String>,
}

/// A selected background-music track.
#[derive(Debug, Clone)]
pub struct MusicSelection {
    pub file_name: String,
    pub style: MusicStyle,
}

/// Candidate voices for the given characteristics, deduplicated preserving
/// table order; the default pair when nothing maps.
pub fn voice_candidates(characteristics: &[String]) -> Vec<&'static str> {
    let mut candidates = Vec::new();
    for characteristic in characteristics {
        let key = characteristic.to_lowercase();
        if let Some((_, voices)) = VOICE_TABLE.iter().find(|(name, _)| *name == key) {
            for voice in *voices {
                if !candidates.contains(voice) {
                    candidates.push(*voice);
                }
            }
        }
    }

    if candidates.is_empty() {
        candidates.extend_from_slice(DEFAULT_VOICES);
    }
    candidates
}

/// Pick a voice for the desired characteristics.
pub fn select_voice(characteristics: &[String], rng: &mut dyn RandomSource) -> VoiceSelection {
    let candidates = voice_candidates(characteristics);
    let voice_id = candidates[rng.pick_index(candidates.len())].to_string();
    VoiceSelection {
        voice_id,
        characteristics: characteristics.to_vec(),
    }
}

/// Candidate track filenames for a music style.
pub fn music_candidates(style: MusicStyle) -> &'static [&'static str] {
    match style {
        MusicStyle::AmbientWorld => &[
            "ambient_world_1.mp3",
            "ambient_world_2.mp3",
            "ambient_world_3.mp3",
        ],
        MusicStyle::EtherealAmbient => &[
            "ethereal_ambient_1.mp3",
            "ethereal_ambient_2.mp3",
            "ethereal_ambient_3.mp3",
        ],
        MusicStyle::TraditionalFolk => &[
            "traditional_folk_1.mp3",
            "traditional_folk_2.mp3",
            "traditional_folk_3.mp3",
        ],
        MusicStyle::EpicOrchestral => &[
            "epic_orchestral_1.mp3",
            "epic_orchestral_2.mp3",
            "epic_orchestral_3.mp3",
        ],
        MusicStyle::WarmAcoustic => &[
            "warm_acoustic_1.mp3",
            "warm_acoustic_2.mp3",
            "warm_acoustic_3.mp3",
        ],
    }
}

/// Pick a background track for the style.
pub fn select_music(style: MusicStyle, rng: &mut dyn RandomSource) -> MusicSelection {
    let candidates = music_candidates(style);
    let file_name = candidates[rng.pick_index(candidates.len())].to_string();
    MusicSelection { file_name, style }
}

/// Pick a background track from a raw style key; unknown keys fall back to
/// the default style's candidates.
pub fn select_music_by_key(key: &str, rng: &mut dyn RandomSource) -> MusicSelection {
    let style: MusicStyle = key.parse().unwrap_or_default();
    select_music(style, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRandom;

    fn chars(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_voice_candidates_merge_and_dedupe() {
        // "warm" and "knowledgeable" overlap with other tables but not
        // each other; "reverent" re-adds Matthew and Joanna.
        let candidates = voice_candidates(&chars(&["warm", "knowledgeable", "reverent"]));
        assert_eq!(candidates, vec!["Joanna", "Salli", "Aditi", "Matthew", "Justin"]);
    }

    #[test]
    fn test_unknown_characteristics_fall_back_to_default_pair() {
        for input in [vec![], chars(&["gravelly", "whisper"])] {
            let candidates = voice_candidates(&input);
            assert_eq!(candidates, DEFAULT_VOICES);
        }
    }

    #[test]
    fn test_selected_voice_comes_from_candidates() {
        let characteristics = chars(&["enthusiastic", "friendly"]);
        let candidates = voice_candidates(&characteristics);
        for seed in 0..32 {
            let mut rng = SeededRandom::new(seed);
            let selection = select_voice(&characteristics, &mut rng);
            assert!(candidates.contains(&selection.voice_id.as_str()));
        }
    }

    #[test]
    fn test_voice_selection_reproducible_with_seed() {
        let characteristics = chars(&["storytelling"]);
        let mut a = SeededRandom::new(11);
        let mut b = SeededRandom::new(11);
        assert_eq!(
            select_voice(&characteristics, &mut a).voice_id,
            select_voice(&characteristics, &mut b).voice_id
        );
    }

    #[test]
    fn test_music_stays_in_style_candidates() {
        for &style in MusicStyle::ALL {
            let candidates = music_candidates(style);
            for seed in 0..16 {
                let mut rng = SeededRandom::new(seed);
                let selection = select_music(style, &mut rng);
                assert!(candidates.contains(&selection.file_name.as_str()));
                assert_eq!(selection.style, style);
            }
        }
    }

    #[test]
    fn test_unknown_music_key_uses_default_style() {
        let mut rng = SeededRandom::new(3);
        let selection = select_music_by_key("synthwave", &mut rng);
        assert_eq!(selection.style, MusicStyle::AmbientWorld);
        assert!(music_candidates(MusicStyle::AmbientWorld)
            .contains(&selection.file_name.as_str()));
    }
}
