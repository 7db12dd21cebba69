//! Label classification into cultural profiles.
//!
//! Category rules are an explicit ordered list evaluated first-match-wins,
//! so tie-break behavior is fixed and testable. No rule matching is an
//! error; the default category covers everything else.

use achamin_models::{dedupe_labels, CulturalProfile, DetectionLabel, ProfileCategory};

/// One category rule: any keyword appearing in the joined label text
/// selects the category.
struct CategoryRule {
    keywords: &'static [&'static str],
    category: ProfileCategory,
}

/// Evaluated top to bottom; the first matching rule wins. Ceremonial
/// triggers outrank artifact triggers: a temple full of sculptures is a
/// ceremonial scene, not an art collection.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["ceremony", "ritual", "religious", "temple"],
        category: ProfileCategory::CeremonialObjects,
    },
    CategoryRule {
        keywords: &["art", "sculpture", "pottery", "weaving"],
        category: ProfileCategory::CulturalArtifacts,
    },
    CategoryRule {
        keywords: &["clothing", "dress", "costume", "textile"],
        category: ProfileCategory::TraditionalClothing,
    },
    CategoryRule {
        keywords: &["building", "architecture", "monument", "castle"],
        category: ProfileCategory::ArchitecturalHeritage,
    },
    CategoryRule {
        keywords: &["food", "dish", "cooking", "meal"],
        category: ProfileCategory::CulinaryTraditions,
    },
];

/// Context keywords and the labels they contribute.
const CONTEXT_RULES: &[(&[&str], &[&str])] = &[
    (
        &["art", "sculpture", "painting"],
        &["cultural heritage", "artistic tradition"],
    ),
    (
        &["clothing", "dress", "costume"],
        &["cultural identity", "traditional attire"],
    ),
    (
        &["building", "architecture"],
        &["architectural heritage", "cultural monument"],
    ),
    (
        &["food", "dish", "cooking"],
        &["culinary tradition", "cultural cuisine"],
    ),
];

/// Label set substituted when detection degrades.
pub fn fallback_labels() -> Vec<String> {
    vec![
        "cultural artifact".to_string(),
        "traditional object".to_string(),
    ]
}

/// Map a label set to its cultural profile. Total: unmatched input maps to
/// the default category.
pub fn classify(labels: &[String]) -> CulturalProfile {
    let joined = labels.join(" ").to_lowercase();

    for rule in CATEGORY_RULES {
        if rule.keywords.iter().any(|k| joined.contains(k)) {
            return CulturalProfile::for_category(rule.category);
        }
    }

    CulturalProfile::for_category(ProfileCategory::CulturalArtifacts)
}

/// Context labels derived from the detected set.
pub fn context_labels(labels: &[String]) -> Vec<String> {
    let joined = labels.join(" ").to_lowercase();

    let mut context = Vec::new();
    for (keywords, additions) in CONTEXT_RULES {
        if keywords.iter().any(|k| joined.contains(k)) {
            context.extend(additions.iter().map(|s| s.to_string()));
        }
    }
    context
}

/// Build the final label list from raw detections: keep high-confidence
/// names, add context labels, deduplicate preserving first-seen order.
pub fn assemble_labels(detected: &[DetectionLabel]) -> Vec<String> {
    let mut labels: Vec<String> = detected
        .iter()
        .filter(|l| l.is_high_confidence())
        .map(|l| l.name.clone())
        .collect();

    labels.extend(context_labels(&labels));
    dedupe_labels(labels)
}
