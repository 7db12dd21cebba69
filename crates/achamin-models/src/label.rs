//! Detected image label models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Confidence threshold (percent) above which a detected label is kept.
pub const HIGH_CONFIDENCE: f32 = 80.0;

/// A label detected in the source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionLabel {
    /// Label name as reported by the detector
    pub name: String,

    /// Detection confidence, 0-100
    pub confidence: f32,
}

impl DetectionLabel {
    /// Create a new label.
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }

    /// Whether the label clears the high-confidence threshold.
    pub fn is_high_confidence(&self) -> bool {
        self.confidence > HIGH_CONFIDENCE
    }
}

/// Deduplicate label names, keeping the first occurrence of each.
///
/// Comparison is case-sensitive; detectors report canonical casing, and the
/// classifier lower-cases on its side.
pub fn dedupe_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter(|l| seen.insert(l.clone()))
        .collect()
}
