//! Storage key layout.
//!
//! Artifacts are keyed by the request ID: uploads, narration, mixed audio,
//! and the background-music reference all derive their keys here so the
//! layout lives in one place.

use crate::request::RequestId;

/// Key for the uploaded source image (upload bucket).
pub fn upload_image(request_id: &RequestId) -> String {
    format!("uploads/{}.jpg", request_id)
}

/// Key for the narration audio (content bucket).
pub fn narration_audio(request_id: &RequestId) -> String {
    format!("audio/narration/{}.mp3", request_id)
}

/// Key for the mixed narration+music output (content bucket).
pub fn mixed_audio(request_id: &RequestId) -> String {
    format!("audio/mixed/{}.mp3", request_id)
}

/// Key for the background-music reference metadata (content bucket).
pub fn music_reference(request_id: &RequestId) -> String {
    format!("audio/background/{}.json", request_id)
}

/// Key for a background-music asset (music bucket).
pub fn music_asset(file_name: &str) -> String {
    format!("background_music/{}", file_name)
}
