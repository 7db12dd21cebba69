//! Pipeline configuration.

use std::time::Duration;

/// Bucket layout and timing configuration for one pipeline deployment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bucket for uploaded source images
    pub upload_bucket: String,
    /// Bucket for generated narration / mixed audio / references
    pub content_bucket: String,
    /// Bucket holding the background-music assets
    pub music_bucket: String,
    /// Validity of presigned artifact references
    pub presign_ttl: Duration,
    /// Total wall-clock budget for one pipeline run
    pub deadline: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            upload_bucket: "your-achamin-uploads-bucket".to_string(),
            content_bucket: "your-achamin-generated-content-bucket".to_string(),
            music_bucket: "your-achamin-music-bucket".to_string(),
            presign_ttl: Duration::from_secs(3600),
            deadline: Duration::from_secs(300),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables, with defaults for any
    /// that are unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upload_bucket: std::env::var("UPLOAD_BUCKET").unwrap_or(defaults.upload_bucket),
            content_bucket: std::env::var("GENERATED_CONTENT_BUCKET")
                .unwrap_or(defaults.content_bucket),
            music_bucket: std::env::var("MUSIC_BUCKET").unwrap_or(defaults.music_bucket),
            presign_ttl: Duration::from_secs(
                std::env::var("PRESIGN_TTL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            deadline: Duration::from_secs(
                std::env::var("PIPELINE_DEADLINE_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
        }
    }
}
