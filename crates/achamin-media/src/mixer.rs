//! FFmpeg-based narration/music blending.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Relative volumes applied to the two inputs.
#[derive(Debug, Clone, Copy)]
pub struct MixGains {
    pub narration: f32,
    pub music: f32,
}

impl Default for MixGains {
    fn default() -> Self {
        Self {
            narration: 1.0,
            music: 0.3,
        }
    }
}

/// Blends narration with background music into one track.
#[async_trait]
pub trait MixEngine: Send + Sync {
    /// Whether the mixing capability is present on this host.
    fn is_available(&self) -> bool;

    /// Blend the two inputs; output duration follows the longer input.
    async fn mix(&self, narration: &[u8], music: &[u8], gains: MixGains) -> MediaResult<Vec<u8>>;
}

/// FFmpeg mix engine.
///
/// The binary is resolved once at construction; staging files live in
/// `staging_dir` and are deleted when their guards drop, on every exit path.
pub struct FfmpegMixer {
    binary: Option<PathBuf>,
    staging_dir: PathBuf,
}

impl FfmpegMixer {
    /// Probe the host for an `ffmpeg` binary.
    pub fn probe() -> Self {
        let binary = which::which("ffmpeg").ok();
        if binary.is_none() {
            warn!("ffmpeg not found, mixing will be skipped");
        }
        Self {
            binary,
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Use an explicit binary (tests exercise failure paths with one that
    /// always exits non-zero).
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: Some(binary.into()),
            staging_dir: std::env::temp_dir(),
        }
    }

    /// An engine with no mixing capability.
    pub fn unavailable() -> Self {
        Self {
            binary: None,
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Override the staging directory.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    fn filter_graph(gains: MixGains) -> String {
        format!(
            "[0:a]volume={:.1}[narration];[1:a]volume={:.1}[music];[narration][music]amix=inputs=2:duration=longest",
            gains.narration, gains.music
        )
    }

    fn stage_file(&self, bytes: &[u8]) -> MediaResult<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new()
            .prefix("achamin-mix-")
            .suffix(".mp3")
            .tempfile_in(&self.staging_dir)?;
        std::io::Write::write_all(&mut file, bytes)?;
        Ok(file)
    }
}

#[async_trait]
impl MixEngine for FfmpegMixer {
    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    async fn mix(&self, narration: &[u8], music: &[u8], gains: MixGains) -> MediaResult<Vec<u8>> {
        let binary = self.binary.as_ref().ok_or(MediaError::MixerUnavailable)?;

        // Staging guards; dropped (and the files deleted) on every return.
        let narration_file = self.stage_file(narration)?;
        let music_file = self.stage_file(music)?;
        let output_file = tempfile::Builder::new()
            .prefix("achamin-mix-")
            .suffix(".mp3")
            .tempfile_in(&self.staging_dir)?;

        debug!(
            "Mixing {} narration bytes with {} music bytes",
            narration.len(),
            music.len()
        );

        let output = Command::new(binary)
            .arg("-i")
            .arg(narration_file.path())
            .arg("-i")
            .arg(music_file.path())
            .arg("-filter_complex")
            .arg(Self::filter_graph(gains))
            .arg("-c:a")
            .arg("mp3")
            .arg("-b:a")
            .arg("192k")
            .arg("-y")
            .arg(output_file.path())
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::mix_failed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let mixed = tokio::fs::read(output_file.path()).await?;
        if mixed.is_empty() {
            return Err(MediaError::EmptyOutput);
        }

        Ok(mixed)
    }
}
