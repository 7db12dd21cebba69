//! The mixing stage: blend narration with background music and publish the
//! result.

use tracing::{debug, warn};

use achamin_media::{MixEngine, MixGains};
use achamin_models::{keys, MusicStyle, RequestId};
use achamin_storage::ContentStore;

use crate::config::PipelineConfig;
use crate::deadline::Deadline;
use crate::error::Degradation;
use crate::selection::music_candidates;

/// Result of the mixing stage.
#[derive(Debug, Clone)]
pub struct MixOutcome {
    /// Presigned reference to the published audio: the blended output, or
    /// the narration-only artifact when mixing degraded.
    pub audio_url: String,
    pub degradation: Option<Degradation>,
}

/// Blend the stored narration with the style's first background candidate
/// and publish under the mixed-audio key.
///
/// The narration is fetched back from storage by key; the background track
/// degrades to an empty payload on fetch failure. When the mix engine is
/// unavailable, either input is empty, or blending fails, the narration
/// payload is published unchanged. If even the narration fetch or the
/// publish fails, the stage falls back to the caller's existing narration
/// reference.
pub async fn mix_and_publish(
    store: &dyn ContentStore,
    engine: &dyn MixEngine,
    config: &PipelineConfig,
    request_id: &RequestId,
    narration_url: &str,
    music_style: MusicStyle,
    deadline: &Deadline,
) -> MixOutcome {
    let degraded = |reason: &str| {
        warn!(request_id = %request_id, "Mixing degraded: {}", reason);
        MixOutcome {
            audio_url: narration_url.to_string(),
            degradation: Some(Degradation::Mixing),
        }
    };

    // (a) fetch narration back from storage
    let narration_key = keys::narration_audio(request_id);
    let narration = match deadline
        .bound(store.get(&config.content_bucket, &narration_key))
        .await
    {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => return degraded(&format!("narration fetch failed: {e}")),
        None => return degraded("narration fetch hit the deadline"),
    };

    // (b) fetch the style's first background candidate; empty on failure
    let music_file = music_candidates(music_style)[0];
    let music = match deadline
        .bound(store.get(&config.music_bucket, &keys::music_asset(music_file)))
        .await
    {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => {
            warn!("Background music fetch failed, mixing without music: {}", e);
            Vec::new()
        }
        None => {
            warn!("Background music fetch hit the deadline");
            Vec::new()
        }
    };

    // (c) blend when possible; (d) otherwise pass the narration through
    let mut blended = false;
    let output = if narration.is_empty() || music.is_empty() || !engine.is_available() {
        debug!("Skipping blend (narration/music/engine unavailable)");
        narration
    } else {
        match deadline
            .bound(engine.mix(&narration, &music, MixGains::default()))
            .await
        {
            Some(Ok(mixed)) => {
                blended = true;
                mixed
            }
            Some(Err(e)) => {
                warn!("Blend failed, publishing narration only: {}", e);
                narration
            }
            None => {
                warn!("Blend hit the deadline, publishing narration only");
                narration
            }
        }
    };

    // publish under the mixed key and presign
    let mixed_key = keys::mixed_audio(request_id);
    let put = deadline
        .bound(store.put(
            &config.content_bucket,
            &mixed_key,
            output,
            Some("audio/mpeg"),
        ))
        .await;
    match put {
        Some(Ok(())) => {}
        Some(Err(e)) => return degraded(&format!("mixed upload failed: {e}")),
        None => return degraded("mixed upload hit the deadline"),
    }

    let audio_url = match deadline
        .bound(store.presign(&config.content_bucket, &mixed_key, config.presign_ttl))
        .await
    {
        Some(Ok(url)) => url,
        Some(Err(e)) => return degraded(&format!("mixed presign failed: {e}")),
        None => return degraded("mixed presign hit the deadline"),
    };

    MixOutcome {
        audio_url,
        degradation: if blended {
            None
        } else {
            Some(Degradation::Mixing)
        },
    }
}
