//! Pipeline orchestration.

use std::sync::Arc;

use tracing::{info, warn};

use achamin_ai::{
    BedrockGenerator, LabelDetector, PollySynthesizer, RekognitionDetector, SpeechSynthesizer,
    TextGenerator,
};
use achamin_media::{FfmpegMixer, MixEngine};
use achamin_models::{keys, AnalysisResult, NarrativeRequest, ProcessingRecord, RequestId};
use achamin_storage::{ContentStore, DynamoRecordStore, RecordStore, S3ContentStore};

use crate::classifier::{assemble_labels, classify, fallback_labels};
use crate::config::PipelineConfig;
use crate::deadline::Deadline;
use crate::error::{Degradation, PipelineError, PipelineResult};
use crate::mixing::mix_and_publish;
use crate::narration::synthesize_narration;
use crate::rng::RandomSource;
use crate::selection::{select_music, select_voice};
use crate::story::generate_story;
use crate::style::select_style;

/// A completed pipeline run: the assembled result plus the stages that
/// substituted fallback values along the way.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub result: AnalysisResult,
    pub degradations: Vec<Degradation>,
}

impl PipelineOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Injected collaborators and configuration for pipeline runs.
///
/// All service handles are explicit parameters so tests substitute
/// in-memory doubles; nothing here is process-global.
pub struct ProcessingContext {
    pub config: PipelineConfig,
    pub detector: Arc<dyn LabelDetector>,
    pub generator: Arc<dyn TextGenerator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub store: Arc<dyn ContentStore>,
    pub records: Arc<dyn RecordStore>,
    pub mixer: Arc<dyn MixEngine>,
}

impl ProcessingContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: PipelineConfig,
        detector: Arc<dyn LabelDetector>,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn ContentStore>,
        records: Arc<dyn RecordStore>,
        mixer: Arc<dyn MixEngine>,
    ) -> Self {
        Self {
            config,
            detector,
            generator,
            synthesizer,
            store,
            records,
            mixer,
        }
    }

    /// Build a context with the AWS-backed collaborators from the ambient
    /// environment.
    pub async fn from_env() -> Self {
        Self {
            config: PipelineConfig::from_env(),
            detector: Arc::new(RekognitionDetector::from_env().await),
            generator: Arc::new(BedrockGenerator::from_env().await),
            synthesizer: Arc::new(PollySynthesizer::from_env().await),
            store: Arc::new(S3ContentStore::from_env().await),
            records: Arc::new(DynamoRecordStore::from_env().await),
            mixer: Arc::new(FfmpegMixer::probe()),
        }
    }

    /// Run the full pipeline over one image.
    ///
    /// Every stage after label detection isolates its own failure and
    /// substitutes a fallback value; the run always completes with a
    /// result. Only an invalid input image aborts.
    pub async fn process_image(
        &self,
        image: &[u8],
        rng: &mut dyn RandomSource,
    ) -> PipelineResult<PipelineOutcome> {
        let request_id = RequestId::new();
        let deadline = Deadline::after(self.config.deadline);
        let mut degradations = Vec::new();

        info!(request_id = %request_id, "Processing image ({} bytes)", image.len());

        // Keep a copy of the source image; detection reads the in-memory
        // bytes, so this upload is best-effort.
        let upload_key = keys::upload_image(&request_id);
        match deadline
            .bound(self.store.put(
                &self.config.upload_bucket,
                &upload_key,
                image.to_vec(),
                Some("image/jpeg"),
            ))
            .await
        {
            Some(Ok(())) => {}
            Some(Err(e)) => warn!("Source image upload failed: {}", e),
            None => warn!("Source image upload hit the deadline"),
        }

        // Detection. An invalid image is the one fatal failure; anything
        // else degrades to the generic label set.
        let labels = match deadline.bound(self.detector.detect(image)).await {
            Some(Ok(detected)) => {
                let labels = assemble_labels(&detected);
                if labels.is_empty() {
                    degradations.push(Degradation::Detection);
                    fallback_labels()
                } else {
                    labels
                }
            }
            Some(Err(e)) if e.is_invalid_input() => {
                return Err(PipelineError::invalid_input(e.to_string()));
            }
            Some(Err(e)) => {
                warn!("Label detection failed: {}", e);
                degradations.push(Degradation::Detection);
                fallback_labels()
            }
            None => {
                warn!("Label detection hit the deadline");
                degradations.push(Degradation::Detection);
                fallback_labels()
            }
        };

        // Classification and style are pure table lookups.
        let profile = classify(&labels);
        let style = select_style(profile.mood);
        info!(
            request_id = %request_id,
            category = %profile.category,
            style = %style,
            "Classified {} labels",
            labels.len()
        );

        // Story generation with deterministic fallback.
        let narrative = NarrativeRequest::new(
            request_id.clone(),
            labels.clone(),
            profile.clone(),
            style,
        );
        let (story, degradation) =
            generate_story(self.generator.as_ref(), &narrative, &deadline).await;
        degradations.extend(degradation);

        // Voice and music selection through the injected random source.
        let voice = select_voice(&profile.voice_characteristics, rng);
        let music = select_music(profile.music_style, rng);

        // Narration synthesis with engine fallback.
        let (narration, degradation) = synthesize_narration(
            self.synthesizer.as_ref(),
            &story.text,
            &voice.voice_id,
            &deadline,
        )
        .await;
        degradations.extend(degradation);

        // Publish the narration artifact and the background-music
        // reference; failures leave empty references but never abort.
        let narration_key = keys::narration_audio(&request_id);
        match deadline
            .bound(self.store.put(
                &self.config.content_bucket,
                &narration_key,
                narration,
                Some("audio/mpeg"),
            ))
            .await
        {
            Some(Ok(())) => {}
            Some(Err(e)) => warn!("Narration upload failed: {}", e),
            None => warn!("Narration upload hit the deadline"),
        }

        let reference = serde_json::json!({
            "music_file": &music.file_name,
            "music_style": music.style,
            "voice_id": &voice.voice_id,
        });
        match deadline
            .bound(self.store.put(
                &self.config.content_bucket,
                &keys::music_reference(&request_id),
                reference.to_string().into_bytes(),
                Some("application/json"),
            ))
            .await
        {
            Some(Ok(())) => {}
            Some(Err(e)) => warn!("Music reference upload failed: {}", e),
            None => warn!("Music reference upload hit the deadline"),
        }

        let narration_url = match deadline
            .bound(self.store.presign(
                &self.config.content_bucket,
                &narration_key,
                self.config.presign_ttl,
            ))
            .await
        {
            Some(Ok(url)) => url,
            Some(Err(e)) => {
                warn!("Narration presign failed: {}", e);
                String::new()
            }
            None => {
                warn!("Narration presign hit the deadline");
                String::new()
            }
        };

        let music_url = match deadline
            .bound(self.store.presign(
                &self.config.music_bucket,
                &keys::music_asset(&music.file_name),
                self.config.presign_ttl,
            ))
            .await
        {
            Some(Ok(url)) => url,
            Some(Err(e)) => {
                warn!("Music presign failed: {}", e);
                String::new()
            }
            None => {
                warn!("Music presign hit the deadline");
                String::new()
            }
        };

        // Blend narration with background music when possible.
        let mix = mix_and_publish(
            self.store.as_ref(),
            self.mixer.as_ref(),
            &self.config,
            &request_id,
            &narration_url,
            music.style,
            &deadline,
        )
        .await;
        degradations.extend(mix.degradation);

        // Best-effort processing record.
        let record = ProcessingRecord::new(
            request_id.clone(),
            labels.clone(),
            profile.category,
            profile.themes_flat(),
            profile.mood,
            &story,
        );
        match deadline.bound(self.records.put_record(&record)).await {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                warn!("Record write failed: {}", e);
                degradations.push(Degradation::Persistence);
            }
            None => {
                warn!("Record write hit the deadline");
                degradations.push(Degradation::Persistence);
            }
        }

        let story_length = profile.story_length;
        let result = AnalysisResult {
            cultural_context: story.text,
            audio_url: mix.audio_url,
            music_url,
            music_file: music.file_name,
            music_style: music.style,
            voice_id: voice.voice_id,
            detected_elements: labels,
            image_metadata: profile,
            request_id: request_id.clone(),
            story_length,
        };

        info!(
            request_id = %request_id,
            degraded_stages = degradations.len(),
            "Pipeline run complete"
        );

        Ok(PipelineOutcome {
            result,
            degradations,
        })
    }
}
