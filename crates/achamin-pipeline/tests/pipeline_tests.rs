//! End-to-end pipeline tests against in-memory collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use achamin_ai::{
    DetectorError, DetectorResult, GenerationRequest, GeneratorError, GeneratorResult,
    LabelDetector, SpeechSynthesizer, SynthError, SynthResult, TextGenerator, VoiceEngine,
};
use achamin_media::{MediaError, MediaResult, MixEngine, MixGains};
use achamin_models::{DetectionLabel, MusicStyle, ProcessingRecord, ProfileCategory, StoryLength};
use achamin_pipeline::{
    Degradation, PipelineConfig, PipelineError, ProcessingContext, SeededRandom,
};
use achamin_storage::{ContentStore, RecordStore, StorageError, StorageResult};

// ---------------------------------------------------------------------------
// In-memory collaborators

#[derive(Default)]
struct MemoryStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryStore {
    fn seed(&self, bucket: &str, key: &str, bytes: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), bytes.to_vec());
    }

    fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    fn key_with_prefix(&self, bucket: &str, prefix: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .find(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: Option<&str>,
    ) -> StorageResult<()> {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.object(bucket, key)
            .ok_or_else(|| StorageError::not_found(key))
    }

    async fn presign(&self, bucket: &str, key: &str, ttl: Duration) -> StorageResult<String> {
        Ok(format!(
            "https://signed.test/{}/{}?expires={}",
            bucket,
            key,
            ttl.as_secs()
        ))
    }
}

struct FixedDetector(Vec<DetectionLabel>);

#[async_trait]
impl LabelDetector for FixedDetector {
    async fn detect(&self, _image: &[u8]) -> DetectorResult<Vec<DetectionLabel>> {
        Ok(self.0.clone())
    }
}

struct InvalidImageDetector;

#[async_trait]
impl LabelDetector for InvalidImageDetector {
    async fn detect(&self, _image: &[u8]) -> DetectorResult<Vec<DetectionLabel>> {
        Err(DetectorError::InvalidImage("not a jpeg".to_string()))
    }
}

struct BrokenDetector;

#[async_trait]
impl LabelDetector for BrokenDetector {
    async fn detect(&self, _image: &[u8]) -> DetectorResult<Vec<DetectionLabel>> {
        Err(DetectorError::RequestFailed("service down".to_string()))
    }
}

/// Returns fixed text and records the prompt it was given.
struct RecordingGenerator {
    text: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<String> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        Ok(self.text.clone())
    }
}

struct TimeoutGenerator;

#[async_trait]
impl TextGenerator for TimeoutGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> GeneratorResult<String> {
        Err(GeneratorError::Timeout("model timed out".to_string()))
    }
}

struct FixedSynth(Vec<u8>);

#[async_trait]
impl SpeechSynthesizer for FixedSynth {
    async fn synthesize(
        &self,
        _text: &str,
        _voice_id: &str,
        _engine: VoiceEngine,
    ) -> SynthResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

struct FailingSynth;

#[async_trait]
impl SpeechSynthesizer for FailingSynth {
    async fn synthesize(
        &self,
        _text: &str,
        _voice_id: &str,
        _engine: VoiceEngine,
    ) -> SynthResult<Vec<u8>> {
        Err(SynthError::Synthesis("polly down".to_string()))
    }
}

/// Available engine that concatenates its inputs, making blended output
/// distinguishable from pass-through narration.
struct PassthroughMixer;

#[async_trait]
impl MixEngine for PassthroughMixer {
    fn is_available(&self) -> bool {
        true
    }

    async fn mix(&self, narration: &[u8], music: &[u8], _gains: MixGains) -> MediaResult<Vec<u8>> {
        Ok([narration, b"+".as_slice(), music].concat())
    }
}

struct UnavailableMixer;

#[async_trait]
impl MixEngine for UnavailableMixer {
    fn is_available(&self) -> bool {
        false
    }

    async fn mix(&self, _n: &[u8], _m: &[u8], _gains: MixGains) -> MediaResult<Vec<u8>> {
        Err(MediaError::MixerUnavailable)
    }
}

struct ExplodingMixer;

#[async_trait]
impl MixEngine for ExplodingMixer {
    fn is_available(&self) -> bool {
        true
    }

    async fn mix(&self, _n: &[u8], _m: &[u8], _gains: MixGains) -> MediaResult<Vec<u8>> {
        Err(MediaError::mix_failed("codec error"))
    }
}

#[derive(Default)]
struct MemoryRecords(Mutex<Vec<ProcessingRecord>>);

#[async_trait]
impl RecordStore for MemoryRecords {
    async fn put_record(&self, record: &ProcessingRecord) -> StorageResult<()> {
        self.0.lock().unwrap().push(record.clone());
        Ok(())
    }
}

struct BrokenRecords;

#[async_trait]
impl RecordStore for BrokenRecords {
    async fn put_record(&self, _record: &ProcessingRecord) -> StorageResult<()> {
        Err(StorageError::record_write_failed("table missing"))
    }
}

// ---------------------------------------------------------------------------
// Harness

fn test_config() -> PipelineConfig {
    PipelineConfig {
        upload_bucket: "uploads".to_string(),
        content_bucket: "content".to_string(),
        music_bucket: "music".to_string(),
        presign_ttl: Duration::from_secs(3600),
        deadline: Duration::from_secs(30),
    }
}

/// Store pre-seeded with every background-music asset the mixer can ask
/// for.
fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());
    for &style in MusicStyle::ALL {
        let file = format!("{}_1.mp3", style.as_str());
        store.seed("music", &format!("background_music/{}", file), b"MUSIC");
    }
    store
}

struct Harness {
    store: Arc<MemoryStore>,
    records: Arc<MemoryRecords>,
    ctx: ProcessingContext,
}

fn harness(
    detector: Arc<dyn LabelDetector>,
    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    mixer: Arc<dyn MixEngine>,
) -> Harness {
    let store = seeded_store();
    let records = Arc::new(MemoryRecords::default());
    let ctx = ProcessingContext::new(
        test_config(),
        detector,
        generator,
        synthesizer,
        store.clone(),
        records.clone(),
        mixer,
    );
    Harness {
        store,
        records,
        ctx,
    }
}

fn ceremonial_labels() -> Vec<DetectionLabel> {
    vec![
        DetectionLabel::new("Sculpture", 95.0),
        DetectionLabel::new("Temple", 92.0),
    ]
}

// ---------------------------------------------------------------------------
// Tests

#[tokio::test]
async fn test_full_run_blends_and_records() {
    let generator = Arc::new(RecordingGenerator::new("Long ago a temple stood. It endures"));
    let h = harness(
        Arc::new(FixedDetector(ceremonial_labels())),
        generator.clone(),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(1);
    let outcome = h.ctx.process_image(b"jpeg bytes", &mut rng).await.unwrap();
    let result = &outcome.result;

    assert!(outcome.degradations.is_empty());

    // Temple outranks sculpture: ceremonial profile, long story, poetic prompt.
    assert_eq!(
        result.image_metadata.category,
        ProfileCategory::CeremonialObjects
    );
    assert_eq!(result.story_length, StoryLength::Long);
    let prompts = generator.prompts.lock().unwrap();
    assert!(prompts[0].contains("poetic cultural reflection"));

    // Narration post-processing: pause marker plus terminal punctuation.
    assert!(result.cultural_context.contains(". ... It endures"));
    assert!(result.cultural_context.ends_with('.'));

    // Context enrichment rode along with detection.
    assert!(result
        .detected_elements
        .contains(&"cultural heritage".to_string()));

    // Selections stayed within their candidate tables.
    assert!(["Matthew", "Joanna", "Salli"].contains(&result.voice_id.as_str()));
    assert_eq!(result.music_style, MusicStyle::EtherealAmbient);
    assert!(result.music_file.starts_with("ethereal_ambient_"));

    // Artifacts: source image, narration, blended mix, music reference.
    let id = result.request_id.as_str();
    assert_eq!(
        h.store.object("uploads", &format!("uploads/{}.jpg", id)),
        Some(b"jpeg bytes".to_vec())
    );
    assert_eq!(
        h.store
            .object("content", &format!("audio/narration/{}.mp3", id)),
        Some(b"NARRATION".to_vec())
    );
    assert_eq!(
        h.store.object("content", &format!("audio/mixed/{}.mp3", id)),
        Some(b"NARRATION+MUSIC".to_vec())
    );
    assert!(result.audio_url.contains(&format!("audio/mixed/{}.mp3", id)));
    assert!(result.music_url.contains("background_music/"));

    let reference = h
        .store
        .object("content", &format!("audio/background/{}.json", id))
        .unwrap();
    let reference: serde_json::Value = serde_json::from_slice(&reference).unwrap();
    assert_eq!(reference["voice_id"], result.voice_id);
    assert_eq!(reference["music_file"], result.music_file);

    // Processing record landed with flattened themes.
    let records = h.records.0.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, ProfileCategory::CeremonialObjects);
    assert_eq!(records[0].themes, "ritual,spirituality,community,celebration");
    assert!(records[0].story_preview.len() <= 203);
}

#[tokio::test]
async fn test_unavailable_mixer_publishes_narration_only() {
    let h = harness(
        Arc::new(FixedDetector(ceremonial_labels())),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        Arc::new(UnavailableMixer),
    );

    let mut rng = SeededRandom::new(2);
    let outcome = h.ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert_eq!(outcome.degradations, vec![Degradation::Mixing]);

    // The published audio is the untouched narration payload.
    let id = outcome.result.request_id.as_str();
    assert_eq!(
        h.store.object("content", &format!("audio/mixed/{}.mp3", id)),
        Some(b"NARRATION".to_vec())
    );
    assert!(outcome
        .result
        .audio_url
        .contains(&format!("audio/mixed/{}.mp3", id)));
}

#[tokio::test]
async fn test_exploding_mixer_falls_back_to_narration() {
    let h = harness(
        Arc::new(FixedDetector(ceremonial_labels())),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        Arc::new(ExplodingMixer),
    );

    let mut rng = SeededRandom::new(3);
    let outcome = h.ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert!(outcome.degradations.contains(&Degradation::Mixing));
    let id = outcome.result.request_id.as_str();
    assert_eq!(
        h.store.object("content", &format!("audio/mixed/{}.mp3", id)),
        Some(b"NARRATION".to_vec())
    );
}

#[tokio::test]
async fn test_missing_music_asset_skips_blend() {
    // Store without any music assets: the fetch degrades to empty bytes
    // and the narration passes through even with a working mixer.
    let store = Arc::new(MemoryStore::default());
    let records = Arc::new(MemoryRecords::default());
    let ctx = ProcessingContext::new(
        test_config(),
        Arc::new(FixedDetector(ceremonial_labels())),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        store.clone(),
        records,
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(4);
    let outcome = ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert!(outcome.degradations.contains(&Degradation::Mixing));
    let id = outcome.result.request_id.as_str();
    assert_eq!(
        store.object("content", &format!("audio/mixed/{}.mp3", id)),
        Some(b"NARRATION".to_vec())
    );
}

#[tokio::test]
async fn test_generator_timeout_uses_fallback_story() {
    let h = harness(
        Arc::new(FixedDetector(ceremonial_labels())),
        Arc::new(TimeoutGenerator),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(5);
    let outcome = h.ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert!(outcome.degradations.contains(&Degradation::Generation));
    assert!(outcome
        .result
        .cultural_context
        .starts_with("A fascinating cultural story about "));
    // The fallback references the detected label list.
    assert!(outcome.result.cultural_context.contains("Sculpture"));
    assert!(outcome.result.cultural_context.contains("Temple"));
    // The rest of the pipeline still completed.
    assert!(!outcome.result.audio_url.is_empty());
    assert!(!outcome.result.voice_id.is_empty());
}

#[tokio::test]
async fn test_invalid_image_aborts() {
    let h = harness(
        Arc::new(InvalidImageDetector),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(6);
    let error = h.ctx.process_image(b"not an image", &mut rng).await;
    assert!(matches!(error, Err(PipelineError::InvalidInput(_))));

    // Nothing was recorded for the aborted run.
    assert!(h.records.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_detector_failure_degrades_to_default_labels() {
    let h = harness(
        Arc::new(BrokenDetector),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(7);
    let outcome = h.ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert!(outcome.degradations.contains(&Degradation::Detection));
    assert_eq!(
        outcome.result.detected_elements,
        vec!["cultural artifact", "traditional object"]
    );
    assert_eq!(
        outcome.result.image_metadata.category,
        ProfileCategory::CulturalArtifacts
    );
}

#[tokio::test]
async fn test_synthesis_failure_yields_empty_narration_and_completes() {
    let h = harness(
        Arc::new(FixedDetector(ceremonial_labels())),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FailingSynth),
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(8);
    let outcome = h.ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert!(outcome.degradations.contains(&Degradation::Synthesis));
    // Empty narration also keeps the blend from running.
    assert!(outcome.degradations.contains(&Degradation::Mixing));

    let id = outcome.result.request_id.as_str();
    assert_eq!(
        h.store
            .object("content", &format!("audio/narration/{}.mp3", id)),
        Some(Vec::new())
    );
    assert_eq!(
        h.store.object("content", &format!("audio/mixed/{}.mp3", id)),
        Some(Vec::new())
    );
}

#[tokio::test]
async fn test_record_failure_is_swallowed() {
    let store = seeded_store();
    let ctx = ProcessingContext::new(
        test_config(),
        Arc::new(FixedDetector(ceremonial_labels())),
        Arc::new(RecordingGenerator::new("A story.")),
        Arc::new(FixedSynth(b"NARRATION".to_vec())),
        store.clone(),
        Arc::new(BrokenRecords),
        Arc::new(PassthroughMixer),
    );

    let mut rng = SeededRandom::new(9);
    let outcome = ctx.process_image(b"jpeg", &mut rng).await.unwrap();

    assert!(outcome.degradations.contains(&Degradation::Persistence));
    // The assembled result is intact.
    assert!(!outcome.result.audio_url.is_empty());
    assert!(!outcome.result.cultural_context.is_empty());
    assert!(store
        .key_with_prefix("content", "audio/mixed/")
        .is_some());
}

#[tokio::test]
async fn test_selection_reproducible_across_runs_with_same_seed() {
    let run = |seed: u64| async move {
        let h = harness(
            Arc::new(FixedDetector(ceremonial_labels())),
            Arc::new(RecordingGenerator::new("A story.")),
            Arc::new(FixedSynth(b"NARRATION".to_vec())),
            Arc::new(PassthroughMixer),
        );
        let mut rng = SeededRandom::new(seed);
        let outcome = h.ctx.process_image(b"jpeg", &mut rng).await.unwrap();
        (outcome.result.voice_id, outcome.result.music_file)
    };

    let first = run(42).await;
    let second = run(42).await;
    assert_eq!(first, second);
}
