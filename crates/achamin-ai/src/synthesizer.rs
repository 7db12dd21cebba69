//! Speech synthesis via Amazon Polly.

use async_trait::async_trait;
use aws_sdk_polly::error::ProvideErrorMetadata;
use aws_sdk_polly::types::{Engine, OutputFormat, TextType, VoiceId};
use tracing::debug;

use crate::error::{SynthError, SynthResult};

/// Synthesis engine fidelity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceEngine {
    /// High-fidelity engine; not every voice supports it
    Neural,
    /// Standard-fidelity engine, universally supported
    Standard,
}

impl VoiceEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceEngine::Neural => "neural",
            VoiceEngine::Standard => "standard",
        }
    }
}

/// Converts narration text to speech audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` with the given voice and engine, returning MP3
    /// bytes. A [`SynthError::Validation`] signals an engine/voice
    /// incompatibility the caller may retry at standard fidelity.
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        engine: VoiceEngine,
    ) -> SynthResult<Vec<u8>>;
}

/// Amazon Polly speech synthesizer.
#[derive(Clone)]
pub struct PollySynthesizer {
    client: aws_sdk_polly::Client,
}

impl PollySynthesizer {
    pub fn new(client: aws_sdk_polly::Client) -> Self {
        Self { client }
    }

    /// Create from the ambient AWS environment configuration.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_polly::Client::new(&config))
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        engine: VoiceEngine,
    ) -> SynthResult<Vec<u8>> {
        debug!(voice_id, engine = engine.as_str(), "Synthesizing narration");

        let polly_engine = match engine {
            VoiceEngine::Neural => Engine::Neural,
            VoiceEngine::Standard => Engine::Standard,
        };

        let response = self
            .client
            .synthesize_speech()
            .text(text)
            .output_format(OutputFormat::Mp3)
            .voice_id(VoiceId::from(voice_id))
            .engine(polly_engine)
            .text_type(TextType::Text)
            .send()
            .await
            .map_err(|e| {
                let code = e
                    .as_service_error()
                    .and_then(|se| se.meta().code())
                    .unwrap_or_default()
                    .to_string();
                match code.as_str() {
                    "ValidationException" | "EngineNotSupportedException" => {
                        SynthError::Validation(e.to_string())
                    }
                    _ => SynthError::Synthesis(e.to_string()),
                }
            })?;

        let audio = response
            .audio_stream
            .collect()
            .await
            .map_err(|e| SynthError::Synthesis(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(audio)
    }
}
