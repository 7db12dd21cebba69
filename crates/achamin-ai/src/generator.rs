//! Text generation via Amazon Bedrock (Claude).

use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::ProvideErrorMetadata;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeneratorError, GeneratorResult};

/// Default Bedrock model for story generation.
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-instant-v1";

/// Parameters for one generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
}

/// Generates narrative text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<String>;
}

#[derive(Debug, Serialize)]
struct ClaudeBody {
    prompt: String,
    max_tokens_to_sample: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ClaudeCompletion {
    completion: String,
}

/// Amazon Bedrock text generator.
#[derive(Clone)]
pub struct BedrockGenerator {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockGenerator {
    pub fn new(client: aws_sdk_bedrockruntime::Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    /// Create from the ambient AWS environment configuration.
    ///
    /// The model is taken from `BEDROCK_MODEL_ID` when set.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let model_id =
            std::env::var("BEDROCK_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());
        Self::new(aws_sdk_bedrockruntime::Client::new(&config), model_id)
    }
}

#[async_trait]
impl TextGenerator for BedrockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<String> {
        debug!(model_id = %self.model_id, "Invoking text generation");

        let body = ClaudeBody {
            prompt: format!("\n\nHuman: {}\n\nAssistant:", request.prompt),
            max_tokens_to_sample: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
            top_k: request.top_k,
        };

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .body(Blob::new(serde_json::to_vec(&body)?))
            .send()
            .await
            .map_err(|e| {
                let code = e
                    .as_service_error()
                    .and_then(|se| se.meta().code())
                    .unwrap_or_default()
                    .to_string();
                match code.as_str() {
                    "ValidationException" => GeneratorError::Rejected(e.to_string()),
                    "ThrottlingException" | "ServiceQuotaExceededException" => {
                        GeneratorError::Throttled(e.to_string())
                    }
                    "ModelTimeoutException" => GeneratorError::Timeout(e.to_string()),
                    _ => GeneratorError::RequestFailed(e.to_string()),
                }
            })?;

        let completion: ClaudeCompletion = serde_json::from_slice(response.body().as_ref())
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        Ok(completion.completion)
    }
}
