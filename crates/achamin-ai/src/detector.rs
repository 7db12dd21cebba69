//! Label detection via Amazon Rekognition.

use async_trait::async_trait;
use aws_sdk_rekognition::error::ProvideErrorMetadata;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::Image;
use tracing::debug;

use achamin_models::DetectionLabel;

use crate::error::{DetectorError, DetectorResult};

/// Max labels requested per image.
const MAX_LABELS: i32 = 15;

/// Minimum confidence requested from the service. The pipeline applies its
/// own high-confidence filter on top of this.
const MIN_CONFIDENCE: f32 = 70.0;

/// Detects labels in an image.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels in the given image bytes.
    ///
    /// Instance detections above the service threshold are reported as
    /// additional `"{name} object"` labels with the instance confidence.
    async fn detect(&self, image: &[u8]) -> DetectorResult<Vec<DetectionLabel>>;
}

/// Amazon Rekognition label detector.
#[derive(Clone)]
pub struct RekognitionDetector {
    client: aws_sdk_rekognition::Client,
}

impl RekognitionDetector {
    pub fn new(client: aws_sdk_rekognition::Client) -> Self {
        Self { client }
    }

    /// Create from the ambient AWS environment configuration.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_rekognition::Client::new(&config))
    }
}

#[async_trait]
impl LabelDetector for RekognitionDetector {
    async fn detect(&self, image: &[u8]) -> DetectorResult<Vec<DetectionLabel>> {
        debug!("Detecting labels in {} byte image", image.len());

        let response = self
            .client
            .detect_labels()
            .image(Image::builder().bytes(Blob::new(image)).build())
            .max_labels(MAX_LABELS)
            .min_confidence(MIN_CONFIDENCE)
            .send()
            .await
            .map_err(|e| {
                let code = e
                    .as_service_error()
                    .and_then(|se| se.meta().code())
                    .unwrap_or_default()
                    .to_string();
                match code.as_str() {
                    "InvalidImageFormatException"
                    | "ImageTooLargeException"
                    | "InvalidParameterException" => DetectorError::InvalidImage(e.to_string()),
                    "ThrottlingException" | "ProvisionedThroughputExceededException" => {
                        DetectorError::ServiceUnavailable(e.to_string())
                    }
                    _ => DetectorError::RequestFailed(e.to_string()),
                }
            })?;

        let mut labels = Vec::new();
        for label in response.labels() {
            let Some(name) = label.name() else { continue };
            let confidence = label.confidence().unwrap_or(0.0);
            labels.push(DetectionLabel::new(name, confidence));

            for instance in label.instances() {
                if let Some(instance_confidence) = instance.confidence() {
                    labels.push(DetectionLabel::new(
                        format!("{} object", name),
                        instance_confidence,
                    ));
                }
            }
        }

        debug!("Detected {} labels", labels.len());
        Ok(labels)
    }
}
