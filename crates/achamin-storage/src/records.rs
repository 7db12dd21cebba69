//! DynamoDB processing record store.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use achamin_models::ProcessingRecord;

use crate::error::{StorageError, StorageResult};

/// Best-effort persistence of pipeline processing records.
///
/// Callers treat failures as non-fatal; a missing record never invalidates
/// a completed run.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put_record(&self, record: &ProcessingRecord) -> StorageResult<()>;
}

/// DynamoDB-backed record store.
#[derive(Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Create from the ambient AWS environment configuration.
    ///
    /// The table name is taken from `METADATA_TABLE` when set.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let table = std::env::var("METADATA_TABLE")
            .unwrap_or_else(|_| "achamin-image-metadata".to_string());
        Self::new(aws_sdk_dynamodb::Client::new(&config), table)
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_record(&self, record: &ProcessingRecord) -> StorageResult<()> {
        debug!(request_id = %record.request_id, table = %self.table, "Writing processing record");

        let labels = record
            .labels
            .iter()
            .map(|l| AttributeValue::S(l.clone()))
            .collect();

        self.client
            .put_item()
            .table_name(&self.table)
            .item("request_id", AttributeValue::S(record.request_id.to_string()))
            .item(
                "timestamp",
                AttributeValue::N(record.timestamp.timestamp().to_string()),
            )
            .item("labels", AttributeValue::L(labels))
            .item("category", AttributeValue::S(record.category.to_string()))
            .item("story_preview", AttributeValue::S(record.story_preview.clone()))
            .item(
                "story_length",
                AttributeValue::N(record.story_chars.to_string()),
            )
            .item("themes", AttributeValue::S(record.themes.clone()))
            .item("mood", AttributeValue::S(record.mood.to_string()))
            .send()
            .await
            .map_err(|e| StorageError::record_write_failed(e.to_string()))?;

        Ok(())
    }
}
