//! Storage for the Achamin backend.
//!
//! This crate provides:
//! - Blob upload/download and presigned URL generation (S3)
//! - Best-effort processing record persistence (DynamoDB)

pub mod blob;
pub mod error;
pub mod records;

pub use blob::{ContentStore, S3ContentStore};
pub use error::{StorageError, StorageResult};
pub use records::{DynamoRecordStore, RecordStore};
