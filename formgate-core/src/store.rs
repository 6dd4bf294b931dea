//! Record store capability.
//!
//! Defines the abstraction for persisting and retrieving submission records.
//! Concrete adapters live in the `formgate-store` crate and are selected by
//! configuration.

use crate::record::StoredRecord;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Errors that can occur during store operations.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input/output operation failed.
    #[error("IO operation failed: {source}")]
    IO {
        #[source]
        source: std::io::Error,
    },
    /// JSON serialization or deserialization error.
    #[error("JSON serialization/deserialization failed: {source}")]
    SerdeJson {
        #[source]
        source: serde_json::Error,
    },
}

/// Trait for submission record stores.
#[async_trait]
pub trait FormDataStore: Send + Sync {
    /// Persists a new record and returns it with its assigned identity.
    async fn create(&self, attrs: Map<String, Value>) -> Result<StoredRecord, Error>;

    /// Returns all stored records.
    async fn search(&self) -> Result<Vec<StoredRecord>, Error>;
}
