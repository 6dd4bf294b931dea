//! In-memory record store.
//!
//! Keeps records in process memory behind a read/write lock. Intended for
//! development and tests; contents are lost on restart.

use async_trait::async_trait;
use formgate_core::record::StoredRecord;
use formgate_core::store::{Error, FormDataStore};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredRecord>,
    next_intid: i64,
}

/// In-memory store of submission records.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormDataStore for MemoryStore {
    async fn create(&self, attrs: Map<String, Value>) -> Result<StoredRecord, Error> {
        let mut inner = self.inner.write().await;
        inner.next_intid += 1;
        let record = StoredRecord {
            intid: inner.next_intid,
            attrs,
        };
        inner.records.push(record.clone());
        debug!("Stored record {}", record.intid);
        Ok(record)
    }

    async fn search(&self) -> Result<Vec<StoredRecord>, Error> {
        let inner = self.inner.read().await;
        Ok(inner.records.clone())
    }
}
