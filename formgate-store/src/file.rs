//! JSON-lines file record store.
//!
//! Appends one JSON record per line to a data file and mirrors the contents
//! in memory for reads. Identities are recovered from the file on open, so
//! they stay stable across restarts.

use async_trait::async_trait;
use formgate_core::record::StoredRecord;
use formgate_core::store::{Error, FormDataStore};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StoredRecord>,
    next_intid: i64,
}

/// File-backed store of submission records.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<Inner>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing records.
    ///
    /// The file is created on first write; a missing file is an empty store.
    pub fn open(path: PathBuf) -> Result<Self, Error> {
        let mut inner = Inner::default();

        if path.exists() {
            let file = File::open(&path).map_err(|source| Error::IO { source })?;
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|source| Error::IO { source })?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: StoredRecord =
                    serde_json::from_str(&line).map_err(|source| Error::SerdeJson { source })?;
                inner.next_intid = inner.next_intid.max(record.intid);
                inner.records.push(record);
            }
            info!(
                "Loaded {} record(s) from {}",
                inner.records.len(),
                path.display()
            );
        }

        Ok(FileStore {
            path,
            inner: RwLock::new(inner),
        })
    }
}

#[async_trait]
impl FormDataStore for FileStore {
    async fn create(&self, attrs: Map<String, Value>) -> Result<StoredRecord, Error> {
        let mut inner = self.inner.write().await;
        inner.next_intid += 1;
        let record = StoredRecord {
            intid: inner.next_intid,
            attrs,
        };

        let line = serde_json::to_string(&record).map_err(|source| Error::SerdeJson { source })?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::IO { source })?;
        writeln!(file, "{line}").map_err(|source| Error::IO { source })?;

        inner.records.push(record.clone());
        debug!("Stored record {} in {}", record.intid, self.path.display());
        Ok(record)
    }

    async fn search(&self) -> Result<Vec<StoredRecord>, Error> {
        let inner = self.inner.read().await;
        Ok(inner.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("records.jsonl")).unwrap();
        assert!(store.search().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_search() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("records.jsonl")).unwrap();

        let record = store
            .create(attrs(&[("Message", json!("hi"))]))
            .await
            .unwrap();
        assert_eq!(record.intid, 1);

        let records = store.search().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attrs["Message"], json!("hi"));
    }

    #[tokio::test]
    async fn test_ids_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        {
            let store = FileStore::open(path.clone()).unwrap();
            store.create(attrs(&[("a", json!(1))])).await.unwrap();
            store.create(attrs(&[("b", json!(2))])).await.unwrap();
        }

        let store = FileStore::open(path).unwrap();
        let records = store.search().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].intid, 1);
        assert_eq!(records[1].intid, 2);

        let third = store.create(attrs(&[("c", json!(3))])).await.unwrap();
        assert_eq!(third.intid, 3);
    }

    #[tokio::test]
    async fn test_open_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        std::fs::write(&path, "not json\n").unwrap();

        let result = FileStore::open(path);
        assert!(matches!(result.unwrap_err(), Error::SerdeJson { .. }));
    }
}
