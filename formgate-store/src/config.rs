//! Store adapter configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Record store configuration.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct StoreOptions {
    /// Store backend type.
    #[serde(rename = "type", default)]
    pub store_type: StoreType,
    /// Data file path, required for the file backend.
    pub path: Option<PathBuf>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            store_type: StoreType::Memory,
            path: None,
        }
    }
}

/// Available store backends.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    /// In-process store, lost on restart.
    #[default]
    Memory,
    /// Append-only JSON-lines file store.
    File,
}
