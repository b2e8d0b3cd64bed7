//! Durable key/value state for save games.
//!
//! Systems write opaque JSON blobs under string keys; the host decides where
//! the store lives (a JSON file via [`file`], or Postgres via `crate::db`).

pub mod file;

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keyed blobs, kept in key order so serialized stores are byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaveStore {
    entries: BTreeMap<String, serde_json::Value>,
}

impl SaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PersistError> {
        let json = serde_json::to_value(value).map_err(|source| PersistError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    /// Decode the blob under `key`, or `None` when the key was never written.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistError> {
        let Some(json) = self.entries.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(json.clone())
            .map(Some)
            .map_err(|source| PersistError::Decode {
                key: key.to_string(),
                source,
            })
    }

    pub fn put_raw(&mut self, key: String, value: serde_json::Value) {
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, blob)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to encode save entry {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode save entry {key:?}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed JSON in save file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("save file I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
