// Key/value storage backends
//
// Design Decision: One JSON document per key in a data directory
//
// Rationale: Mirrors browser local storage: every key is independent, so a
// corrupt entry only affects its own key. Values are serde_json::Value so the
// trait stays object-safe; read_json / write_json give typed access on top.
//
// Failure policy is asymmetric. Reads log and degrade to None so a cold or
// corrupt entry falls back to defaults. Writes, removes and clears return
// StorageError naming the operation and key.

use super::traits::{FileSystem, StorageProvider};
use crate::error::{PitchCraftError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

const ENTRY_EXTENSION: &str = "json";

/// Durable storage: one `<encoded key>.json` file per entry
pub struct LocalStorageProvider {
    /// Filesystem abstraction for testing
    fs: Arc<dyn FileSystem>,

    /// Directory holding the entries
    data_dir: PathBuf,
}

impl LocalStorageProvider {
    /// Create a durable store rooted at `data_dir`
    ///
    /// The directory is created on first write.
    pub fn new(fs: Arc<dyn FileSystem>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", encode_key(key), ENTRY_EXTENSION))
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn set_item(&self, key: &str, value: Value) -> Result<()> {
        let serialized = serde_json::to_string(&value)?;

        self.fs
            .write(&self.entry_path(key), &serialized)
            .await
            .map_err(|e| {
                tracing::error!("Local storage set_item failed for '{}': {}", key, e);
                PitchCraftError::StorageError(format!("Failed to save '{}': {}", key, e))
            })
    }

    async fn get_item(&self, key: &str) -> Option<Value> {
        let raw = match self.fs.read(&self.entry_path(key)).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Local storage get_item failed for '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring corrupt entry '{}': {}", key, e);
                None
            }
        }
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.fs.remove(&self.entry_path(key)).await.map_err(|e| {
            tracing::error!("Local storage remove_item failed for '{}': {}", key, e);
            PitchCraftError::StorageError(format!("Failed to remove '{}': {}", key, e))
        })
    }

    async fn clear(&self) -> Result<()> {
        let clear_err = |e: PitchCraftError| {
            tracing::error!("Local storage clear failed: {}", e);
            PitchCraftError::StorageError(format!(
                "Failed to clear '{}': {}",
                self.data_dir.display(),
                e
            ))
        };

        let entries = self.fs.list(&self.data_dir).await.map_err(clear_err)?;
        for path in entries
            .iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == ENTRY_EXTENSION))
        {
            self.fs.remove(path).await.map_err(clear_err)?;
        }

        Ok(())
    }
}

/// Volatile storage: a map that lives as long as the provider
#[derive(Default)]
pub struct MemoryStorageProvider {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    async fn set_item(&self, key: &str, value: Value) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_item(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

/// Read a typed value; entries of the wrong shape read as `None`
pub async fn read_json<T: DeserializeOwned>(storage: &dyn StorageProvider, key: &str) -> Option<T> {
    let value = storage.get_item(key).await?;

    match serde_json::from_value(value) {
        Ok(typed) => Some(typed),
        Err(e) => {
            tracing::warn!("Entry '{}' has an unexpected shape: {}", key, e);
            None
        }
    }
}

/// Serialize and store a typed value
pub async fn write_json<T: Serialize + ?Sized>(
    storage: &dyn StorageProvider,
    key: &str,
    value: &T,
) -> Result<()> {
    let value = serde_json::to_value(value)?;
    storage.set_item(key, value).await
}

/// Longest file stem an entry may use, leaving room for the extension
/// under the common 255-byte file name limit
const MAX_STEM_LEN: usize = 200;

/// Readable part kept in front of the digest when a key is too long
const LONG_KEY_PREFIX_LEN: usize = 128;

/// Percent-encode a key into a file-name-safe stem
///
/// Keys whose encoding exceeds MAX_STEM_LEN keep an encoded prefix followed
/// by `~` and the SHA-256 of the full key. Short stems never contain a raw
/// `~`, so the two forms cannot collide.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }

    if encoded.len() <= MAX_STEM_LEN {
        return encoded;
    }

    // The encoding is pure ASCII, so any byte offset is a char boundary
    encoded.truncate(LONG_KEY_PREFIX_LEN);
    let digest = Sha256::digest(key.as_bytes());
    format!("{}~{}", encoded, hex::encode(digest))
}
