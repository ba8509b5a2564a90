// Credit balance backends
//
// add_credits / deduct_credits come from the trait's default methods
// (read, compute, write). They are not atomic across concurrent callers of
// the same key; a multi-writer deployment would need an atomic primitive.

use super::storage::{read_json, write_json};
use super::traits::{CreditsProvider, StorageProvider};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Balance granted to a key that has never been written
pub const STARTING_CREDITS: u32 = 5;

/// Base storage key; per-user balances live under `<base>-<userId>`
pub const CREDITS_STORAGE_KEY: &str = "pitchcraft-credits";

/// Key used by the memory backend when no user id is given
const DEFAULT_MEMORY_KEY: &str = "default";

fn user_key(user_id: Option<String>) -> Option<String> {
    user_id.filter(|id| !id.is_empty())
}

/// Balances kept in the injected storage backend
pub struct LocalStorageCreditsProvider {
    storage: Arc<dyn StorageProvider>,
}

impl LocalStorageCreditsProvider {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    fn storage_key(user_id: Option<String>) -> String {
        match user_key(user_id) {
            Some(id) => format!("{}-{}", CREDITS_STORAGE_KEY, id),
            None => CREDITS_STORAGE_KEY.to_string(),
        }
    }
}

#[async_trait]
impl CreditsProvider for LocalStorageCreditsProvider {
    async fn get_credits(&self, user_id: Option<String>) -> Result<u32> {
        let key = Self::storage_key(user_id);
        Ok(read_json(self.storage.as_ref(), &key)
            .await
            .unwrap_or(STARTING_CREDITS))
    }

    async fn update_credits(&self, user_id: Option<String>, credits: u32) -> Result<u32> {
        let key = Self::storage_key(user_id);
        write_json(self.storage.as_ref(), &key, &credits).await?;
        tracing::debug!("Credits for '{}' set to {}", key, credits);
        Ok(credits)
    }
}

/// Balances held in process memory
#[derive(Default)]
pub struct MemoryCreditsProvider {
    balances: RwLock<HashMap<String, u32>>,
}

impl MemoryCreditsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn memory_key(user_id: Option<String>) -> String {
        user_key(user_id).unwrap_or_else(|| DEFAULT_MEMORY_KEY.to_string())
    }
}

#[async_trait]
impl CreditsProvider for MemoryCreditsProvider {
    async fn get_credits(&self, user_id: Option<String>) -> Result<u32> {
        let key = Self::memory_key(user_id);
        Ok(self
            .balances
            .read()
            .await
            .get(&key)
            .copied()
            .unwrap_or(STARTING_CREDITS))
    }

    async fn update_credits(&self, user_id: Option<String>, credits: u32) -> Result<u32> {
        let key = Self::memory_key(user_id);
        tracing::debug!("Credits for '{}' set to {}", key, credits);
        self.balances.write().await.insert(key, credits);
        Ok(credits)
    }
}
