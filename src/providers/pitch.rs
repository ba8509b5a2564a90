// Pitch history backends
//
// History is newest-first; save_pitch prepends. Ids are
// `pitch_<unix-millis>_<9 base-36 chars>` with no collision check.

use super::storage::{read_json, write_json};
use super::traits::{PitchProvider, StorageProvider};
use crate::error::Result;
use crate::models::{GeneratedPitch, StoredPitch};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage key holding the serialized history
pub const PITCH_STORAGE_KEY: &str = "pitchcraft-pitches";

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a pitch identifier from the current time and a random suffix
pub fn generate_pitch_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("pitch_{}_{}", Utc::now().timestamp_millis(), suffix)
}

fn stamp(pitch: GeneratedPitch) -> StoredPitch {
    StoredPitch::from_generated(pitch, generate_pitch_id(), Utc::now())
}

// An empty id filters nothing, matching the credits default key
fn filter_by_user(pitches: Vec<StoredPitch>, user_id: Option<String>) -> Vec<StoredPitch> {
    match user_id.filter(|id| !id.is_empty()) {
        Some(id) => pitches
            .into_iter()
            .filter(|p| p.user_id.as_deref() == Some(id.as_str()))
            .collect(),
        None => pitches,
    }
}

/// History kept in the injected storage backend
pub struct LocalStoragePitchProvider {
    storage: Arc<dyn StorageProvider>,
}

impl LocalStoragePitchProvider {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    async fn load_all(&self) -> Vec<StoredPitch> {
        read_json(self.storage.as_ref(), PITCH_STORAGE_KEY)
            .await
            .unwrap_or_default()
    }

    async fn store_all(&self, pitches: &[StoredPitch]) -> Result<()> {
        write_json(self.storage.as_ref(), PITCH_STORAGE_KEY, pitches).await
    }
}

#[async_trait]
impl PitchProvider for LocalStoragePitchProvider {
    async fn save_pitch(&self, pitch: GeneratedPitch) -> Result<StoredPitch> {
        let stored = stamp(pitch);

        let mut pitches = self.load_all().await;
        pitches.insert(0, stored.clone());
        self.store_all(&pitches).await?;

        tracing::debug!("Saved pitch {} ({} in history)", stored.id, pitches.len());
        Ok(stored)
    }

    async fn get_pitch_history(&self, user_id: Option<String>) -> Result<Vec<StoredPitch>> {
        Ok(filter_by_user(self.load_all().await, user_id))
    }

    async fn delete_pitch(&self, id: &str) -> Result<()> {
        let mut pitches = self.load_all().await;
        pitches.retain(|p| p.id != id);
        self.store_all(&pitches).await
    }

    async fn get_pitch_by_id(&self, id: &str) -> Result<Option<StoredPitch>> {
        Ok(self.load_all().await.into_iter().find(|p| p.id == id))
    }
}

/// History held in process memory
#[derive(Default)]
pub struct MemoryPitchProvider {
    pitches: RwLock<Vec<StoredPitch>>,
}

impl MemoryPitchProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PitchProvider for MemoryPitchProvider {
    async fn save_pitch(&self, pitch: GeneratedPitch) -> Result<StoredPitch> {
        let stored = stamp(pitch);
        self.pitches.write().await.insert(0, stored.clone());
        tracing::debug!("Saved pitch {}", stored.id);
        Ok(stored)
    }

    async fn get_pitch_history(&self, user_id: Option<String>) -> Result<Vec<StoredPitch>> {
        let pitches = self.pitches.read().await.clone();
        Ok(filter_by_user(pitches, user_id))
    }

    async fn delete_pitch(&self, id: &str) -> Result<()> {
        self.pitches.write().await.retain(|p| p.id != id);
        Ok(())
    }

    async fn get_pitch_by_id(&self, id: &str) -> Result<Option<StoredPitch>> {
        Ok(self.pitches.read().await.iter().find(|p| p.id == id).cloned())
    }
}
