// Provider factory: configuration in, wired aggregate out
//
// Design Decision: Explicit factory handle instead of a hidden global
//
// Rationale: The application entry point owns one ProviderFactory and passes
// it (or the aggregates it hands out) to whoever needs data access. The
// memoized "default instance" lives inside that handle, and reset_instance
// gives tests a clean slate without process-wide mutable state.
//
// Construction order:
// 1. Storage backend (the others may persist through it)
// 2. User, pitch and credits providers, wired to that storage when durable
// 3. AI provider (no storage dependency)
//
// Unsupported selector/capability pairs fail fast; there is no fallback.

use super::ai::{GeminiAiProvider, CannedAiProvider};
use super::config::{Capability, ProviderConfig, ProviderType};
use super::credits::{LocalStorageCreditsProvider, MemoryCreditsProvider};
use super::filesystem::RealFileSystem;
use super::pitch::{LocalStoragePitchProvider, MemoryPitchProvider};
use super::storage::{LocalStorageProvider, MemoryStorageProvider};
use super::traits::{
    AiProvider, CreditsProvider, FileSystem, PitchProvider, StorageProvider, UserProvider,
};
use super::user::{LocalStorageUserProvider, MemoryUserProvider};
use crate::config::AppConfig;
use crate::error::{PitchCraftError, Result};
use std::sync::{Arc, Mutex};

/// One provider per capability, as assembled by the factory
///
/// Cloning is cheap and clones share the same backends.
#[derive(Clone)]
pub struct DataProvider {
    pub user: Arc<dyn UserProvider>,
    pub pitch: Arc<dyn PitchProvider>,
    pub credits: Arc<dyn CreditsProvider>,
    pub ai: Arc<dyn AiProvider>,
    pub storage: Arc<dyn StorageProvider>,
    config: ProviderConfig,
}

impl DataProvider {
    /// Assemble an aggregate from already-built providers
    pub fn new(
        user: Arc<dyn UserProvider>,
        pitch: Arc<dyn PitchProvider>,
        credits: Arc<dyn CreditsProvider>,
        ai: Arc<dyn AiProvider>,
        storage: Arc<dyn StorageProvider>,
        config: ProviderConfig,
    ) -> Self {
        Self {
            user,
            pitch,
            credits,
            ai,
            storage,
            config,
        }
    }

    /// The configuration this aggregate was built from
    pub fn config(&self) -> ProviderConfig {
        self.config
    }
}

impl std::fmt::Debug for DataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataProvider")
            .field("config", &self.config)
            .field("ai", &self.ai.name())
            .finish()
    }
}

/// Builds DataProvider aggregates and memoizes a default one
///
/// Usage:
/// ```ignore
/// let factory = ProviderFactory::new(AppConfig::load());
/// let provider = factory.get_instance(None)?;
/// let user = provider.user.login_user(UserUpdate::default()).await?;
///
/// // Tests
/// let provider = factory.create_testing_provider()?;
/// ```
pub struct ProviderFactory {
    settings: AppConfig,
    fs: Arc<dyn FileSystem>,
    instance: Mutex<Option<Arc<DataProvider>>>,
}

impl ProviderFactory {
    pub fn new(settings: AppConfig) -> Self {
        Self {
            settings,
            fs: Arc::new(RealFileSystem),
            instance: Mutex::new(None),
        }
    }

    /// Override the filesystem under durable storage (for testing)
    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn settings(&self) -> &AppConfig {
        &self.settings
    }

    /// Return the memoized aggregate, building it on first use
    ///
    /// `config` only matters on the call that builds the instance; later
    /// calls return the existing aggregate unchanged.
    pub fn get_instance(&self, config: Option<ProviderConfig>) -> Result<Arc<DataProvider>> {
        let mut slot = self.instance.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = slot.as_ref() {
            if config.is_some_and(|c| c != existing.config()) {
                tracing::debug!("get_instance: ignoring config, instance already built");
            }
            return Ok(Arc::clone(existing));
        }

        let provider = Arc::new(self.create_provider(config.unwrap_or_default())?);
        *slot = Some(Arc::clone(&provider));
        Ok(provider)
    }

    /// Forget the memoized aggregate; the next get_instance rebuilds it
    pub fn reset_instance(&self) {
        let mut slot = self.instance.lock().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            tracing::debug!("Provider instance reset");
        }
    }

    /// Build a fresh aggregate
    ///
    /// # Errors
    /// - UnsupportedProvider when a selector has no backend for its capability
    pub fn create_provider(&self, config: ProviderConfig) -> Result<DataProvider> {
        let storage = self.create_storage_provider(config.storage_provider)?;
        let user = Self::create_user_provider(config.user_provider, &storage)?;
        let pitch = Self::create_pitch_provider(config.pitch_provider, &storage)?;
        let credits = Self::create_credits_provider(config.credits_provider, &storage)?;
        let ai = self.create_ai_provider(config.ai_provider)?;

        tracing::info!(
            "Created data provider (storage={}, user={}, pitch={}, credits={}, ai={})",
            config.storage_provider,
            config.user_provider,
            config.pitch_provider,
            config.credits_provider,
            config.ai_provider
        );

        Ok(DataProvider::new(user, pitch, credits, ai, storage, config))
    }

    /// All in memory, real AI
    pub fn create_development_provider(&self) -> Result<DataProvider> {
        self.create_provider(ProviderConfig::in_memory(ProviderType::Api))
    }

    /// All in memory, mock AI
    pub fn create_testing_provider(&self) -> Result<DataProvider> {
        self.create_provider(ProviderConfig::in_memory(ProviderType::Memory))
    }

    fn unsupported(capability: Capability, selector: ProviderType) -> PitchCraftError {
        tracing::error!("Unsupported {} provider type: {}", capability, selector);
        PitchCraftError::UnsupportedProvider {
            capability,
            selector,
        }
    }

    fn create_storage_provider(&self, selector: ProviderType) -> Result<Arc<dyn StorageProvider>> {
        match selector {
            ProviderType::LocalStorage => Ok(Arc::new(LocalStorageProvider::new(
                self.fs.clone(),
                self.settings.data_dir.clone(),
            ))),
            ProviderType::Memory => Ok(Arc::new(MemoryStorageProvider::new())),
            ProviderType::Api => Err(Self::unsupported(Capability::Storage, selector)),
        }
    }

    fn create_user_provider(
        selector: ProviderType,
        storage: &Arc<dyn StorageProvider>,
    ) -> Result<Arc<dyn UserProvider>> {
        match selector {
            ProviderType::LocalStorage => {
                Ok(Arc::new(LocalStorageUserProvider::new(storage.clone())))
            }
            ProviderType::Memory => Ok(Arc::new(MemoryUserProvider::new())),
            ProviderType::Api => Err(Self::unsupported(Capability::User, selector)),
        }
    }

    fn create_pitch_provider(
        selector: ProviderType,
        storage: &Arc<dyn StorageProvider>,
    ) -> Result<Arc<dyn PitchProvider>> {
        match selector {
            ProviderType::LocalStorage => {
                Ok(Arc::new(LocalStoragePitchProvider::new(storage.clone())))
            }
            ProviderType::Memory => Ok(Arc::new(MemoryPitchProvider::new())),
            ProviderType::Api => Err(Self::unsupported(Capability::Pitch, selector)),
        }
    }

    fn create_credits_provider(
        selector: ProviderType,
        storage: &Arc<dyn StorageProvider>,
    ) -> Result<Arc<dyn CreditsProvider>> {
        match selector {
            ProviderType::LocalStorage => {
                Ok(Arc::new(LocalStorageCreditsProvider::new(storage.clone())))
            }
            ProviderType::Memory => Ok(Arc::new(MemoryCreditsProvider::new())),
            ProviderType::Api => Err(Self::unsupported(Capability::Credits, selector)),
        }
    }

    fn create_ai_provider(&self, selector: ProviderType) -> Result<Arc<dyn AiProvider>> {
        match selector {
            ProviderType::Api => Ok(Arc::new(GeminiAiProvider::from_config(&self.settings))),
            ProviderType::Memory => Ok(Arc::new(CannedAiProvider::new())),
            ProviderType::LocalStorage => Err(Self::unsupported(Capability::Ai, selector)),
        }
    }
}
