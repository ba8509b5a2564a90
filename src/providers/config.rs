// Backend selection for each capability

use crate::error::PitchCraftError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    /// Durable key/value storage
    #[serde(rename = "localStorage")]
    LocalStorage,
    /// Volatile process memory (the mock backend for AI)
    #[serde(rename = "memory")]
    Memory,
    /// Remote service (AI only)
    #[serde(rename = "api")]
    Api,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::LocalStorage => "localStorage",
            ProviderType::Memory => "memory",
            ProviderType::Api => "api",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = PitchCraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "localStorage" => Ok(ProviderType::LocalStorage),
            "memory" => Ok(ProviderType::Memory),
            "api" => Ok(ProviderType::Api),
            other => Err(PitchCraftError::UnknownProviderType(other.to_string())),
        }
    }
}

/// The five capabilities an aggregate exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    User,
    Pitch,
    Credits,
    Ai,
    Storage,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::User => "user",
            Capability::Pitch => "pitch",
            Capability::Credits => "credits",
            Capability::Ai => "AI",
            Capability::Storage => "storage",
        };
        f.write_str(name)
    }
}

/// One backend choice per capability
///
/// Missing fields deserialize to the default, so a partial JSON document
/// overrides only what it names:
///
/// ```ignore
/// let config: ProviderConfig = serde_json::from_str(r#"{"aiProvider":"memory"}"#)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub user_provider: ProviderType,
    pub pitch_provider: ProviderType,
    pub credits_provider: ProviderType,
    pub ai_provider: ProviderType,
    pub storage_provider: ProviderType,
}

impl ProviderConfig {
    /// Everything in memory, with the given AI backend
    pub fn in_memory(ai_provider: ProviderType) -> Self {
        Self {
            user_provider: ProviderType::Memory,
            pitch_provider: ProviderType::Memory,
            credits_provider: ProviderType::Memory,
            ai_provider,
            storage_provider: ProviderType::Memory,
        }
    }

    pub fn with_ai(mut self, selector: ProviderType) -> Self {
        self.ai_provider = selector;
        self
    }

    pub fn with_storage(mut self, selector: ProviderType) -> Self {
        self.storage_provider = selector;
        self
    }

    pub fn selector(&self, capability: Capability) -> ProviderType {
        match capability {
            Capability::User => self.user_provider,
            Capability::Pitch => self.pitch_provider,
            Capability::Credits => self.credits_provider,
            Capability::Ai => self.ai_provider,
            Capability::Storage => self.storage_provider,
        }
    }
}

impl Default for ProviderConfig {
    /// Durable storage everywhere, real AI
    fn default() -> Self {
        Self {
            user_provider: ProviderType::LocalStorage,
            pitch_provider: ProviderType::LocalStorage,
            credits_provider: ProviderType::LocalStorage,
            ai_provider: ProviderType::Api,
            storage_provider: ProviderType::LocalStorage,
        }
    }
}
