// Provider layer: pluggable data access behind per-capability traits
//
// Design Decision: Trait-based contracts with durable and volatile backends
//
// Rationale: Every capability the application needs (storage, user, pitch
// history, credits, AI) is a trait. Each has two backends:
// 1. Durable / real: LocalStorage* over a JSON-per-key directory, Gemini AI
// 2. Volatile / mock: Memory* maps, CannedAiProvider
//
// ProviderFactory is the only place that picks backends; everything else
// holds Arc<dyn Trait> and cannot tell them apart.
//
// Usage Example:
//     // Production
//     let factory = ProviderFactory::new(AppConfig::load());
//     let provider = factory.get_instance(None)?;
//     let credits = provider.credits.get_credits(None).await?;
//
//     // Test code
//     let provider = factory.create_testing_provider()?;
//     let pitch = provider.ai.generate_pitch("todo app", PitchStyle::ElevatorPitch).await?;

pub mod ai;
pub mod config;
pub mod credits;
pub mod factory;
pub mod filesystem;
#[cfg(test)]
pub mod mocks;
pub mod pitch;
pub mod storage;
pub mod traits;
pub mod user;

// Re-export commonly used types
pub use ai::{GeminiAiProvider, CannedAiProvider, MockLatency};
pub use config::{Capability, ProviderConfig, ProviderType};
pub use credits::{LocalStorageCreditsProvider, MemoryCreditsProvider, STARTING_CREDITS};
pub use factory::{DataProvider, ProviderFactory};
pub use filesystem::RealFileSystem;
pub use pitch::{LocalStoragePitchProvider, MemoryPitchProvider};
pub use storage::{LocalStorageProvider, MemoryStorageProvider};
pub use traits::{AiProvider, CreditsProvider, FileSystem, PitchProvider, StorageProvider, UserProvider};
pub use user::{LocalStorageUserProvider, MemoryUserProvider};
