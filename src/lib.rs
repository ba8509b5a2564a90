// Library interface for PitchCraft
// This exposes the provider layer and the session workflow so they can be:
// - Driven by any front end (desktop, web bridge, scripts)
// - Exercised directly from tests
// - Swapped between durable and in-memory backends by configuration

pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod providers;
pub mod session;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{PitchCraftError, Result};
pub use models::{GeneratedPitch, PitchStyle, StoredPitch, User, UserUpdate};
pub use providers::{
    AiProvider, CreditsProvider, DataProvider, PitchProvider, ProviderConfig, ProviderFactory,
    ProviderType, StorageProvider, UserProvider,
};
pub use session::{PitchSession, CREDIT_PACK_SIZE};
