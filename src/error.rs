// Centralized error handling using thiserror for type-safe error management
//
// Design Decision: One error enum for every provider and the session layer
//
// Rationale: Providers from different capabilities are composed behind one
// aggregate, so callers match on a single type. Each variant maps to one
// failure mode (configuration, remote service, transport, local storage,
// provider selection, session preconditions).
//
// Propagation: providers never retry and never fall back to another backend.
// Durable reads are the one exception to propagation; they degrade to "no
// value" inside the storage backend and never reach this type.

use crate::providers::config::{Capability, ProviderType};
use thiserror::Error;

/// Main error type for PitchCraft
///
/// Usage:
/// ```ignore
/// fn load() -> Result<User> {
///     let user = storage.get_item("pitchcraft-user").await
///         .ok_or(PitchCraftError::NotLoggedIn)?;
///     ...
/// }
/// ```
#[derive(Debug, Error)]
pub enum PitchCraftError {
    /// Required configuration is missing or invalid
    ///
    /// Raised before any network attempt when the Gemini API key is absent.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The text-generation service answered with a non-success status
    ///
    /// Contains the remote `error.message` when the body carried one,
    /// otherwise `API Error: <status>`.
    #[error("{0}")]
    ApiError(String),

    /// The service answered successfully but no candidate text was present
    #[error("Failed to extract text from Gemini API response.")]
    ExtractionError,

    /// Durable storage write, remove or clear failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// No backend of this kind exists for the capability
    #[error("Unsupported {capability} provider type: {selector}")]
    UnsupportedProvider {
        capability: Capability,
        selector: ProviderType,
    },

    /// A provider selector string did not name any backend
    #[error("Unknown provider type: {0}")]
    UnknownProviderType(String),

    /// A pitch style string is not one of the supported styles
    #[error("Invalid pitch style: {0}")]
    InvalidPitchStyle(String),

    /// Session operation requires a logged-in user
    #[error("No user is logged in")]
    NotLoggedIn,

    /// Session operation requires at least one credit
    #[error("Insufficient credits: {available} available")]
    InsufficientCredits { available: u32 },

    /// Pitch generation was requested with a blank description
    #[error("App description must not be empty")]
    EmptyInput,

    /// No stored pitch carries this identifier
    #[error("Pitch not found: {0}")]
    PitchNotFound(String),

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Network-level failure reaching the remote endpoint
    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

/// Type alias for Result with PitchCraftError
pub type Result<T> = std::result::Result<T, PitchCraftError>;
