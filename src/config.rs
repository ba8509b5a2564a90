// Environment-driven application settings
//
// Design Decision: Environment variables (with optional .env file)
//
// Rationale: The only secret is the Gemini API key, which must never live in
// a tracked file. Everything else has a working default so the in-memory
// presets run with no environment at all.
//
// The API key is optional at load time. Its absence is reported by the AI
// provider on the first generation call, so the volatile presets and the
// mock backend stay usable without credentials.

use std::path::PathBuf;

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Default Gemini REST base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings shared by every provider the factory builds
///
/// Environment Variables:
/// - GEMINI_API_KEY (falls back to VITE_GEMINI_API_KEY)
/// - GEMINI_MODEL (optional, defaults to DEFAULT_MODEL)
/// - GEMINI_API_BASE (optional, defaults to DEFAULT_API_BASE)
/// - PITCHCRAFT_DATA_DIR (optional, defaults to <data dir>/pitchcraft)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key; `None` when not configured
    pub api_key: Option<String>,

    /// Gemini model identifier
    pub model: String,

    /// Base URL of the Gemini REST API
    pub api_base: String,

    /// Directory holding the durable key/value entries
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load settings from `.env` and the process environment
    pub fn load() -> Self {
        // Load .env file (ignore if not found)
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Read settings from the process environment only
    pub fn from_env() -> Self {
        let api_key = non_blank_var("GEMINI_API_KEY").or_else(|| non_blank_var("VITE_GEMINI_API_KEY"));

        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; the Gemini provider will refuse requests");
        }

        let model = non_blank_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base = non_blank_var("GEMINI_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let data_dir = non_blank_var("PITCHCRAFT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            api_key,
            model,
            api_base,
            data_dir,
        }
    }

    /// Override the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Override the durable storage directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            data_dir: default_data_dir(),
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("pitchcraft"))
        .unwrap_or_else(|| PathBuf::from(".pitchcraft"))
}
