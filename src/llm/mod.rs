mod gemini;
pub mod prompts;
mod types;

pub use gemini::GeminiClient;
pub use prompts::Prompt;
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Request/response text generation: a system instruction and a user query
/// in, generated text out
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_query: &str) -> Result<String>;

    /// Generator name for logging/debugging
    fn name(&self) -> &str;
}
