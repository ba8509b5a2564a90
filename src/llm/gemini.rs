use super::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};
use super::TextGenerator;
use crate::config::AppConfig;
use crate::error::{PitchCraftError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Client for the Gemini `generateContent` endpoint
///
/// One POST per call, no streaming, no retries. The API key is checked before
/// any request is built.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            api_base: api_base.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_key.clone(), config.model.clone(), config.api_base.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            PitchCraftError::ConfigError(
                "Gemini API key is not configured. Please set GEMINI_API_KEY in your environment variables."
                    .to_string(),
            )
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, system_prompt: &str, user_query: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let request = GenerateContentRequest::new(system_prompt, user_query);

        tracing::debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Gemini request failed: {}", e);
                PitchCraftError::ReqwestError(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));

            tracing::warn!("Gemini API error {}: {}", status, message);
            return Err(PitchCraftError::ApiError(message));
        }

        let parsed: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Unparseable Gemini response: {}", e);
                return Err(PitchCraftError::ExtractionError);
            }
        };

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or(PitchCraftError::ExtractionError)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_model() {
        let client = GeminiClient::new(None, "gemini-test", "http://localhost:1234/v1beta/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        // Port 9 (discard) is never contacted: the key check comes first
        let client = GeminiClient::new(Some("   ".to_string()), "m", "http://127.0.0.1:9");

        match client.generate("system", "user").await {
            Err(PitchCraftError::ConfigError(msg)) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }
}
