// AI backends: the real Gemini-backed provider and a canned mock

use super::traits::AiProvider;
use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::prompts::{analysis_prompt, marketing_prompt, pitch_prompt};
use crate::llm::{GeminiClient, Prompt, TextGenerator};
use crate::models::PitchStyle;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Real backend: builds the prompt for each operation and sends it through a
/// text generator (Gemini in production)
pub struct GeminiAiProvider {
    generator: Arc<dyn TextGenerator>,
}

impl GeminiAiProvider {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Arc::new(GeminiClient::from_config(config)))
    }

    async fn run(&self, operation: &str, prompt: Prompt) -> Result<String> {
        tracing::debug!("{}: {} via {}", self.name(), operation, self.generator.name());

        self.generator
            .generate(&prompt.system, &prompt.user)
            .await
            .inspect_err(|e| tracing::warn!("{} failed: {}", operation, e))
    }
}

#[async_trait]
impl AiProvider for GeminiAiProvider {
    async fn generate_pitch(&self, input: &str, style: PitchStyle) -> Result<String> {
        self.run("generate_pitch", pitch_prompt(input, style)).await
    }

    async fn analyze_pitch(&self, pitch: &str) -> Result<String> {
        self.run("analyze_pitch", analysis_prompt(pitch)).await
    }

    async fn generate_marketing_suggestions(&self, input: &str) -> Result<String> {
        self.run("generate_marketing_suggestions", marketing_prompt(input))
            .await
    }

    fn name(&self) -> &str {
        "GeminiAiProvider"
    }
}

/// Simulated latency per operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub generate: Duration,
    pub analyze: Duration,
    pub marketing: Duration,
}

impl MockLatency {
    pub const NONE: MockLatency = MockLatency {
        generate: Duration::ZERO,
        analyze: Duration::ZERO,
        marketing: Duration::ZERO,
    };
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            generate: Duration::from_millis(1000),
            analyze: Duration::from_millis(800),
            marketing: Duration::from_millis(600),
        }
    }
}

/// Offline backend: deterministic templated text after an artificial delay
///
/// Named apart from the mockall-generated `traits::MockAiProvider`.
#[derive(Debug, Clone, Default)]
pub struct CannedAiProvider {
    latency: MockLatency,
}

impl CannedAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers immediately
    pub fn instant() -> Self {
        Self::with_latency(MockLatency::NONE)
    }

    pub fn with_latency(latency: MockLatency) -> Self {
        Self { latency }
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AiProvider for CannedAiProvider {
    async fn generate_pitch(&self, input: &str, style: PitchStyle) -> Result<String> {
        Self::pause(self.latency.generate).await;

        Ok(format!(
            "[MOCK] This is a {style} pitch for: {input}.\n\n\
             Key highlights:\n\
             - Revolutionary approach to solving user problems\n\
             - Scalable business model with strong market potential\n\
             - Experienced team with proven track record\n\
             - Clear path to profitability and growth\n\n\
             This innovative solution addresses critical market needs while delivering exceptional value to users."
        ))
    }

    async fn analyze_pitch(&self, pitch: &str) -> Result<String> {
        Self::pause(self.latency.analyze).await;

        Ok(format!(
            "**Strengths**\n\
             * Clear value proposition\n\
             * Well-structured presentation ({} characters)\n\
             * Addresses market need\n\n\
             **Weaknesses**\n\
             * Could use more specific metrics\n\
             * Market size analysis needed\n\
             * Competition analysis missing\n\n\
             **Suggestions**\n\
             * Add quantifiable results and projections\n\
             * Include detailed competitive landscape\n\
             * Strengthen the call-to-action",
            pitch.chars().count()
        ))
    }

    async fn generate_marketing_suggestions(&self, input: &str) -> Result<String> {
        Self::pause(self.latency.marketing).await;

        let lead = input.split_whitespace().next().unwrap_or("Your App");
        Ok(format!(
            "**Catchy Slogans:**\n\
             * \"Innovation Meets Opportunity\"\n\
             * \"The Future of {lead} is Here\"\n\
             * \"Transform Your World Today\"\n\n\
             **Marketing Angles:**\n\
             * LinkedIn Strategy: B2B thought leadership content targeting decision makers\n\
             * TikTok Campaign: Short-form videos showcasing product benefits and user testimonials\n\
             * Content Marketing: Educational blog series establishing expertise and driving organic traffic"
        ))
    }

    fn name(&self) -> &str {
        "CannedAiProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PitchCraftError;
    use crate::llm::MockTextGenerator;

    #[tokio::test]
    async fn test_gemini_provider_sends_pitch_prompt() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock".to_string());
        generator
            .expect_generate()
            .withf(|system, user| {
                system.contains("copywriter")
                    && user.contains("\"Benefit-Driven\"")
                    && user.contains("[a budgeting app]")
            })
            .times(1)
            .returning(|_, _| Ok("Save more, stress less.".to_string()));

        let provider = GeminiAiProvider::new(Arc::new(generator));
        let text = provider
            .generate_pitch("a budgeting app", PitchStyle::BenefitDriven)
            .await
            .unwrap();

        assert_eq!(text, "Save more, stress less.");
    }

    #[tokio::test]
    async fn test_gemini_provider_routes_each_operation() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock".to_string());
        generator
            .expect_generate()
            .withf(|system, _| system.contains("venture capitalist"))
            .times(1)
            .returning(|_, _| Ok("analysis".to_string()));
        generator
            .expect_generate()
            .withf(|system, _| system.contains("marketing expert specializing"))
            .times(1)
            .returning(|_, _| Ok("slogans".to_string()));

        let provider = GeminiAiProvider::new(Arc::new(generator));

        assert_eq!(provider.analyze_pitch("pitch").await.unwrap(), "analysis");
        assert_eq!(
            provider.generate_marketing_suggestions("idea").await.unwrap(),
            "slogans"
        );
    }

    #[tokio::test]
    async fn test_gemini_provider_propagates_errors_unchanged() {
        let mut generator = MockTextGenerator::new();
        generator.expect_name().return_const("mock".to_string());
        generator
            .expect_generate()
            .returning(|_, _| Err(PitchCraftError::ApiError("quota exceeded".to_string())));

        let provider = GeminiAiProvider::new(Arc::new(generator));

        match provider.analyze_pitch("pitch").await {
            Err(PitchCraftError::ApiError(msg)) => assert_eq!(msg, "quota exceeded"),
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gemini_provider_without_key_is_config_error() {
        let config = AppConfig::default().with_api_base("http://127.0.0.1:9");
        let provider = GeminiAiProvider::from_config(&config);

        for result in [
            provider.generate_pitch("x", PitchStyle::ElevatorPitch).await,
            provider.analyze_pitch("x").await,
            provider.generate_marketing_suggestions("x").await,
        ] {
            assert!(matches!(result, Err(PitchCraftError::ConfigError(_))));
        }
    }

    #[tokio::test]
    async fn test_mock_output_embeds_inputs() {
        let provider = CannedAiProvider::instant();

        let pitch = provider
            .generate_pitch("a pet sitter marketplace", PitchStyle::CasualSocialMediaBlurb)
            .await
            .unwrap();
        assert!(pitch.starts_with("[MOCK] This is a Casual Social Media Blurb pitch for: a pet sitter marketplace."));

        let analysis = provider.analyze_pitch("12345").await.unwrap();
        assert!(analysis.contains("(5 characters)"));
        assert!(analysis.contains("**Weaknesses**"));

        let marketing = provider
            .generate_marketing_suggestions("Fitness tracker for runners")
            .await
            .unwrap();
        assert!(marketing.contains("The Future of Fitness is Here"));
    }

    #[tokio::test]
    async fn test_mock_is_deterministic() {
        let provider = CannedAiProvider::instant();

        let a = provider.analyze_pitch("same").await.unwrap();
        let b = provider.analyze_pitch("same").await.unwrap();
        assert_eq!(a, b);
    }

    fn assert_about(elapsed: Duration, expected_ms: u64) {
        let expected = Duration::from_millis(expected_ms);
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(50),
            "expected ~{:?}, got {:?}",
            expected,
            elapsed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_simulates_latency_per_operation() {
        let provider = CannedAiProvider::new();

        let start = tokio::time::Instant::now();
        provider
            .generate_pitch("x", PitchStyle::ElevatorPitch)
            .await
            .unwrap();
        assert_about(start.elapsed(), 1000);

        let start = tokio::time::Instant::now();
        provider.analyze_pitch("x").await.unwrap();
        assert_about(start.elapsed(), 800);

        let start = tokio::time::Instant::now();
        provider.generate_marketing_suggestions("x").await.unwrap();
        assert_about(start.elapsed(), 600);
    }
}
