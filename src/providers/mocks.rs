// Mock test helpers and common mock patterns
//
// Reusable mock constructors with sensible defaults. Tests override the
// behaviour they care about and inherit the rest.
//
// Usage:
//     use crate::providers::mocks::test_helpers::*;
//     let mut ai = create_mock_ai();
//     ai.expect_analyze_pitch().returning(|_| Ok("custom".to_string()));

#[cfg(test)]
pub mod test_helpers {
    use super::super::traits::*;
    use crate::models::{GeneratedPitch, PitchStyle, StoredPitch};
    use crate::providers::{
        DataProvider, MemoryCreditsProvider, MemoryPitchProvider, MemoryStorageProvider,
        MemoryUserProvider, ProviderConfig, ProviderType,
    };
    use std::sync::Arc;

    /// Mock AI with a name set and no call expectations
    ///
    /// Any generation call fails the test unless the caller adds an
    /// expectation for it.
    pub fn create_mock_ai() -> MockAiProvider {
        let mut mock = MockAiProvider::new();
        mock.expect_name().return_const("MockedAi".to_string());
        mock
    }

    /// Mock AI whose every operation succeeds with fixed text
    pub fn create_succeeding_ai() -> MockAiProvider {
        let mut mock = create_mock_ai();

        mock.expect_generate_pitch()
            .returning(|input, style| Ok(format!("{} pitch for {}", style, input)));
        mock.expect_analyze_pitch()
            .returning(|_| Ok("**Strengths**\n* ok".to_string()));
        mock.expect_generate_marketing_suggestions()
            .returning(|_| Ok("**Catchy Slogans:**\n* ok".to_string()));

        mock
    }

    /// In-memory aggregate with an injected AI provider
    pub fn create_memory_provider(ai: Arc<dyn AiProvider>) -> DataProvider {
        DataProvider::new(
            Arc::new(MemoryUserProvider::new()),
            Arc::new(MemoryPitchProvider::new()),
            Arc::new(MemoryCreditsProvider::new()),
            ai,
            Arc::new(MemoryStorageProvider::new()),
            ProviderConfig::in_memory(ProviderType::Memory),
        )
    }

    /// Create a test GeneratedPitch
    pub fn create_test_pitch(input: &str) -> GeneratedPitch {
        GeneratedPitch::new(input, PitchStyle::ElevatorPitch, format!("Pitch for {}", input))
    }

    /// Create a test StoredPitch with a fixed id
    pub fn create_test_stored_pitch(id: &str) -> StoredPitch {
        StoredPitch::from_generated(create_test_pitch(id), id.to_string(), chrono::Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::super::traits::*;
    use super::test_helpers::*;
    use crate::models::PitchStyle;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_succeeding_ai() {
        let ai = create_succeeding_ai();
        let text = ai.generate_pitch("an app", PitchStyle::FeatureFocused).await.unwrap();
        assert_eq!(text, "Feature-Focused pitch for an app");
    }

    #[tokio::test]
    async fn test_create_memory_provider() {
        let provider = create_memory_provider(Arc::new(create_mock_ai()));
        assert_eq!(provider.ai.name(), "MockedAi");
        assert!(provider.pitch.get_pitch_history(None).await.unwrap().is_empty());
    }

    #[test]
    fn test_create_test_stored_pitch() {
        let pitch = create_test_stored_pitch("pitch_1_abcdefghi");
        assert_eq!(pitch.id, "pitch_1_abcdefghi");
        assert_eq!(pitch.style, PitchStyle::ElevatorPitch);
    }
}
