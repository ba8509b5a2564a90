// Session layer: the PitchCraft workflow over a DataProvider
//
// Every action a user can take in the app (login, generate, analyze, market,
// buy credits, browse history) is a method here, so front ends only render
// state. The session keeps the view state in memory and delegates all reads
// and writes to the aggregate's providers.
//
// Credit rule: generation, analysis and marketing each cost one credit. They
// are refused with InsufficientCredits before any AI call when the balance is
// zero, and a failed AI call leaves the balance untouched. Generation charges
// before saving; a failed save refunds the credit.

use crate::error::{PitchCraftError, Result};
use crate::models::{GeneratedPitch, PitchStyle, StoredPitch, User, UserUpdate};
use crate::providers::DataProvider;
use std::sync::Arc;

/// Credits granted by one purchase in the dashboard
pub const CREDIT_PACK_SIZE: u32 = 10;

/// Credits spent per AI operation
pub const CREDITS_PER_REQUEST: u32 = 1;

/// One user's session over a provider aggregate
pub struct PitchSession {
    provider: Arc<DataProvider>,
    user: Option<User>,
    credits: u32,
    history: Vec<StoredPitch>,
    current_pitch: Option<StoredPitch>,
    analysis: Option<String>,
    marketing: Option<String>,
}

impl PitchSession {
    /// Create a logged-out session
    pub fn new(provider: Arc<DataProvider>) -> Self {
        Self {
            provider,
            user: None,
            credits: 0,
            history: Vec::new(),
            current_pitch: None,
            analysis: None,
            marketing: None,
        }
    }

    pub fn provider(&self) -> &Arc<DataProvider> {
        &self.provider
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Pitches of the current user, newest first
    pub fn history(&self) -> &[StoredPitch] {
        &self.history
    }

    /// Most recently generated pitch
    pub fn current_pitch(&self) -> Option<&StoredPitch> {
        self.current_pitch.as_ref()
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn marketing_suggestions(&self) -> Option<&str> {
        self.marketing.as_deref()
    }

    /// Pick up a user left logged in by a previous run
    ///
    /// Returns the restored user, if any.
    pub async fn restore(&mut self) -> Result<Option<User>> {
        let Some(user) = self.provider.user.get_current_user().await? else {
            return Ok(None);
        };

        self.load_user_state(user.clone()).await?;
        tracing::info!("Restored session for '{}'", user.name);
        Ok(Some(user))
    }

    /// Log in, defaulting the name to "Demo User"
    pub async fn login(&mut self, name: Option<String>) -> Result<User> {
        let user = self
            .provider
            .user
            .login_user(UserUpdate { name })
            .await?;

        self.load_user_state(user.clone()).await?;
        Ok(user)
    }

    /// Log out and drop all session state
    pub async fn logout(&mut self) -> Result<()> {
        self.provider.user.logout_user().await?;

        self.user = None;
        self.credits = 0;
        self.history.clear();
        self.clear_results();
        Ok(())
    }

    /// Generate a pitch, save it to the user's history and charge one credit
    pub async fn generate_pitch(&mut self, input: &str, style: PitchStyle) -> Result<StoredPitch> {
        let user_id = self.require_credits()?;
        let input = input.trim();
        if input.is_empty() {
            return Err(PitchCraftError::EmptyInput);
        }

        self.clear_results();

        let text = self.provider.ai.generate_pitch(input, style).await?;

        // A pitch is stored only once its credit is charged
        self.charge(user_id.clone()).await?;
        let pitch = GeneratedPitch::new(input, style, text).with_user_id(user_id.clone());
        let saved = match self.provider.pitch.save_pitch(pitch).await {
            Ok(saved) => saved,
            Err(e) => {
                self.refund(user_id).await;
                return Err(e);
            }
        };

        self.history.insert(0, saved.clone());
        self.current_pitch = Some(saved.clone());

        tracing::info!("Generated {} pitch {}", style, saved.id);
        Ok(saved)
    }

    /// Ask for feedback on a pitch, charging one credit
    pub async fn analyze_pitch(&mut self, pitch: &str) -> Result<String> {
        let user_id = self.require_credits()?;
        self.analysis = None;

        let analysis = self.provider.ai.analyze_pitch(pitch).await?;
        self.charge(user_id).await?;
        self.analysis = Some(analysis.clone());
        Ok(analysis)
    }

    /// Ask for slogans and marketing angles, charging one credit
    pub async fn suggest_marketing(&mut self, input: &str) -> Result<String> {
        let user_id = self.require_credits()?;
        self.marketing = None;

        let suggestions = self
            .provider
            .ai
            .generate_marketing_suggestions(input)
            .await?;
        self.charge(user_id).await?;
        self.marketing = Some(suggestions.clone());
        Ok(suggestions)
    }

    /// Add purchased credits to the current user's balance
    pub async fn buy_credits(&mut self, amount: u32) -> Result<u32> {
        let user_id = self.require_user()?;
        self.credits = self
            .provider
            .credits
            .add_credits(Some(user_id), amount)
            .await?;
        tracing::info!("Purchased {} credits, balance {}", amount, self.credits);
        Ok(self.credits)
    }

    /// Look up a saved pitch by id
    pub async fn view_pitch(&self, id: &str) -> Result<StoredPitch> {
        self.provider
            .pitch
            .get_pitch_by_id(id)
            .await?
            .ok_or_else(|| PitchCraftError::PitchNotFound(id.to_string()))
    }

    /// Delete a saved pitch from storage and from the session history
    pub async fn delete_pitch(&mut self, id: &str) -> Result<()> {
        self.provider.pitch.delete_pitch(id).await?;
        self.history.retain(|p| p.id != id);
        if self.current_pitch.as_ref().is_some_and(|p| p.id == id) {
            self.clear_results();
        }
        Ok(())
    }

    /// Reload the balance and history from the providers
    pub async fn refresh(&mut self) -> Result<()> {
        let user = self.user.clone().ok_or(PitchCraftError::NotLoggedIn)?;
        self.load_user_state(user).await
    }

    async fn load_user_state(&mut self, user: User) -> Result<()> {
        let user_id = Some(user.name.clone());
        self.credits = self.provider.credits.get_credits(user_id.clone()).await?;
        self.history = self.provider.pitch.get_pitch_history(user_id).await?;
        self.user = Some(user);
        Ok(())
    }

    fn require_user(&self) -> Result<String> {
        self.user
            .as_ref()
            .map(|u| u.name.clone())
            .ok_or(PitchCraftError::NotLoggedIn)
    }

    fn require_credits(&self) -> Result<String> {
        let user_id = self.require_user()?;
        if self.credits < CREDITS_PER_REQUEST {
            tracing::debug!("Refusing AI request: {} credits", self.credits);
            return Err(PitchCraftError::InsufficientCredits {
                available: self.credits,
            });
        }
        Ok(user_id)
    }

    async fn charge(&mut self, user_id: String) -> Result<()> {
        self.credits = self
            .provider
            .credits
            .deduct_credits(Some(user_id), CREDITS_PER_REQUEST)
            .await?;
        Ok(())
    }

    async fn refund(&mut self, user_id: String) {
        match self
            .provider
            .credits
            .add_credits(Some(user_id), CREDITS_PER_REQUEST)
            .await
        {
            Ok(balance) => self.credits = balance,
            Err(e) => tracing::warn!("Failed to refund credit after save error: {}", e),
        }
    }

    fn clear_results(&mut self) {
        self.current_pitch = None;
        self.analysis = None;
        self.marketing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mocks::test_helpers::*;
    use crate::providers::traits::{
        CreditsProvider, MockCreditsProvider, MockPitchProvider, PitchProvider,
    };
    use crate::providers::{MemoryCreditsProvider, MemoryPitchProvider};

    fn session_with(ai: crate::providers::traits::MockAiProvider) -> PitchSession {
        PitchSession::new(Arc::new(create_memory_provider(Arc::new(ai))))
    }

    fn session_with_backends(
        credits: Arc<dyn CreditsProvider>,
        pitch: Arc<dyn PitchProvider>,
    ) -> PitchSession {
        let memory = create_memory_provider(Arc::new(create_succeeding_ai()));
        let config = memory.config();
        PitchSession::new(Arc::new(DataProvider::new(
            memory.user,
            pitch,
            credits,
            memory.ai,
            memory.storage,
            config,
        )))
    }

    #[tokio::test]
    async fn test_failed_charge_saves_nothing() {
        let mut credits = MockCreditsProvider::new();
        credits.expect_get_credits().returning(|_| Ok(5));
        credits
            .expect_deduct_credits()
            .times(1)
            .returning(|_, _| Err(PitchCraftError::StorageError("disk full".to_string())));

        let pitches = Arc::new(MemoryPitchProvider::new());
        let mut session = session_with_backends(Arc::new(credits), pitches.clone());
        session.login(None).await.unwrap();

        let result = session.generate_pitch("idea", PitchStyle::ElevatorPitch).await;

        assert!(matches!(result, Err(PitchCraftError::StorageError(_))));
        assert_eq!(session.credits(), 5);
        assert!(session.history().is_empty());
        assert!(session.current_pitch().is_none());
        assert!(pitches.get_pitch_history(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_refunds_credit() {
        let mut pitches = MockPitchProvider::new();
        pitches.expect_get_pitch_history().returning(|_| Ok(Vec::new()));
        pitches
            .expect_save_pitch()
            .times(1)
            .returning(|_| Err(PitchCraftError::StorageError("disk full".to_string())));

        let credits = Arc::new(MemoryCreditsProvider::new());
        let mut session = session_with_backends(credits.clone(), Arc::new(pitches));
        session.login(None).await.unwrap();

        let result = session.generate_pitch("idea", PitchStyle::ElevatorPitch).await;

        assert!(matches!(result, Err(PitchCraftError::StorageError(_))));
        assert_eq!(session.credits(), 5);
        assert_eq!(
            credits.get_credits(Some("Demo User".to_string())).await.unwrap(),
            5
        );
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_actions_require_login() {
        let mut session = session_with(create_mock_ai());

        assert!(matches!(
            session.generate_pitch("app", PitchStyle::ElevatorPitch).await,
            Err(PitchCraftError::NotLoggedIn)
        ));
        assert!(matches!(
            session.buy_credits(CREDIT_PACK_SIZE).await,
            Err(PitchCraftError::NotLoggedIn)
        ));
    }

    #[tokio::test]
    async fn test_zero_credits_refuses_before_ai_call() {
        // create_mock_ai has no generation expectations: any call would panic
        let mut session = session_with(create_mock_ai());
        session.login(None).await.unwrap();
        session
            .provider()
            .credits
            .update_credits(Some("Demo User".to_string()), 0)
            .await
            .unwrap();
        session.refresh().await.unwrap();

        for result in [
            session.analyze_pitch("pitch").await,
            session.suggest_marketing("idea").await,
        ] {
            assert!(matches!(
                result,
                Err(PitchCraftError::InsufficientCredits { available: 0 })
            ));
        }
        assert!(matches!(
            session.generate_pitch("idea", PitchStyle::ElevatorPitch).await,
            Err(PitchCraftError::InsufficientCredits { available: 0 })
        ));
        assert_eq!(session.credits(), 0);
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected() {
        let mut session = session_with(create_mock_ai());
        session.login(None).await.unwrap();

        assert!(matches!(
            session.generate_pitch("   ", PitchStyle::ElevatorPitch).await,
            Err(PitchCraftError::EmptyInput)
        ));
        assert_eq!(session.credits(), 5);
    }

    #[tokio::test]
    async fn test_ai_failure_keeps_credits_and_history() {
        let mut ai = create_mock_ai();
        ai.expect_generate_pitch()
            .times(1)
            .returning(|_, _| Err(PitchCraftError::ApiError("API Error: 500".to_string())));

        let mut session = session_with(ai);
        session.login(None).await.unwrap();

        match session.generate_pitch("idea", PitchStyle::ElevatorPitch).await {
            Err(PitchCraftError::ApiError(msg)) => assert_eq!(msg, "API Error: 500"),
            other => panic!("Expected ApiError, got {:?}", other),
        }
        assert_eq!(session.credits(), 5);
        assert!(session.history().is_empty());
        assert!(session
            .provider()
            .pitch
            .get_pitch_history(None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_generate_tags_pitch_with_user() {
        let mut session = session_with(create_succeeding_ai());
        session.login(Some("Ada".to_string())).await.unwrap();

        let saved = session
            .generate_pitch("  a garden planner ", PitchStyle::BenefitDriven)
            .await
            .unwrap();

        assert_eq!(saved.user_id.as_deref(), Some("Ada"));
        assert_eq!(saved.input, "a garden planner");
        assert_eq!(saved.pitch, "Benefit-Driven pitch for a garden planner");
        assert_eq!(session.current_pitch(), Some(&saved));
        assert_eq!(session.credits(), 4);
    }

    #[tokio::test]
    async fn test_analysis_and_marketing_each_cost_one_credit() {
        let mut session = session_with(create_succeeding_ai());
        session.login(None).await.unwrap();

        session.analyze_pitch("pitch").await.unwrap();
        session.suggest_marketing("idea").await.unwrap();

        assert_eq!(session.credits(), 3);
        assert!(session.analysis().unwrap().contains("Strengths"));
        assert!(session.marketing_suggestions().unwrap().contains("Slogans"));
    }

    #[tokio::test]
    async fn test_buy_credits_and_logout() {
        let mut session = session_with(create_mock_ai());
        session.login(None).await.unwrap();

        assert_eq!(session.buy_credits(CREDIT_PACK_SIZE).await.unwrap(), 15);

        session.logout().await.unwrap();
        assert!(session.user().is_none());
        assert_eq!(session.credits(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.provider().user.get_current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_view_and_delete_pitch() {
        let mut session = session_with(create_succeeding_ai());
        session.login(None).await.unwrap();

        let saved = session
            .generate_pitch("idea", PitchStyle::FeatureFocused)
            .await
            .unwrap();
        assert_eq!(session.view_pitch(&saved.id).await.unwrap(), saved);

        session.delete_pitch(&saved.id).await.unwrap();
        assert!(session.history().is_empty());
        assert!(session.current_pitch().is_none());
        assert!(matches!(
            session.view_pitch(&saved.id).await,
            Err(PitchCraftError::PitchNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_restore_picks_up_existing_user() {
        let provider = Arc::new(create_memory_provider(Arc::new(create_succeeding_ai())));

        let mut first = PitchSession::new(provider.clone());
        first.login(Some("Ada".to_string())).await.unwrap();
        first
            .generate_pitch("idea", PitchStyle::ElevatorPitch)
            .await
            .unwrap();

        let mut second = PitchSession::new(provider);
        let restored = second.restore().await.unwrap();

        assert_eq!(restored.map(|u| u.name), Some("Ada".to_string()));
        assert_eq!(second.credits(), 4);
        assert_eq!(second.history().len(), 1);
    }
}
