// Current-user backends

use super::storage::{read_json, write_json};
use super::traits::{StorageProvider, UserProvider};
use crate::error::Result;
use crate::models::{User, UserUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage key holding the current user
pub const USER_STORAGE_KEY: &str = "pitchcraft-user";

/// Current user kept in the injected storage backend
pub struct LocalStorageUserProvider {
    storage: Arc<dyn StorageProvider>,
}

impl LocalStorageUserProvider {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl UserProvider for LocalStorageUserProvider {
    async fn get_current_user(&self) -> Result<Option<User>> {
        Ok(read_json(self.storage.as_ref(), USER_STORAGE_KEY).await)
    }

    async fn login_user(&self, user: UserUpdate) -> Result<User> {
        let user = user.into_user();
        write_json(self.storage.as_ref(), USER_STORAGE_KEY, &user).await?;
        tracing::info!("Logged in as '{}'", user.name);
        Ok(user)
    }

    async fn logout_user(&self) -> Result<()> {
        self.storage.remove_item(USER_STORAGE_KEY).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<User> {
        write_json(self.storage.as_ref(), USER_STORAGE_KEY, &user).await?;
        Ok(user)
    }
}

/// Current user held in process memory
#[derive(Default)]
pub struct MemoryUserProvider {
    current: RwLock<Option<User>>,
}

impl MemoryUserProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserProvider for MemoryUserProvider {
    async fn get_current_user(&self) -> Result<Option<User>> {
        Ok(self.current.read().await.clone())
    }

    async fn login_user(&self, user: UserUpdate) -> Result<User> {
        let user = user.into_user();
        *self.current.write().await = Some(user.clone());
        tracing::info!("Logged in as '{}'", user.name);
        Ok(user)
    }

    async fn logout_user(&self) -> Result<()> {
        *self.current.write().await = None;
        tracing::info!("Logged out");
        Ok(())
    }

    async fn update_user(&self, user: User) -> Result<User> {
        *self.current.write().await = Some(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_USER_NAME;
    use crate::providers::traits::MockStorageProvider;
    use crate::providers::MemoryStorageProvider;
    use crate::error::PitchCraftError;
    use serde_json::json;

    fn backends() -> Vec<Box<dyn UserProvider>> {
        vec![
            Box::new(LocalStorageUserProvider::new(Arc::new(MemoryStorageProvider::new()))),
            Box::new(MemoryUserProvider::new()),
        ]
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        for provider in backends() {
            assert_eq!(provider.get_current_user().await.unwrap(), None);

            let user = provider.login_user(UserUpdate::default()).await.unwrap();
            assert_eq!(user.name, DEFAULT_USER_NAME);

            let first = provider.get_current_user().await.unwrap();
            let second = provider.get_current_user().await.unwrap();
            assert_eq!(first, Some(user.clone()));
            assert_eq!(first, second);

            provider.logout_user().await.unwrap();
            assert_eq!(provider.get_current_user().await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_update_overwrites_current_user() {
        for provider in backends() {
            provider.login_user(UserUpdate::named("Ada")).await.unwrap();

            let updated = provider
                .update_user(User {
                    name: "Grace".to_string(),
                })
                .await
                .unwrap();

            assert_eq!(updated.name, "Grace");
            assert_eq!(provider.get_current_user().await.unwrap(), Some(updated));
        }
    }

    #[tokio::test]
    async fn test_local_user_is_stored_under_fixed_key() {
        let storage = Arc::new(MemoryStorageProvider::new());
        let provider = LocalStorageUserProvider::new(storage.clone());

        provider.login_user(UserUpdate::named("Ada")).await.unwrap();

        assert_eq!(
            storage.get_item(USER_STORAGE_KEY).await,
            Some(json!({"name": "Ada"}))
        );
    }

    #[tokio::test]
    async fn test_local_login_propagates_write_failure() {
        let mut storage = MockStorageProvider::new();
        storage
            .expect_set_item()
            .returning(|key, _| Err(PitchCraftError::StorageError(format!("Failed to save '{}'", key))));

        let provider = LocalStorageUserProvider::new(Arc::new(storage));

        let result = provider.login_user(UserUpdate::default()).await;
        assert!(matches!(result, Err(PitchCraftError::StorageError(_))));
    }
}
