// Core contracts for the provider layer
//
// Design Decision: One async trait per capability
//
// Rationale: Each capability (storage, user, pitch, credits, AI) is an
// explicit operation set. Backends are types implementing that set, and the
// factory hands them out as Arc<dyn Trait>, so callers never learn which
// backend answers a call.
//
// All traits are Send + Sync so an aggregate can be shared across tokio tasks.

use crate::error::Result;
use crate::models::{GeneratedPitch, PitchStyle, StoredPitch, User, UserUpdate};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Filesystem seam under the durable storage backend
///
/// Semantics are those of a key/value directory: missing files read as
/// `None`, removing a missing file succeeds, listing a missing directory
/// yields nothing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a UTF-8 file, `Ok(None)` when it does not exist
    async fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Write a file, creating parent directories as needed
    async fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Remove a file; a missing file is not an error
    async fn remove(&self, path: &Path) -> Result<()>;

    /// List the files directly inside a directory
    async fn list(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Key/value persistence
///
/// Reads never fail: an absent, unreadable or corrupt entry is `None`.
/// Writes surface failures so a lost write is never mistaken for success.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Store a value under a key (last write wins)
    ///
    /// # Errors
    /// - StorageError naming the key when the backend cannot persist it
    async fn set_item(&self, key: &str, value: Value) -> Result<()>;

    /// Fetch the value stored under a key
    async fn get_item(&self, key: &str) -> Option<Value>;

    /// Delete a key
    ///
    /// # Errors
    /// - StorageError naming the key
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Delete every key
    async fn clear(&self) -> Result<()>;
}

/// The single current user
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserProvider: Send + Sync {
    async fn get_current_user(&self) -> Result<Option<User>>;

    /// Make a user current; a missing name becomes "Demo User"
    async fn login_user(&self, user: UserUpdate) -> Result<User>;

    /// Clear the current user entirely
    async fn logout_user(&self) -> Result<()>;

    /// Replace the current user record
    async fn update_user(&self, user: User) -> Result<User>;
}

/// Saved pitch history, newest first
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PitchProvider: Send + Sync {
    /// Assign an id and timestamp, then prepend to the history
    async fn save_pitch(&self, pitch: GeneratedPitch) -> Result<StoredPitch>;

    /// Full history, or only the records whose `user_id` equals the filter
    async fn get_pitch_history(&self, user_id: Option<String>) -> Result<Vec<StoredPitch>>;

    /// Remove a pitch; unknown ids are ignored
    async fn delete_pitch(&self, id: &str) -> Result<()>;

    async fn get_pitch_by_id(&self, id: &str) -> Result<Option<StoredPitch>>;
}

/// Credit balances keyed by user id
///
/// `None` (or an empty id) addresses the default balance. Unknown keys
/// start at the starting grant.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CreditsProvider: Send + Sync {
    async fn get_credits(&self, user_id: Option<String>) -> Result<u32>;

    /// Overwrite a balance, returning the stored value
    async fn update_credits(&self, user_id: Option<String>, credits: u32) -> Result<u32>;

    /// Increase a balance, returning the new value
    async fn add_credits(&self, user_id: Option<String>, amount: u32) -> Result<u32> {
        let current = self.get_credits(user_id.clone()).await?;
        self.update_credits(user_id, current.saturating_add(amount))
            .await
    }

    /// Decrease a balance, clamping at zero
    async fn deduct_credits(&self, user_id: Option<String>, amount: u32) -> Result<u32> {
        let current = self.get_credits(user_id.clone()).await?;
        self.update_credits(user_id, current.saturating_sub(amount))
            .await
    }
}

/// Remote text generation
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn generate_pitch(&self, input: &str, style: PitchStyle) -> Result<String>;

    /// Feedback under Strengths / Weaknesses / Suggestions headers
    async fn analyze_pitch(&self, pitch: &str) -> Result<String>;

    /// Slogans and marketing angles for an app description
    async fn generate_marketing_suggestions(&self, input: &str) -> Result<String>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
