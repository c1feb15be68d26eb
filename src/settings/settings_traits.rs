use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::settings_model::{Settings, SettingsUpdate};

/// Trait for settings repository operations
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    async fn load(&self) -> Result<Option<Settings>>;
    async fn save(&self, settings: &Settings) -> Result<()>;
}

/// Trait for settings service operations
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Loads from the store into the in-memory cache, falling back to
    /// defaults when nothing is stored yet.
    async fn load_settings(&self) -> Result<Settings>;
    async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings>;
    /// Cached copy; cheap enough to call on every notification.
    fn snapshot(&self) -> Settings;
}
