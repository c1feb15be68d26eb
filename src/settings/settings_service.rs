use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use crate::errors::Result;
use crate::settings::settings_model::{Settings, SettingsUpdate};
use crate::settings::settings_traits::{SettingsRepositoryTrait, SettingsServiceTrait};

/// Caches settings in memory so notification paths can consult them
/// synchronously; the store stays the source of truth on writes.
pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
    cache: RwLock<Settings>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            repository,
            cache: RwLock::new(Settings::default()),
        }
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    async fn load_settings(&self) -> Result<Settings> {
        let settings = self.repository.load().await?.unwrap_or_default();
        match self.cache.write() {
            Ok(mut cached) => *cached = settings.clone(),
            Err(poisoned) => *poisoned.into_inner() = settings.clone(),
        }
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        let mut settings = self.snapshot();
        update.apply_to(&mut settings);
        self.repository.save(&settings).await?;
        match self.cache.write() {
            Ok(mut cached) => *cached = settings.clone(),
            Err(poisoned) => *poisoned.into_inner() = settings.clone(),
        }
        Ok(settings)
    }

    fn snapshot(&self) -> Settings {
        match self.cache.read() {
            Ok(cached) => cached.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
