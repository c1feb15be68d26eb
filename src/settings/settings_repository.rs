use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::settings_model::Settings;
use crate::settings::settings_traits::SettingsRepositoryTrait;
use crate::store::{paths, LedgerStoreTrait};

pub struct SettingsRepository {
    store: Arc<dyn LedgerStoreTrait>,
    user_id: String,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn LedgerStoreTrait>, user_id: impl Into<String>) -> Self {
        SettingsRepository {
            store,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    async fn load(&self) -> Result<Option<Settings>> {
        let path = paths::settings(&self.user_id);
        match self.store.get(&path).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let path = paths::settings(&self.user_id);
        self.store.put(&path, serde_json::to_value(settings)?).await
    }
}
