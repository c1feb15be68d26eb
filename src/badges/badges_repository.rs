use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::badges::badges_model::{Badge, BADGE_CATALOG};
use crate::badges::badges_traits::BadgeRepositoryTrait;
use crate::errors::Result;
use crate::store::{paths, LedgerStoreTrait};

pub struct BadgeRepository {
    store: Arc<dyn LedgerStoreTrait>,
    user_id: String,
}

impl BadgeRepository {
    pub fn new(store: Arc<dyn LedgerStoreTrait>, user_id: impl Into<String>) -> Self {
        BadgeRepository {
            store,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl BadgeRepositoryTrait for BadgeRepository {
    async fn seed(&self) -> Result<()> {
        for spec in &BADGE_CATALOG {
            let path = paths::badge(&self.user_id, spec.id);
            if self.store.get(&path).await?.is_none() {
                self.store
                    .put(&path, serde_json::to_value(spec.unearned())?)
                    .await?;
            }
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Badge>> {
        let children = self.store.list(&paths::badges(&self.user_id)).await?;
        let mut badges = Vec::with_capacity(children.len());
        for (_, document) in children {
            badges.push(serde_json::from_value(document)?);
        }
        Ok(badges)
    }

    async fn find_by_id(&self, badge_id: &str) -> Result<Option<Badge>> {
        let path = paths::badge(&self.user_id, badge_id);
        match self.store.get(&path).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    async fn mark_earned(&self, badge_id: &str, earned_at: i64) -> Result<Option<Badge>> {
        // Fresh read right before the write keeps the award idempotent
        // when the same rule fires from two achievement paths.
        let badge = match self.find_by_id(badge_id).await? {
            Some(badge) if !badge.earned => badge,
            _ => return Ok(None),
        };

        let mut fields = Map::new();
        fields.insert("earned".to_string(), Value::Bool(true));
        fields.insert("earnedAt".to_string(), Value::from(earned_at));
        self.store
            .update_fields(&paths::badge(&self.user_id, badge_id), fields)
            .await?;

        Ok(Some(Badge {
            earned: true,
            earned_at: Some(earned_at),
            ..badge
        }))
    }
}
