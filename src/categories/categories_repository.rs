use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::categories::categories_model::{Category, NewCategory};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::errors::{Result, StoreError};
use crate::store::{paths, LedgerStoreTrait};

pub struct CategoryRepository {
    store: Arc<dyn LedgerStoreTrait>,
    user_id: String,
}

impl CategoryRepository {
    pub fn new(store: Arc<dyn LedgerStoreTrait>, user_id: impl Into<String>) -> Self {
        CategoryRepository {
            store,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let path = paths::category(&self.user_id, category_id);
        let document = self
            .store
            .get(&path)
            .await?
            .ok_or(StoreError::NotFound(path))?;
        Ok(serde_json::from_value(document)?)
    }

    async fn exists(&self, category_id: &str) -> Result<bool> {
        let path = paths::category(&self.user_id, category_id);
        Ok(self.store.get(&path).await?.is_some())
    }

    async fn list(&self) -> Result<Vec<Category>> {
        let children = self.store.list(&paths::categories(&self.user_id)).await?;
        let mut categories = Vec::with_capacity(children.len());
        for (_, document) in children {
            categories.push(serde_json::from_value(document)?);
        }
        Ok(categories)
    }

    async fn insert(&self, new_category: NewCategory) -> Result<Category> {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(Category::from_new(id, new_category))
            .await
    }

    async fn insert_with_id(&self, category: Category) -> Result<Category> {
        let path = paths::category(&self.user_id, &category.id);
        self.store
            .put(&path, serde_json::to_value(&category)?)
            .await?;
        Ok(category)
    }
}
