use async_trait::async_trait;

use crate::categories::categories_model::{Category, NewCategory};
use crate::errors::Result;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, category_id: &str) -> Result<Category>;
    async fn exists(&self, category_id: &str) -> Result<bool>;
    async fn list(&self) -> Result<Vec<Category>>;
    async fn insert(&self, new_category: NewCategory) -> Result<Category>;
    async fn insert_with_id(&self, category: Category) -> Result<Category>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;
    async fn get_category(&self, category_id: &str) -> Result<Category>;
    async fn list_categories(&self) -> Result<Vec<Category>>;
    /// Seeds the built-in category set; only absent entries are created.
    async fn seed_defaults(&self) -> Result<()>;
}
