use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use crate::categories::categories_model::{default_categories, Category, NewCategory};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        CategoryService { repository }
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        self.repository.insert(new_category).await
    }

    async fn get_category(&self, category_id: &str) -> Result<Category> {
        self.repository.get_by_id(category_id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list().await
    }

    async fn seed_defaults(&self) -> Result<()> {
        let mut created = 0;
        for category in default_categories() {
            if self.repository.exists(&category.id).await? {
                debug!("Category '{}' already present, skipping", category.id);
                continue;
            }
            self.repository.insert_with_id(category).await?;
            created += 1;
        }
        if created > 0 {
            info!("Seeded {} default categories", created);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::categories::categories_model::CategoryType;
    use crate::categories::CategoryRepository;
    use crate::constants::BUDGET_TRANSFER_CATEGORY_ID;
    use crate::store::MemoryLedgerStore;

    fn test_service() -> CategoryService {
        let store = Arc::new(MemoryLedgerStore::new());
        CategoryService::new(Arc::new(CategoryRepository::new(store, "u1")))
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let service = test_service();
        service.seed_defaults().await.unwrap();
        let first = service.list_categories().await.unwrap();

        service.seed_defaults().await.unwrap();
        let second = service.list_categories().await.unwrap();

        assert_eq!(first.len(), second.len());
        assert!(second.iter().any(|c| c.id == BUDGET_TRANSFER_CATEGORY_ID));
    }

    #[tokio::test]
    async fn income_category_cannot_carry_budget_limit() {
        let service = test_service();
        let result = service
            .create_category(NewCategory {
                name: "Bonus".to_string(),
                category_type: CategoryType::Income,
                color_hex: "#FFFFFF".to_string(),
                icon_name: "star".to_string(),
                budget_limit: Some(dec!(100)),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn expense_category_keeps_its_limit() {
        let service = test_service();
        let category = service
            .create_category(NewCategory {
                name: "Hobbies".to_string(),
                category_type: CategoryType::Expense,
                color_hex: "#123456".to_string(),
                icon_name: "palette".to_string(),
                budget_limit: Some(dec!(150)),
            })
            .await
            .unwrap();

        let fetched = service.get_category(&category.id).await.unwrap();
        assert_eq!(fetched.budget_limit, Some(dec!(150)));
    }
}
