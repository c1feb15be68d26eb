use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::Result;
use crate::goals::goals_model::{BudgetGoal, NewBudgetGoal};
use crate::goals::goals_traits::GoalRepositoryTrait;
use crate::store::{paths, LedgerStoreTrait};

pub struct GoalRepository {
    store: Arc<dyn LedgerStoreTrait>,
    user_id: String,
}

impl GoalRepository {
    pub fn new(store: Arc<dyn LedgerStoreTrait>, user_id: impl Into<String>) -> Self {
        GoalRepository {
            store,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    async fn find_by_id(&self, goal_id: &str) -> Result<Option<BudgetGoal>> {
        let path = paths::budget_goal(&self.user_id, goal_id);
        match self.store.get(&path).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<BudgetGoal>> {
        let children = self.store.list(&paths::budget_goals(&self.user_id)).await?;
        let mut goals = Vec::with_capacity(children.len());
        for (_, document) in children {
            goals.push(serde_json::from_value(document)?);
        }
        Ok(goals)
    }

    async fn insert(&self, new_goal: NewBudgetGoal) -> Result<BudgetGoal> {
        let goal = BudgetGoal {
            id: Uuid::new_v4().to_string(),
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.initial_amount,
            created_at: Utc::now().timestamp_millis(),
            category_id: new_goal.category_id,
            wallet_id: new_goal.wallet_id,
            recurrence: new_goal.recurrence,
        };
        let path = paths::budget_goal(&self.user_id, &goal.id);
        self.store.put(&path, serde_json::to_value(&goal)?).await?;
        Ok(goal)
    }

    async fn add_to_current(&self, goal_id: &str, amount: Decimal) -> Result<Decimal> {
        self.store
            .adjust_amount(
                &paths::budget_goal(&self.user_id, goal_id),
                "currentAmount",
                amount,
                false,
            )
            .await
    }
}
