use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::goals::goals_model::{BudgetGoal, NewBudgetGoal};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// `Ok(None)` when no goal exists under the id; transient store
    /// failures come back as errors so callers can retry.
    async fn find_by_id(&self, goal_id: &str) -> Result<Option<BudgetGoal>>;
    async fn list(&self) -> Result<Vec<BudgetGoal>>;
    async fn insert(&self, new_goal: NewBudgetGoal) -> Result<BudgetGoal>;
    /// Atomic increment of `currentAmount`; returns the new value.
    async fn add_to_current(&self, goal_id: &str, amount: Decimal) -> Result<Decimal>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewBudgetGoal) -> Result<BudgetGoal>;
    /// Moves `amount` into the goal. Rejects non-positive amounts and
    /// over-funding before any state changes; on reaching the target the
    /// goal transitions to achieved exactly once.
    async fn add_funds(&self, goal_id: &str, amount: Decimal) -> Result<BudgetGoal>;
    async fn get_goal(&self, goal_id: &str) -> Result<BudgetGoal>;
    async fn list_goals(&self) -> Result<Vec<BudgetGoal>>;
    async fn list_completed_goals(&self) -> Result<Vec<BudgetGoal>>;
}
