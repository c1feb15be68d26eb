use async_trait::async_trait;

use crate::badges::badges_model::Badge;
use crate::errors::Result;
use crate::goals::BudgetGoal;

/// Trait for badge repository operations
#[async_trait]
pub trait BadgeRepositoryTrait: Send + Sync {
    /// Writes any catalog entries the user is missing, unearned.
    async fn seed(&self) -> Result<()>;
    async fn list(&self) -> Result<Vec<Badge>>;
    async fn find_by_id(&self, badge_id: &str) -> Result<Option<Badge>>;
    /// Re-reads the badge right before writing; returns `None` when the
    /// badge is unknown or was already earned, so awards stay idempotent
    /// under re-derivation.
    async fn mark_earned(&self, badge_id: &str, earned_at: i64) -> Result<Option<Badge>>;
}

/// Trait for badge service operations
#[async_trait]
pub trait BadgeServiceTrait: Send + Sync {
    async fn seed_badges(&self) -> Result<()>;
    async fn get_badges(&self) -> Result<Vec<Badge>>;
    /// Re-derives every badge rule from the completed-goal set and awards
    /// whatever is newly satisfied. `on_badge_earned` fires once per
    /// freshly earned badge.
    async fn check_and_award_badges(
        &self,
        just_completed: &BudgetGoal,
        on_badge_earned: &(dyn for<'a> Fn(&'a Badge) + Send + Sync),
    ) -> Result<Vec<Badge>>;
}
