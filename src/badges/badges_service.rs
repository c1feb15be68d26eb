use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::badges::badges_model::{
    Badge, BIG_DREAMER, CONSISTENT_SAVER, DEDICATION_MASTER, FIRST_GOAL, GOAL_MASTER,
    HUNDRED_THOUSAND_SAVER, LIGHTNING_SAVER, PERFECTIONIST, QUICK_SAVER, SAVINGS_LEGEND,
    TEN_THOUSAND_SAVER, THOUSAND_SAVER,
};
use crate::badges::badges_traits::{BadgeRepositoryTrait, BadgeServiceTrait};
use crate::constants::DAY_MS;
use crate::errors::Result;
use crate::goals::{BudgetGoal, GoalRepositoryTrait, GoalStatus};

/// Badge ids whose rules hold for the given achievement, derived from
/// scratch every time. Pure so the rule table can be tested without a
/// store.
pub fn evaluate_rules(
    just_completed: &BudgetGoal,
    completed_goals: &[BudgetGoal],
    now_ms: i64,
) -> Vec<&'static str> {
    let mut earned = Vec::new();
    let completed_count = completed_goals.len();
    let total_saved: Decimal = completed_goals.iter().map(|g| g.target_amount).sum();

    match completed_count {
        1 => earned.push(FIRST_GOAL),
        5 => earned.push(GOAL_MASTER),
        10 => earned.push(SAVINGS_LEGEND),
        _ => {}
    }

    if total_saved >= dec!(100_000) {
        earned.push(HUNDRED_THOUSAND_SAVER);
    } else if total_saved >= dec!(10_000) {
        earned.push(TEN_THOUSAND_SAVER);
    } else if total_saved >= dec!(1_000) {
        earned.push(THOUSAND_SAVER);
    }

    let elapsed_ms = now_ms - just_completed.created_at;
    if elapsed_ms <= DAY_MS {
        earned.push(LIGHTNING_SAVER);
    } else if elapsed_ms <= 7 * DAY_MS {
        earned.push(QUICK_SAVER);
    }

    if just_completed.current_amount >= dec!(50_000) {
        earned.push(BIG_DREAMER);
    }
    if just_completed.current_amount == just_completed.target_amount {
        earned.push(PERFECTIONIST);
    }

    if completed_count >= 5 {
        earned.push(DEDICATION_MASTER);
    } else if completed_count >= 3 {
        earned.push(CONSISTENT_SAVER);
    }

    earned
}

pub struct BadgeService {
    badge_repository: Arc<dyn BadgeRepositoryTrait>,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
}

impl BadgeService {
    pub fn new(
        badge_repository: Arc<dyn BadgeRepositoryTrait>,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        BadgeService {
            badge_repository,
            goal_repository,
        }
    }
}

#[async_trait]
impl BadgeServiceTrait for BadgeService {
    async fn seed_badges(&self) -> Result<()> {
        self.badge_repository.seed().await
    }

    async fn get_badges(&self) -> Result<Vec<Badge>> {
        self.badge_repository.list().await
    }

    async fn check_and_award_badges(
        &self,
        just_completed: &BudgetGoal,
        on_badge_earned: &(dyn for<'a> Fn(&'a Badge) + Send + Sync),
    ) -> Result<Vec<Badge>> {
        let mut completed = self.goal_repository.list().await?;
        completed.retain(|g| g.status() == GoalStatus::Achieved);

        let now_ms = Utc::now().timestamp_millis();
        let candidates = evaluate_rules(just_completed, &completed, now_ms);

        let mut newly_earned = Vec::new();
        for badge_id in candidates {
            if let Some(badge) = self.badge_repository.mark_earned(badge_id, now_ms).await? {
                info!("Awarded badge '{}'", badge.id);
                on_badge_earned(&badge);
                newly_earned.push(badge);
            }
        }
        Ok(newly_earned)
    }
}
