use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;

use crate::badges::{Badge, BadgeServiceTrait};
use crate::constants::BUDGET_TRANSFER_CATEGORY_ID;
use crate::errors::{Result, ValidationError};
use crate::goals::goals_errors::GoalError;
use crate::goals::goals_model::{BudgetGoal, GoalStatus, NewBudgetGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::notifications::NotificationDispatcherTrait;
use crate::reminders::ReminderSchedulerTrait;
use crate::transactions::{NewTransaction, TransactionServiceTrait, TransactionType};

/// Owns the goal's funding invariant and the `Active -> Achieved`
/// transition: reminder cancellation, badge evaluation and the
/// achievement notification all run from here.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    badge_service: Arc<dyn BadgeServiceTrait>,
    scheduler: Arc<dyn ReminderSchedulerTrait>,
    dispatcher: Arc<dyn NotificationDispatcherTrait>,
}

impl GoalService {
    pub fn new(
        repository: Arc<dyn GoalRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        badge_service: Arc<dyn BadgeServiceTrait>,
        scheduler: Arc<dyn ReminderSchedulerTrait>,
        dispatcher: Arc<dyn NotificationDispatcherTrait>,
    ) -> Self {
        GoalService {
            repository,
            transaction_service,
            badge_service,
            scheduler,
            dispatcher,
        }
    }

    /// Audit record for money moved from the linked wallet into the
    /// goal; posting it also debits the wallet.
    async fn record_transfer(&self, goal: &BudgetGoal, amount: Decimal) -> Result<()> {
        let wallet_id = match &goal.wallet_id {
            Some(wallet_id) => wallet_id.clone(),
            None => return Ok(()),
        };
        self.transaction_service
            .create_transaction(NewTransaction {
                amount,
                transaction_type: TransactionType::Expense,
                category_id: BUDGET_TRANSFER_CATEGORY_ID.to_string(),
                wallet_id,
                date: None,
                description: format!("Transfer to goal '{}'", goal.name),
                image_data: None,
            })
            .await?;
        Ok(())
    }

    async fn finalize_achievement(&self, goal: &BudgetGoal) -> Result<()> {
        info!("Goal '{}' achieved, target {}", goal.name, goal.target_amount);
        self.scheduler.cancel_budget_reminder(&goal.id);

        let dispatcher = Arc::clone(&self.dispatcher);
        let on_badge_earned = move |badge: &Badge| {
            dispatcher.show_badge_earned_notification(badge);
        };
        self.badge_service
            .check_and_award_badges(goal, &on_badge_earned)
            .await?;

        self.dispatcher.show_goal_achieved_notification(goal);
        Ok(())
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, new_goal: NewBudgetGoal) -> Result<BudgetGoal> {
        new_goal.validate()?;
        let initial_amount = new_goal.initial_amount;
        let goal = self.repository.insert(new_goal).await?;
        debug!("Created goal {} '{}'", goal.id, goal.name);

        if initial_amount > Decimal::ZERO {
            self.record_transfer(&goal, initial_amount).await?;
        }

        match goal.status() {
            GoalStatus::Achieved => self.finalize_achievement(&goal).await?,
            GoalStatus::Active => self.scheduler.schedule_recurring_reminder(&goal),
        }
        Ok(goal)
    }

    async fn add_funds(&self, goal_id: &str, amount: Decimal) -> Result<BudgetGoal> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount).into());
        }
        let goal = self
            .repository
            .find_by_id(goal_id)
            .await?
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()))?;

        if goal.status() == GoalStatus::Achieved {
            return Err(GoalError::AlreadyAchieved(goal_id.to_string()).into());
        }
        if goal.current_amount + amount > goal.target_amount {
            return Err(GoalError::OverFunding {
                goal_id: goal_id.to_string(),
                amount,
                current: goal.current_amount,
                target: goal.target_amount,
            }
            .into());
        }

        let current_amount = self.repository.add_to_current(goal_id, amount).await?;
        self.record_transfer(&goal, amount).await?;

        let updated = BudgetGoal {
            current_amount,
            ..goal
        };
        match updated.status() {
            GoalStatus::Achieved => self.finalize_achievement(&updated).await?,
            GoalStatus::Active => self.scheduler.update_budget_reminder(&updated),
        }
        Ok(updated)
    }

    async fn get_goal(&self, goal_id: &str) -> Result<BudgetGoal> {
        self.repository
            .find_by_id(goal_id)
            .await?
            .ok_or_else(|| GoalError::NotFound(goal_id.to_string()).into())
    }

    async fn list_goals(&self) -> Result<Vec<BudgetGoal>> {
        self.repository.list().await
    }

    async fn list_completed_goals(&self) -> Result<Vec<BudgetGoal>> {
        let mut goals = self.repository.list().await?;
        goals.retain(|g| g.status() == GoalStatus::Achieved);
        Ok(goals)
    }
}
