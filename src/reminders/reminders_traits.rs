use crate::goals::BudgetGoal;

/// Trait for reminder scheduling operations. Methods are synchronous;
/// implementations hand the actual waiting off to background tasks.
pub trait ReminderSchedulerTrait: Send + Sync {
    /// Starts (or restarts) the recurring reminder for a goal.
    fn schedule_recurring_reminder(&self, goal: &BudgetGoal);
    /// Refreshes the reminder after a progress change.
    fn update_budget_reminder(&self, goal: &BudgetGoal);
    /// Stops the reminder. Idempotent; unknown ids are ignored.
    fn cancel_budget_reminder(&self, goal_id: &str);
}
