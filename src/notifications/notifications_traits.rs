use crate::badges::Badge;
use crate::goals::BudgetGoal;

/// Outbound notification seam. Methods are fire-and-forget so reminder
/// jobs and goal updates never block on presentation concerns; hosts
/// plug in their own delivery channel here.
pub trait NotificationDispatcherTrait: Send + Sync {
    fn show_budget_reminder_notification(&self, goal: &BudgetGoal, message: &str);
    fn show_goal_achieved_notification(&self, goal: &BudgetGoal);
    fn show_badge_earned_notification(&self, badge: &Badge);
    /// Drops any delivered-but-pending reminder for the goal.
    fn cancel_budget_reminder(&self, goal_id: &str);
}
