use std::sync::Arc;

use log::{debug, info};

use crate::badges::Badge;
use crate::goals::BudgetGoal;
use crate::notifications::notifications_traits::NotificationDispatcherTrait;
use crate::settings::SettingsServiceTrait;

/// Default dispatcher: emits notifications to the log. The user's
/// notifications toggle gates every outbound kind; dismissals still go
/// through so no stale reminder lingers after the toggle flips.
pub struct LogNotificationDispatcher {
    settings: Arc<dyn SettingsServiceTrait>,
}

impl LogNotificationDispatcher {
    pub fn new(settings: Arc<dyn SettingsServiceTrait>) -> Self {
        LogNotificationDispatcher { settings }
    }

    fn enabled(&self) -> bool {
        self.settings.snapshot().notifications_enabled
    }
}

impl NotificationDispatcherTrait for LogNotificationDispatcher {
    fn show_budget_reminder_notification(&self, goal: &BudgetGoal, message: &str) {
        if !self.enabled() {
            debug!("Notifications disabled, dropping reminder for {}", goal.id);
            return;
        }
        info!(
            "Reminder for goal '{}' ({} of {}): {}",
            goal.name, goal.current_amount, goal.target_amount, message
        );
    }

    fn show_goal_achieved_notification(&self, goal: &BudgetGoal) {
        if !self.enabled() {
            debug!(
                "Notifications disabled, dropping achievement for {}",
                goal.id
            );
            return;
        }
        info!("Goal achieved: '{}' ({})", goal.name, goal.target_amount);
    }

    fn show_badge_earned_notification(&self, badge: &Badge) {
        if !self.enabled() {
            debug!("Notifications disabled, dropping badge '{}'", badge.id);
            return;
        }
        info!("Badge earned: {} ({:?})", badge.name, badge.rarity);
    }

    fn cancel_budget_reminder(&self, goal_id: &str) {
        info!("Dismissed pending reminder for goal {}", goal_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{
        SettingsRepository, SettingsService, SettingsServiceTrait, SettingsUpdate,
    };
    use crate::store::MemoryLedgerStore;

    #[tokio::test]
    async fn toggle_gates_every_notification_kind() {
        let store = Arc::new(MemoryLedgerStore::new());
        let settings = Arc::new(SettingsService::new(Arc::new(SettingsRepository::new(
            store, "u1",
        ))));
        settings.load_settings().await.unwrap();

        let dispatcher = LogNotificationDispatcher::new(settings.clone());
        assert!(dispatcher.enabled());

        settings
            .update_settings(SettingsUpdate {
                base_currency: None,
                notifications_enabled: Some(false),
            })
            .await
            .unwrap();

        // Reminder, achievement and badge paths all consult the same
        // gate, so flipping the toggle silences all of them.
        assert!(!dispatcher.enabled());
    }
}
