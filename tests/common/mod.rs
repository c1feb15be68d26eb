use std::sync::{Arc, Mutex};

use pocketbudget_core::badges::Badge;
use pocketbudget_core::goals::BudgetGoal;
use pocketbudget_core::notifications::NotificationDispatcherTrait;
use pocketbudget_core::store::MemoryLedgerStore;
use pocketbudget_core::ServiceContext;

/// Captures every outbound notification so tests can assert on the
/// user-visible side effects of goal and badge flows.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub reminders: Mutex<Vec<(String, String)>>,
    pub achieved: Mutex<Vec<String>>,
    pub badges: Mutex<Vec<String>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl NotificationDispatcherTrait for RecordingDispatcher {
    fn show_budget_reminder_notification(&self, goal: &BudgetGoal, message: &str) {
        self.reminders
            .lock()
            .unwrap()
            .push((goal.id.clone(), message.to_string()));
    }

    fn show_goal_achieved_notification(&self, goal: &BudgetGoal) {
        self.achieved.lock().unwrap().push(goal.id.clone());
    }

    fn show_badge_earned_notification(&self, badge: &Badge) {
        self.badges.lock().unwrap().push(badge.id.clone());
    }

    fn cancel_budget_reminder(&self, goal_id: &str) {
        self.cancelled.lock().unwrap().push(goal_id.to_string());
    }
}

pub async fn test_context() -> (ServiceContext, Arc<RecordingDispatcher>) {
    let store = Arc::new(MemoryLedgerStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let context = ServiceContext::initialize_with_dispatcher(store, "test-user", dispatcher.clone())
        .await
        .expect("context initializes");
    (context, dispatcher)
}
