use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::constants::{REMINDER_FETCH_MAX_ATTEMPTS, REMINDER_RETRY_BASE_DELAY};
use crate::errors::Result;
use crate::goals::{BudgetGoal, GoalRepositoryTrait, GoalStatus};
use crate::notifications::NotificationDispatcherTrait;
use crate::reminders::reminders_model::{JobOutcome, ProgressBucket, ReminderPayload};

/// One reminder firing. Re-reads the goal so the nudge always reflects
/// live progress, and quietly retires itself when the goal no longer
/// needs reminding.
pub struct ReminderJob {
    payload: ReminderPayload,
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    dispatcher: Arc<dyn NotificationDispatcherTrait>,
    retry_base_delay: Duration,
}

impl ReminderJob {
    pub fn new(
        payload: ReminderPayload,
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        dispatcher: Arc<dyn NotificationDispatcherTrait>,
    ) -> Self {
        ReminderJob {
            payload,
            goal_repository,
            dispatcher,
            retry_base_delay: REMINDER_RETRY_BASE_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Bounded retry with exponential backoff for transient store
    /// failures; anything else surfaces immediately.
    async fn fetch_with_retry(&self) -> Result<Option<BudgetGoal>> {
        let mut attempt = 1;
        loop {
            match self
                .goal_repository
                .find_by_id(&self.payload.budget_goal_id)
                .await
            {
                Ok(goal) => return Ok(goal),
                Err(err) if err.is_transient() && attempt < REMINDER_FETCH_MAX_ATTEMPTS => {
                    let backoff = self.retry_base_delay * 2u32.pow(attempt - 1);
                    warn!(
                        "Reminder fetch for goal {} failed (attempt {}), retrying in {:?}: {}",
                        self.payload.budget_goal_id, attempt, backoff, err
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    pub async fn run_once(&self) -> JobOutcome {
        let goal = match self.fetch_with_retry().await {
            Ok(Some(goal)) => goal,
            Ok(None) => {
                // Deleted goal: retire the schedule without a sound.
                debug!(
                    "Goal {} no longer exists, dropping its reminder",
                    self.payload.budget_goal_id
                );
                return JobOutcome::Completed;
            }
            Err(err) => {
                warn!(
                    "Could not refresh goal {} for its reminder: {}",
                    self.payload.budget_goal_id, err
                );
                return JobOutcome::Reschedule;
            }
        };

        match goal.status() {
            GoalStatus::Achieved => {
                // Achieved between scheduling and firing.
                self.dispatcher.show_goal_achieved_notification(&goal);
                self.dispatcher.cancel_budget_reminder(&goal.id);
                JobOutcome::Completed
            }
            GoalStatus::Active => {
                let bucket = ProgressBucket::from_ratio(goal.progress_ratio());
                let message = bucket.message(&goal);
                self.dispatcher
                    .show_budget_reminder_notification(&goal, &message);
                JobOutcome::Reschedule
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Mutex, RwLock};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::badges::Badge;
    use crate::errors::{Error, StoreError};
    use crate::goals::{NewBudgetGoal, Recurrence};

    struct MockGoalRepository {
        goals: RwLock<HashMap<String, BudgetGoal>>,
        transient_failures: AtomicU32,
    }

    impl MockGoalRepository {
        fn new(goal: Option<BudgetGoal>, transient_failures: u32) -> Self {
            let mut goals = HashMap::new();
            if let Some(goal) = goal {
                goals.insert(goal.id.clone(), goal);
            }
            MockGoalRepository {
                goals: RwLock::new(goals),
                transient_failures: AtomicU32::new(transient_failures),
            }
        }
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        async fn find_by_id(&self, goal_id: &str) -> Result<Option<BudgetGoal>> {
            let remaining = self.transient_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.transient_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(Error::Store(StoreError::Transient(
                    "connection reset".to_string(),
                )));
            }
            Ok(self.goals.read().unwrap().get(goal_id).cloned())
        }

        async fn list(&self) -> Result<Vec<BudgetGoal>> {
            unimplemented!()
        }

        async fn insert(&self, _new_goal: NewBudgetGoal) -> Result<BudgetGoal> {
            unimplemented!()
        }

        async fn add_to_current(&self, _goal_id: &str, _amount: Decimal) -> Result<Decimal> {
            unimplemented!()
        }
    }

    #[derive(Default)]
    struct RecordingDispatcher {
        reminders: Mutex<Vec<String>>,
        achieved: Mutex<Vec<String>>,
        cancelled: Mutex<Vec<String>>,
    }

    impl NotificationDispatcherTrait for RecordingDispatcher {
        fn show_budget_reminder_notification(&self, _goal: &BudgetGoal, message: &str) {
            self.reminders.lock().unwrap().push(message.to_string());
        }

        fn show_goal_achieved_notification(&self, goal: &BudgetGoal) {
            self.achieved.lock().unwrap().push(goal.id.clone());
        }

        fn show_badge_earned_notification(&self, _badge: &Badge) {}

        fn cancel_budget_reminder(&self, goal_id: &str) {
            self.cancelled.lock().unwrap().push(goal_id.to_string());
        }
    }

    fn goal(current: Decimal, target: Decimal) -> BudgetGoal {
        BudgetGoal {
            id: "g1".to_string(),
            name: "Trip".to_string(),
            target_amount: target,
            current_amount: current,
            created_at: 0,
            category_id: None,
            wallet_id: None,
            recurrence: Recurrence::Daily,
        }
    }

    fn job(
        goal: Option<BudgetGoal>,
        transient_failures: u32,
    ) -> (ReminderJob, Arc<RecordingDispatcher>) {
        let payload = ReminderPayload {
            budget_goal_id: "g1".to_string(),
            name: "Trip".to_string(),
            target: dec!(1000),
            current: dec!(0),
            recurrence: Recurrence::Daily,
        };
        let repository = Arc::new(MockGoalRepository::new(goal, transient_failures));
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let job = ReminderJob::new(payload, repository, dispatcher.clone())
            .with_retry_base_delay(Duration::from_millis(1));
        (job, dispatcher)
    }

    #[tokio::test]
    async fn active_goal_gets_a_nudge_and_reschedules() {
        let (job, dispatcher) = job(Some(goal(dec!(900), dec!(1000))), 0);

        assert_eq!(job.run_once().await, JobOutcome::Reschedule);

        let reminders = dispatcher.reminders.lock().unwrap();
        assert_eq!(reminders.len(), 1);
        assert!(reminders[0].contains("Almost there"));
    }

    #[tokio::test]
    async fn achieved_goal_completes_and_dismisses_the_reminder() {
        let (job, dispatcher) = job(Some(goal(dec!(1000), dec!(1000))), 0);

        assert_eq!(job.run_once().await, JobOutcome::Completed);
        assert_eq!(dispatcher.achieved.lock().unwrap().as_slice(), ["g1"]);
        assert_eq!(dispatcher.cancelled.lock().unwrap().as_slice(), ["g1"]);
        assert!(dispatcher.reminders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_goal_completes_silently() {
        let (job, dispatcher) = job(None, 0);

        assert_eq!(job.run_once().await, JobOutcome::Completed);
        assert!(dispatcher.reminders.lock().unwrap().is_empty());
        assert!(dispatcher.achieved.lock().unwrap().is_empty());
        assert!(dispatcher.cancelled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let (job, dispatcher) = job(Some(goal(dec!(100), dec!(1000))), 2);

        assert_eq!(job.run_once().await, JobOutcome::Reschedule);
        assert_eq!(dispatcher.reminders.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn exhausted_retries_keep_the_schedule_alive() {
        let (job, dispatcher) = job(Some(goal(dec!(100), dec!(1000))), 10);

        assert_eq!(job.run_once().await, JobOutcome::Reschedule);
        assert!(dispatcher.reminders.lock().unwrap().is_empty());
    }
}
