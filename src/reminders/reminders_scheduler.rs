use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use dashmap::DashMap;
use log::debug;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::constants::{MIN_REMINDER_LEAD, REMINDER_HOUR, RESCHEDULE_PUSHBACK};
use crate::goals::{BudgetGoal, GoalRepositoryTrait, GoalStatus, Recurrence};
use crate::notifications::NotificationDispatcherTrait;
use crate::reminders::reminders_job::ReminderJob;
use crate::reminders::reminders_model::{JobOutcome, ReminderPayload};
use crate::reminders::reminders_traits::ReminderSchedulerTrait;

/// Next calendar firing for the one-shot cadences, pinned to the
/// reminder hour in local time. `None` for the periodic cadences and
/// for datetimes the local timezone cannot represent.
pub fn next_occurrence(recurrence: Recurrence, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let date = match recurrence {
        Recurrence::Daily | Recurrence::Weekly => return None,
        Recurrence::Biweekly => (now + chrono::Duration::days(14)).date_naive(),
        Recurrence::Monthly => {
            let (year, month) = if now.month() == 12 {
                (now.year() + 1, 1)
            } else {
                (now.year(), now.month() + 1)
            };
            NaiveDate::from_ymd_opt(year, month, 1)?
        }
        Recurrence::Yearly => NaiveDate::from_ymd_opt(now.year() + 1, 1, 1)?,
    };
    date.and_hms_opt(REMINDER_HOUR, 0, 0)?
        .and_local_timezone(Local)
        .earliest()
}

/// Too-short leads get pushed back a day so a reschedule never fires
/// right on the heels of the event that caused it.
fn clamp_lead(delay: Duration) -> Duration {
    if delay < MIN_REMINDER_LEAD {
        delay + RESCHEDULE_PUSHBACK
    } else {
        delay
    }
}

pub fn next_fire_delay(recurrence: Recurrence, now: DateTime<Local>) -> Duration {
    let target = match next_occurrence(recurrence, now) {
        Some(target) => target,
        None => return RESCHEDULE_PUSHBACK,
    };
    let delay = (target - now).to_std().unwrap_or(Duration::ZERO);
    clamp_lead(delay)
}

struct ScheduledJob {
    /// Distinguishes this schedule from any later one under the same
    /// goal id, so a completing task only retires its own entry.
    epoch: u64,
    handle: JoinHandle<()>,
}

/// In-process reminder registry: one background task per goal, keyed by
/// goal id. Rescheduling replaces the task; cancelling aborts it; a task
/// that runs to completion removes its own entry.
pub struct ReminderScheduler {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    dispatcher: Arc<dyn NotificationDispatcherTrait>,
    jobs: Arc<DashMap<String, ScheduledJob>>,
    next_epoch: AtomicU64,
}

impl ReminderScheduler {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        dispatcher: Arc<dyn NotificationDispatcherTrait>,
    ) -> Self {
        ReminderScheduler {
            goal_repository,
            dispatcher,
            jobs: Arc::new(DashMap::new()),
            next_epoch: AtomicU64::new(0),
        }
    }

    /// Whether a live schedule exists for the goal.
    pub fn has_pending(&self, goal_id: &str) -> bool {
        self.jobs
            .get(goal_id)
            .map(|job| !job.handle.is_finished())
            .unwrap_or(false)
    }
}

fn reminder_interval(period: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(period);
    // A process resumed after missing several periods sends one
    // reminder, not a burst of catch-up fires.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn run_schedule(job: ReminderJob, recurrence: Recurrence) {
    match recurrence.period() {
        Some(period) => {
            let mut interval = reminder_interval(period);
            // The first tick of an interval resolves immediately;
            // consume it so the reminder waits a full period.
            interval.tick().await;
            loop {
                interval.tick().await;
                if job.run_once().await == JobOutcome::Completed {
                    break;
                }
            }
        }
        None => loop {
            let delay = next_fire_delay(recurrence, Local::now());
            tokio::time::sleep(delay).await;
            if job.run_once().await == JobOutcome::Completed {
                break;
            }
        },
    }
}

impl ReminderSchedulerTrait for ReminderScheduler {
    fn schedule_recurring_reminder(&self, goal: &BudgetGoal) {
        // Achieved goals have nothing left to remind about.
        if goal.status() == GoalStatus::Achieved {
            self.cancel_budget_reminder(&goal.id);
            return;
        }
        let job = ReminderJob::new(
            ReminderPayload::for_goal(goal),
            Arc::clone(&self.goal_repository),
            Arc::clone(&self.dispatcher),
        );
        debug!(
            "Scheduling {:?} reminder for goal {}",
            goal.recurrence, goal.id
        );
        let epoch = self.next_epoch.fetch_add(1, Ordering::Relaxed);
        let registry = Arc::downgrade(&self.jobs);
        let goal_id = goal.id.clone();
        let recurrence = goal.recurrence;
        let handle = tokio::spawn(async move {
            run_schedule(job, recurrence).await;
            // Retire this entry unless a newer schedule replaced it.
            if let Some(jobs) = registry.upgrade() {
                jobs.remove_if(&goal_id, |_, job| job.epoch == epoch);
            }
        });
        if let Some(previous) = self
            .jobs
            .insert(goal.id.clone(), ScheduledJob { epoch, handle })
        {
            previous.handle.abort();
        }
    }

    fn update_budget_reminder(&self, goal: &BudgetGoal) {
        // Restart with a fresh payload snapshot.
        self.schedule_recurring_reminder(goal);
    }

    fn cancel_budget_reminder(&self, goal_id: &str) {
        if let Some((_, job)) = self.jobs.remove(goal_id) {
            debug!("Cancelling reminder for goal {}", goal_id);
            job.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::badges::Badge;
    use crate::errors::Result;
    use crate::goals::NewBudgetGoal;

    #[test]
    fn monthly_fires_on_the_first_of_next_month() {
        let now = Local.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let target = next_occurrence(Recurrence::Monthly, now).unwrap();
        assert_eq!(
            target,
            Local.with_ymd_and_hms(2024, 4, 1, 10, 0, 0).unwrap()
        );

        let delay = next_fire_delay(Recurrence::Monthly, now);
        assert_eq!(delay, (target - now).to_std().unwrap());
    }

    #[test]
    fn december_rolls_over_the_year() {
        let now = Local.with_ymd_and_hms(2024, 12, 20, 12, 0, 0).unwrap();
        let target = next_occurrence(Recurrence::Monthly, now).unwrap();
        assert_eq!(
            target,
            Local.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn yearly_fires_next_january_first() {
        let now = Local.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let target = next_occurrence(Recurrence::Yearly, now).unwrap();
        assert_eq!(
            target,
            Local.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn biweekly_lands_fourteen_days_out_at_the_reminder_hour() {
        let now = Local.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap();
        let target = next_occurrence(Recurrence::Biweekly, now).unwrap();
        assert_eq!(
            target,
            Local.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn periodic_cadences_have_no_calendar_occurrence() {
        let now = Local.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert!(next_occurrence(Recurrence::Daily, now).is_none());
        assert!(next_occurrence(Recurrence::Weekly, now).is_none());
    }

    #[test]
    fn missed_interval_ticks_are_delayed_not_burst() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let _guard = runtime.enter();
        let interval = reminder_interval(Duration::from_secs(24 * 60 * 60));
        assert_eq!(
            interval.missed_tick_behavior(),
            MissedTickBehavior::Delay
        );
    }

    #[test]
    fn short_leads_are_pushed_back_a_day() {
        let lead = Duration::from_secs(10 * 60);
        assert_eq!(clamp_lead(lead), lead + RESCHEDULE_PUSHBACK);

        let comfortable = Duration::from_secs(3 * 60 * 60);
        assert_eq!(clamp_lead(comfortable), comfortable);
    }

    struct EmptyGoalRepository;

    #[async_trait]
    impl GoalRepositoryTrait for EmptyGoalRepository {
        async fn find_by_id(&self, _goal_id: &str) -> Result<Option<BudgetGoal>> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<BudgetGoal>> {
            Ok(Vec::new())
        }

        async fn insert(&self, _new_goal: NewBudgetGoal) -> Result<BudgetGoal> {
            unimplemented!()
        }

        async fn add_to_current(&self, _goal_id: &str, _amount: Decimal) -> Result<Decimal> {
            unimplemented!()
        }
    }

    struct SilentDispatcher;

    impl NotificationDispatcherTrait for SilentDispatcher {
        fn show_budget_reminder_notification(&self, _goal: &BudgetGoal, _message: &str) {}
        fn show_goal_achieved_notification(&self, _goal: &BudgetGoal) {}
        fn show_badge_earned_notification(&self, _badge: &Badge) {}
        fn cancel_budget_reminder(&self, _goal_id: &str) {}
    }

    fn daily_goal() -> BudgetGoal {
        BudgetGoal {
            id: "g1".to_string(),
            name: "Trip".to_string(),
            target_amount: dec!(1000),
            current_amount: dec!(100),
            created_at: 0,
            category_id: None,
            wallet_id: None,
            recurrence: Recurrence::Daily,
        }
    }

    #[tokio::test]
    async fn scheduling_registers_a_pending_job() {
        let scheduler =
            ReminderScheduler::new(Arc::new(EmptyGoalRepository), Arc::new(SilentDispatcher));
        scheduler.schedule_recurring_reminder(&daily_goal());
        assert!(scheduler.has_pending("g1"));
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let scheduler =
            ReminderScheduler::new(Arc::new(EmptyGoalRepository), Arc::new(SilentDispatcher));
        scheduler.schedule_recurring_reminder(&daily_goal());

        scheduler.cancel_budget_reminder("g1");
        assert!(!scheduler.has_pending("g1"));

        // Unknown and already-cancelled ids are fine.
        scheduler.cancel_budget_reminder("g1");
        scheduler.cancel_budget_reminder("never-existed");
    }

    #[tokio::test]
    async fn achieved_goals_are_never_scheduled() {
        let scheduler =
            ReminderScheduler::new(Arc::new(EmptyGoalRepository), Arc::new(SilentDispatcher));
        let mut goal = daily_goal();
        goal.current_amount = goal.target_amount;

        scheduler.schedule_recurring_reminder(&goal);
        assert!(!scheduler.has_pending("g1"));
    }

    #[tokio::test(start_paused = true)]
    async fn completed_jobs_retire_their_registry_entry() {
        let scheduler =
            ReminderScheduler::new(Arc::new(EmptyGoalRepository), Arc::new(SilentDispatcher));
        scheduler.schedule_recurring_reminder(&daily_goal());
        assert!(scheduler.has_pending("g1"));

        // First firing finds the goal gone and the task runs to
        // completion, taking its map entry with it.
        tokio::time::sleep(Duration::from_secs(25 * 60 * 60)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(!scheduler.has_pending("g1"));
        assert!(scheduler.jobs.is_empty());
    }

    #[tokio::test]
    async fn rescheduling_replaces_the_previous_job() {
        let scheduler =
            ReminderScheduler::new(Arc::new(EmptyGoalRepository), Arc::new(SilentDispatcher));
        let goal = daily_goal();
        scheduler.schedule_recurring_reminder(&goal);
        scheduler.update_budget_reminder(&goal);

        assert!(scheduler.has_pending("g1"));
        assert_eq!(scheduler.jobs.len(), 1);
    }
}
