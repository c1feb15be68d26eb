pub mod reminders_job;
pub mod reminders_model;
pub mod reminders_scheduler;
pub mod reminders_traits;

pub use reminders_job::ReminderJob;
pub use reminders_model::{JobOutcome, ProgressBucket, ReminderPayload};
pub use reminders_scheduler::{next_fire_delay, next_occurrence, ReminderScheduler};
pub use reminders_traits::ReminderSchedulerTrait;
