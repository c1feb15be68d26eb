use std::time::Duration;

/// Category id of the audit transaction written when a goal is funded
/// from a wallet.
pub const BUDGET_TRANSFER_CATEGORY_ID: &str = "budget_transfer";

/// Local hour reminders are pinned to for non-periodic recurrences.
pub const REMINDER_HOUR: u32 = 10;

/// Computed delays shorter than this are pushed back a full day so a
/// reschedule never fires immediately.
pub const MIN_REMINDER_LEAD: Duration = Duration::from_secs(60 * 60);
pub const RESCHEDULE_PUSHBACK: Duration = Duration::from_secs(24 * 60 * 60);

/// Bounded retry for the reminder job's state fetch.
pub const REMINDER_FETCH_MAX_ATTEMPTS: u32 = 3;
pub const REMINDER_RETRY_BASE_DELAY: Duration = Duration::from_secs(2);

pub const DAY_MS: i64 = 86_400_000;
