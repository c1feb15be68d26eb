use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::{BudgetGoal, Recurrence};

/// Snapshot attached to a scheduled reminder. Display hints only: the
/// job re-reads the goal before firing, so stale numbers here never
/// reach the user.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReminderPayload {
    pub budget_goal_id: String,
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub recurrence: Recurrence,
}

impl ReminderPayload {
    pub fn for_goal(goal: &BudgetGoal) -> Self {
        ReminderPayload {
            budget_goal_id: goal.id.clone(),
            name: goal.name.clone(),
            target: goal.target_amount,
            current: goal.current_amount,
            recurrence: goal.recurrence,
        }
    }
}

/// Coarse progress tiers used to pick the reminder wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBucket {
    Starting,
    Midway,
    AlmostThere,
}

impl ProgressBucket {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.25 {
            ProgressBucket::Starting
        } else if ratio <= 0.75 {
            ProgressBucket::Midway
        } else {
            ProgressBucket::AlmostThere
        }
    }

    pub fn message(&self, goal: &BudgetGoal) -> String {
        match self {
            ProgressBucket::Starting => {
                format!("Time to add funds to '{}'!", goal.name)
            }
            ProgressBucket::Midway => {
                format!("Keep going! '{}' is {} away", goal.name, goal.remaining())
            }
            ProgressBucket::AlmostThere => {
                format!("Almost there! Only {} left for '{}'", goal.remaining(), goal.name)
            }
        }
    }
}

/// What a reminder run tells the schedule loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// Goal is gone or achieved; stop the schedule.
    Completed,
    /// Goal is still active; fire again next cycle.
    Reschedule,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_buckets_cover_the_boundaries() {
        assert_eq!(ProgressBucket::from_ratio(0.0), ProgressBucket::Starting);
        assert_eq!(ProgressBucket::from_ratio(0.24), ProgressBucket::Starting);
        assert_eq!(ProgressBucket::from_ratio(0.25), ProgressBucket::Midway);
        assert_eq!(ProgressBucket::from_ratio(0.75), ProgressBucket::Midway);
        assert_eq!(
            ProgressBucket::from_ratio(0.76),
            ProgressBucket::AlmostThere
        );
        assert_eq!(ProgressBucket::from_ratio(1.0), ProgressBucket::AlmostThere);
    }
}
