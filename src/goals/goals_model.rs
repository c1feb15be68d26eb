use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Savings target with progressive funding. `currentAmount` only ever
/// grows; once it reaches `targetAmount` the goal is achieved for good.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    /// Epoch millis.
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    pub recurrence: Recurrence,
}

/// Cadence at which the goal's reminder re-fires. Wire names match the
/// variant names.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Recurrence {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    /// Short cadences map onto a periodic scheduling primitive; the rest
    /// are one-shot jobs that re-schedule themselves.
    pub fn period(&self) -> Option<std::time::Duration> {
        match self {
            Recurrence::Daily => Some(std::time::Duration::from_secs(24 * 60 * 60)),
            Recurrence::Weekly => Some(std::time::Duration::from_secs(7 * 24 * 60 * 60)),
            Recurrence::Biweekly | Recurrence::Monthly | Recurrence::Yearly => None,
        }
    }
}

/// Explicit two-state machine; `Achieved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Active,
    Achieved,
}

impl BudgetGoal {
    /// Computed once per read and threaded through, so achievement
    /// semantics cannot diverge between components.
    pub fn status(&self) -> GoalStatus {
        if self.current_amount >= self.target_amount {
            GoalStatus::Achieved
        } else {
            GoalStatus::Active
        }
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Progress in `[0, 1]`; a zero target counts as fully funded.
    pub fn progress_ratio(&self) -> f64 {
        if self.target_amount <= Decimal::ZERO {
            return 1.0;
        }
        (self.current_amount / self.target_amount)
            .to_f64()
            .unwrap_or(0.0)
            .clamp(0.0, 1.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudgetGoal {
    pub name: String,
    pub target_amount: Decimal,
    /// Funded from the linked wallet at creation when non-zero.
    #[serde(default)]
    pub initial_amount: Decimal,
    pub category_id: Option<String>,
    pub wallet_id: Option<String>,
    pub recurrence: Recurrence,
}

impl NewBudgetGoal {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.target_amount));
        }
        if self.initial_amount < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "initial amount cannot be negative".to_string(),
            ));
        }
        if self.initial_amount > self.target_amount {
            return Err(ValidationError::InvalidInput(
                "initial amount cannot exceed the target".to_string(),
            ));
        }
        Ok(())
    }
}
