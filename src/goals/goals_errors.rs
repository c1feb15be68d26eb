use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoalError {
    #[error("Goal '{0}' not found")]
    NotFound(String),

    #[error(
        "Adding {amount} would overfund goal '{goal_id}' ({current} of {target} already saved)"
    )]
    OverFunding {
        goal_id: String,
        amount: Decimal,
        current: Decimal,
        target: Decimal,
    },

    #[error("Goal '{0}' is already achieved")]
    AlreadyAchieved(String),
}
