// Module declarations
pub(crate) mod goals_errors;
pub(crate) mod goals_model;
pub(crate) mod goals_repository;
pub(crate) mod goals_service;
pub(crate) mod goals_traits;

// Re-export the public interface
pub use goals_errors::GoalError;
pub use goals_model::{BudgetGoal, GoalStatus, NewBudgetGoal, Recurrence};
pub use goals_repository::GoalRepository;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
