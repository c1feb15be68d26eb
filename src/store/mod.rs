// Module declarations
pub(crate) mod memory_store;
pub(crate) mod store_traits;

// Re-export the public interface
pub use memory_store::MemoryLedgerStore;
pub use store_traits::{ChangeKind, LedgerStoreTrait, StoreEvent};

/// Path builders for the hierarchical `users/{userId}/...` scheme.
/// Segment and field names are the wire contract.
pub mod paths {
    pub fn wallets(user_id: &str) -> String {
        format!("users/{}/wallets", user_id)
    }

    pub fn wallet(user_id: &str, wallet_id: &str) -> String {
        format!("users/{}/wallets/{}", user_id, wallet_id)
    }

    pub fn categories(user_id: &str) -> String {
        format!("users/{}/categories", user_id)
    }

    pub fn category(user_id: &str, category_id: &str) -> String {
        format!("users/{}/categories/{}", user_id, category_id)
    }

    /// `collection` is `"income"` or `"expenses"`.
    pub fn transactions(user_id: &str, collection: &str) -> String {
        format!("users/{}/transactions/{}", user_id, collection)
    }

    pub fn transaction(user_id: &str, collection: &str, transaction_id: &str) -> String {
        format!("users/{}/transactions/{}/{}", user_id, collection, transaction_id)
    }

    pub fn budget_goals(user_id: &str) -> String {
        format!("users/{}/budgetGoals", user_id)
    }

    pub fn budget_goal(user_id: &str, goal_id: &str) -> String {
        format!("users/{}/budgetGoals/{}", user_id, goal_id)
    }

    pub fn badges(user_id: &str) -> String {
        format!("users/{}/badges", user_id)
    }

    pub fn badge(user_id: &str, badge_id: &str) -> String {
        format!("users/{}/badges/{}", user_id, badge_id)
    }

    pub fn settings(user_id: &str) -> String {
        format!("users/{}/settings/app", user_id)
    }
}
