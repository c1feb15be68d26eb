use async_trait::async_trait;

use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionType};

/// Trait for transaction repository operations
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn get_by_id(
        &self,
        transaction_type: TransactionType,
        transaction_id: &str,
    ) -> Result<Transaction>;
    /// All postings of one type, or of both when `None`.
    async fn list(&self, transaction_type: Option<TransactionType>) -> Result<Vec<Transaction>>;
}

/// Trait for transaction service operations
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Posts the record and applies its effect to the wallet balance.
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction>;
    async fn get_transaction(
        &self,
        transaction_type: TransactionType,
        transaction_id: &str,
    ) -> Result<Transaction>;
    async fn list_transactions(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<Transaction>>;
    /// Postings within `[start_ms, end_ms)`, newest first.
    async fn list_transactions_between(
        &self,
        transaction_type: Option<TransactionType>,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Transaction>>;
    async fn list_wallet_transactions(&self, wallet_id: &str) -> Result<Vec<Transaction>>;
}
