use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionType};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};
use crate::wallets::WalletServiceTrait;

/// Service for posting and querying transactions. Posting adjusts the
/// referenced wallet's balance through the wallet service.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    wallet_service: Arc<dyn WalletServiceTrait>,
}

impl TransactionService {
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        wallet_service: Arc<dyn WalletServiceTrait>,
    ) -> Self {
        TransactionService {
            repository,
            wallet_service,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        new_transaction.validate()?;
        let transaction = self.repository.insert(new_transaction).await?;
        self.wallet_service
            .apply_transaction(
                &transaction.wallet_id,
                transaction.amount,
                transaction.transaction_type.is_income(),
            )
            .await?;
        debug!(
            "Posted {} transaction {} of {} against wallet {}",
            transaction.transaction_type.collection(),
            transaction.id,
            transaction.amount,
            transaction.wallet_id
        );
        Ok(transaction)
    }

    async fn get_transaction(
        &self,
        transaction_type: TransactionType,
        transaction_id: &str,
    ) -> Result<Transaction> {
        self.repository
            .get_by_id(transaction_type, transaction_id)
            .await
    }

    async fn list_transactions(
        &self,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<Transaction>> {
        let mut transactions = self.repository.list(transaction_type).await?;
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    async fn list_transactions_between(
        &self,
        transaction_type: Option<TransactionType>,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Transaction>> {
        let mut transactions = self.repository.list(transaction_type).await?;
        transactions.retain(|t| t.date >= start_ms && t.date < end_ms);
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    async fn list_wallet_transactions(&self, wallet_id: &str) -> Result<Vec<Transaction>> {
        let mut transactions = self.repository.list(None).await?;
        transactions.retain(|t| t.wallet_id == wallet_id);
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }
}
