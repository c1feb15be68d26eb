use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::{Result, StoreError};
use crate::store::{paths, LedgerStoreTrait};
use crate::transactions::transactions_model::{NewTransaction, Transaction, TransactionType};
use crate::transactions::transactions_traits::TransactionRepositoryTrait;

pub struct TransactionRepository {
    store: Arc<dyn LedgerStoreTrait>,
    user_id: String,
}

impl TransactionRepository {
    pub fn new(store: Arc<dyn LedgerStoreTrait>, user_id: impl Into<String>) -> Self {
        TransactionRepository {
            store,
            user_id: user_id.into(),
        }
    }

    async fn list_collection(&self, transaction_type: TransactionType) -> Result<Vec<Transaction>> {
        let prefix = paths::transactions(&self.user_id, transaction_type.collection());
        let children = self.store.list(&prefix).await?;
        let mut transactions = Vec::with_capacity(children.len());
        for (_, document) in children {
            transactions.push(serde_json::from_value(document)?);
        }
        Ok(transactions)
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    async fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction> {
        let mut transaction = Transaction {
            id: String::new(),
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type,
            category_id: new_transaction.category_id,
            wallet_id: new_transaction.wallet_id,
            date: new_transaction
                .date
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
            description: new_transaction.description,
            image_data: new_transaction.image_data,
        };
        let prefix = paths::transactions(&self.user_id, transaction.transaction_type.collection());
        // The store assigns the unique key and writes it into the record.
        transaction.id = self
            .store
            .push(&prefix, serde_json::to_value(&transaction)?)
            .await?;
        Ok(transaction)
    }

    async fn get_by_id(
        &self,
        transaction_type: TransactionType,
        transaction_id: &str,
    ) -> Result<Transaction> {
        let path = paths::transaction(
            &self.user_id,
            transaction_type.collection(),
            transaction_id,
        );
        let document = self
            .store
            .get(&path)
            .await?
            .ok_or(StoreError::NotFound(path))?;
        Ok(serde_json::from_value(document)?)
    }

    async fn list(&self, transaction_type: Option<TransactionType>) -> Result<Vec<Transaction>> {
        match transaction_type {
            Some(kind) => self.list_collection(kind).await,
            None => {
                let mut all = self.list_collection(TransactionType::Income).await?;
                all.extend(self.list_collection(TransactionType::Expense).await?);
                Ok(all)
            }
        }
    }
}
