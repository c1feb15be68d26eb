use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Immutable posting against a wallet. Creation is always paired with a
/// balance adjustment on the referenced wallet; there is no edit
/// operation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: String,
    pub wallet_id: String,
    /// Epoch millis.
    pub date: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Store collection the record lives under.
    pub fn collection(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expenses",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, TransactionType::Income)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category_id: String,
    pub wallet_id: String,
    /// Defaults to the posting time when absent.
    pub date: Option<i64>,
    pub description: String,
    pub image_data: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.wallet_id.trim().is_empty() {
            return Err(ValidationError::MissingField("walletId".to_string()));
        }
        if self.category_id.trim().is_empty() {
            return Err(ValidationError::MissingField("categoryId".to_string()));
        }
        Ok(())
    }
}
