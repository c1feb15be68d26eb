use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub balance: Decimal,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub color_hex: String,
    pub icon_name: String,
    pub is_active: bool,
    /// Epoch millis.
    pub created_at: i64,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    Cash,
    Bank,
    Credit,
    Ewallet,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub name: String,
    pub balance: Decimal,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub color_hex: String,
    pub icon_name: String,
}

impl NewWallet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.balance < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "opening balance cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Wallet {
    pub fn from_new(id: String, new_wallet: NewWallet, created_at: i64) -> Self {
        Wallet {
            id,
            name: new_wallet.name,
            balance: new_wallet.balance,
            wallet_type: new_wallet.wallet_type,
            color_hex: new_wallet.color_hex,
            icon_name: new_wallet.icon_name,
            is_active: true,
            created_at,
        }
    }
}

/// Metadata-only update; balances move exclusively through
/// transaction-posting and goal-funding operations.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct WalletUpdate {
    pub name: Option<String>,
    pub color_hex: Option<String>,
    pub icon_name: Option<String>,
    pub is_active: Option<bool>,
}
