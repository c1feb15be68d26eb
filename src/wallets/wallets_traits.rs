use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::wallets::wallets_model::{NewWallet, Wallet, WalletUpdate};

/// Trait for wallet repository operations
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, wallet_id: &str) -> Result<Wallet>;
    async fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Wallet>>;
    async fn insert(&self, new_wallet: NewWallet) -> Result<Wallet>;
    async fn update(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet>;
    /// Atomic balance adjustment, clamped at zero on the debit side.
    async fn adjust_balance(&self, wallet_id: &str, delta: Decimal) -> Result<Decimal>;
}

/// Trait for wallet service operations
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    async fn create_wallet(&self, new_wallet: NewWallet) -> Result<Wallet>;
    async fn get_wallet(&self, wallet_id: &str) -> Result<Wallet>;
    async fn list_wallets(&self, is_active_filter: Option<bool>) -> Result<Vec<Wallet>>;
    async fn update_wallet(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet>;
    /// Applies a transaction's effect to the wallet's running balance and
    /// returns the new balance.
    async fn apply_transaction(
        &self,
        wallet_id: &str,
        amount: Decimal,
        is_income: bool,
    ) -> Result<Decimal>;
}
