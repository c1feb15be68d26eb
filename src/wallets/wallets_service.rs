use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::wallets::wallets_model::{NewWallet, Wallet, WalletUpdate};
use crate::wallets::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};

/// Service for managing wallets and their running balances.
pub struct WalletService {
    repository: Arc<dyn WalletRepositoryTrait>,
}

impl WalletService {
    pub fn new(repository: Arc<dyn WalletRepositoryTrait>) -> Self {
        WalletService { repository }
    }
}

#[async_trait]
impl WalletServiceTrait for WalletService {
    async fn create_wallet(&self, new_wallet: NewWallet) -> Result<Wallet> {
        new_wallet.validate()?;
        debug!("Creating wallet '{}'", new_wallet.name);
        self.repository.insert(new_wallet).await
    }

    async fn get_wallet(&self, wallet_id: &str) -> Result<Wallet> {
        self.repository.get_by_id(wallet_id).await
    }

    async fn list_wallets(&self, is_active_filter: Option<bool>) -> Result<Vec<Wallet>> {
        self.repository.list(is_active_filter).await
    }

    async fn update_wallet(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet> {
        self.repository.update(wallet_id, update).await
    }

    async fn apply_transaction(
        &self,
        wallet_id: &str,
        amount: Decimal,
        is_income: bool,
    ) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount).into());
        }
        let delta = if is_income { amount } else { -amount };
        let balance = self.repository.adjust_balance(wallet_id, delta).await?;
        debug!("Wallet {} balance is now {}", wallet_id, balance);
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::store::MemoryLedgerStore;
    use crate::wallets::wallets_model::WalletType;
    use crate::wallets::WalletRepository;

    fn test_service() -> WalletService {
        let store = Arc::new(MemoryLedgerStore::new());
        WalletService::new(Arc::new(WalletRepository::new(store, "u1")))
    }

    fn cash_wallet(name: &str, balance: Decimal) -> NewWallet {
        NewWallet {
            name: name.to_string(),
            balance,
            wallet_type: WalletType::Cash,
            color_hex: "#4CAF50".to_string(),
            icon_name: "wallet".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_fetch_wallet() {
        let service = test_service();
        let wallet = service
            .create_wallet(cash_wallet("Groceries", dec!(25)))
            .await
            .unwrap();

        let fetched = service.get_wallet(&wallet.id).await.unwrap();
        assert_eq!(fetched, wallet);
        assert!(fetched.is_active);
        assert_eq!(fetched.balance, dec!(25));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let service = test_service();
        let result = service.create_wallet(cash_wallet("  ", dec!(0))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn apply_transaction_moves_balance_both_ways() {
        let service = test_service();
        let wallet = service
            .create_wallet(cash_wallet("Main", dec!(100)))
            .await
            .unwrap();

        let after_income = service
            .apply_transaction(&wallet.id, dec!(40), true)
            .await
            .unwrap();
        assert_eq!(after_income, dec!(140));

        let after_expense = service
            .apply_transaction(&wallet.id, dec!(90), false)
            .await
            .unwrap();
        assert_eq!(after_expense, dec!(50));
    }

    #[tokio::test]
    async fn over_debit_clamps_to_zero() {
        let service = test_service();
        let wallet = service
            .create_wallet(cash_wallet("Small", dec!(30)))
            .await
            .unwrap();

        let balance = service
            .apply_transaction(&wallet.id, dec!(75), false)
            .await
            .unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[tokio::test]
    async fn zero_amount_is_rejected() {
        let service = test_service();
        let wallet = service
            .create_wallet(cash_wallet("Main", dec!(10)))
            .await
            .unwrap();
        assert!(service
            .apply_transaction(&wallet.id, Decimal::ZERO, true)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_touches_metadata_only() {
        let service = test_service();
        let wallet = service
            .create_wallet(cash_wallet("Main", dec!(10)))
            .await
            .unwrap();

        let updated = service
            .update_wallet(
                &wallet.id,
                WalletUpdate {
                    name: Some("Renamed".to_string()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert!(!updated.is_active);
        assert_eq!(updated.balance, dec!(10));

        let active = service.list_wallets(Some(true)).await.unwrap();
        assert!(active.is_empty());
    }
}
