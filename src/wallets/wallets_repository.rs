use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{Result, StoreError};
use crate::store::{paths, LedgerStoreTrait};
use crate::wallets::wallets_model::{NewWallet, Wallet, WalletUpdate};
use crate::wallets::wallets_traits::WalletRepositoryTrait;

pub struct WalletRepository {
    store: Arc<dyn LedgerStoreTrait>,
    user_id: String,
}

impl WalletRepository {
    pub fn new(store: Arc<dyn LedgerStoreTrait>, user_id: impl Into<String>) -> Self {
        WalletRepository {
            store,
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    async fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
        let path = paths::wallet(&self.user_id, wallet_id);
        let document = self
            .store
            .get(&path)
            .await?
            .ok_or(StoreError::NotFound(path))?;
        Ok(serde_json::from_value(document)?)
    }

    async fn list(&self, is_active_filter: Option<bool>) -> Result<Vec<Wallet>> {
        let children = self.store.list(&paths::wallets(&self.user_id)).await?;
        let mut wallets = Vec::with_capacity(children.len());
        for (_, document) in children {
            let wallet: Wallet = serde_json::from_value(document)?;
            if is_active_filter.map_or(true, |active| wallet.is_active == active) {
                wallets.push(wallet);
            }
        }
        Ok(wallets)
    }

    async fn insert(&self, new_wallet: NewWallet) -> Result<Wallet> {
        let id = Uuid::new_v4().to_string();
        let wallet = Wallet::from_new(id.clone(), new_wallet, Utc::now().timestamp_millis());
        let path = paths::wallet(&self.user_id, &id);
        self.store.put(&path, serde_json::to_value(&wallet)?).await?;
        Ok(wallet)
    }

    async fn update(&self, wallet_id: &str, update: WalletUpdate) -> Result<Wallet> {
        let mut fields = Map::new();
        if let Some(name) = update.name {
            fields.insert("name".to_string(), Value::String(name));
        }
        if let Some(color_hex) = update.color_hex {
            fields.insert("colorHex".to_string(), Value::String(color_hex));
        }
        if let Some(icon_name) = update.icon_name {
            fields.insert("iconName".to_string(), Value::String(icon_name));
        }
        if let Some(is_active) = update.is_active {
            fields.insert("isActive".to_string(), Value::Bool(is_active));
        }
        if !fields.is_empty() {
            self.store
                .update_fields(&paths::wallet(&self.user_id, wallet_id), fields)
                .await?;
        }
        self.get_by_id(wallet_id).await
    }

    async fn adjust_balance(&self, wallet_id: &str, delta: Decimal) -> Result<Decimal> {
        self.store
            .adjust_amount(&paths::wallet(&self.user_id, wallet_id), "balance", delta, true)
            .await
    }
}
