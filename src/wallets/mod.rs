// Module declarations
pub(crate) mod wallets_model;
pub(crate) mod wallets_repository;
pub(crate) mod wallets_service;
pub(crate) mod wallets_traits;

// Re-export the public interface
pub use wallets_model::{NewWallet, Wallet, WalletType, WalletUpdate};
pub use wallets_repository::WalletRepository;
pub use wallets_service::WalletService;
pub use wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
