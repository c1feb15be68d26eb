pub mod app_state;
pub mod badges;
pub mod categories;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod notifications;
pub mod reminders;
pub mod settings;
pub mod store;
pub mod transactions;
pub mod wallets;

pub use app_state::ServiceContext;
pub use errors::{Error, Result};
