pub mod notifications_service;
pub mod notifications_traits;

pub use notifications_service::LogNotificationDispatcher;
pub use notifications_traits::NotificationDispatcherTrait;
