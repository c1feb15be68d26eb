use std::sync::Arc;

use log::info;

use crate::badges::{BadgeRepository, BadgeService, BadgeServiceTrait};
use crate::categories::{CategoryRepository, CategoryService, CategoryServiceTrait};
use crate::errors::Result;
use crate::goals::{GoalRepository, GoalRepositoryTrait, GoalService, GoalServiceTrait, GoalStatus};
use crate::notifications::{LogNotificationDispatcher, NotificationDispatcherTrait};
use crate::reminders::{ReminderScheduler, ReminderSchedulerTrait};
use crate::settings::{SettingsRepository, SettingsService, SettingsServiceTrait};
use crate::store::LedgerStoreTrait;
use crate::transactions::{TransactionRepository, TransactionService, TransactionServiceTrait};
use crate::wallets::{WalletRepository, WalletService, WalletServiceTrait};

/// Shared, initialized service graph for one signed-in user. Built once
/// at startup; everything hangs off the same store handle.
pub struct ServiceContext {
    pub user_id: String,
    pub store: Arc<dyn LedgerStoreTrait>,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub wallet_service: Arc<dyn WalletServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub badge_service: Arc<dyn BadgeServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub reminder_scheduler: Arc<ReminderScheduler>,
}

impl ServiceContext {
    /// Wires the default dispatcher, seeds baseline documents and
    /// re-arms reminders for goals that are still active.
    pub async fn initialize(store: Arc<dyn LedgerStoreTrait>, user_id: &str) -> Result<Self> {
        Self::build(store, user_id, None).await
    }

    /// Same wiring with a caller-supplied notification channel.
    pub async fn initialize_with_dispatcher(
        store: Arc<dyn LedgerStoreTrait>,
        user_id: &str,
        dispatcher: Arc<dyn NotificationDispatcherTrait>,
    ) -> Result<Self> {
        Self::build(store, user_id, Some(dispatcher)).await
    }

    async fn build(
        store: Arc<dyn LedgerStoreTrait>,
        user_id: &str,
        dispatcher: Option<Arc<dyn NotificationDispatcherTrait>>,
    ) -> Result<Self> {
        info!("Initializing services for user {}", user_id);

        let settings_service: Arc<SettingsService> = Arc::new(SettingsService::new(Arc::new(
            SettingsRepository::new(Arc::clone(&store), user_id),
        )));
        settings_service.load_settings().await?;
        let settings_service: Arc<dyn SettingsServiceTrait> = settings_service;

        let dispatcher: Arc<dyn NotificationDispatcherTrait> = match dispatcher {
            Some(dispatcher) => dispatcher,
            None => Arc::new(LogNotificationDispatcher::new(Arc::clone(
                &settings_service,
            ))),
        };

        let wallet_service: Arc<dyn WalletServiceTrait> = Arc::new(WalletService::new(Arc::new(
            WalletRepository::new(Arc::clone(&store), user_id),
        )));

        let category_service: Arc<dyn CategoryServiceTrait> = Arc::new(CategoryService::new(
            Arc::new(CategoryRepository::new(Arc::clone(&store), user_id)),
        ));
        category_service.seed_defaults().await?;

        let transaction_service: Arc<dyn TransactionServiceTrait> =
            Arc::new(TransactionService::new(
                Arc::new(TransactionRepository::new(Arc::clone(&store), user_id)),
                Arc::clone(&wallet_service),
            ));

        let goal_repository: Arc<dyn GoalRepositoryTrait> =
            Arc::new(GoalRepository::new(Arc::clone(&store), user_id));

        let badge_service: Arc<dyn BadgeServiceTrait> = Arc::new(BadgeService::new(
            Arc::new(BadgeRepository::new(Arc::clone(&store), user_id)),
            Arc::clone(&goal_repository),
        ));
        badge_service.seed_badges().await?;

        let reminder_scheduler = Arc::new(ReminderScheduler::new(
            Arc::clone(&goal_repository),
            Arc::clone(&dispatcher),
        ));

        let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(
            Arc::clone(&goal_repository),
            Arc::clone(&transaction_service),
            Arc::clone(&badge_service),
            Arc::clone(&reminder_scheduler) as Arc<dyn ReminderSchedulerTrait>,
            Arc::clone(&dispatcher),
        ));

        // Schedules live in-process, so a restart has to re-arm them
        // from the stored goals.
        for goal in goal_repository.list().await? {
            if goal.status() == GoalStatus::Active {
                reminder_scheduler.schedule_recurring_reminder(&goal);
            }
        }

        Ok(ServiceContext {
            user_id: user_id.to_string(),
            store,
            settings_service,
            wallet_service,
            category_service,
            transaction_service,
            badge_service,
            goal_service,
            reminder_scheduler,
        })
    }
}
