pub mod badges_model;
pub mod badges_repository;
pub mod badges_service;
pub mod badges_traits;

pub use badges_model::{Badge, BadgeCategory, BadgeRarity, BadgeSpec, BADGE_CATALOG};
pub use badges_repository::BadgeRepository;
pub use badges_service::BadgeService;
pub use badges_traits::{BadgeRepositoryTrait, BadgeServiceTrait};
