use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum BadgeCategory {
    Milestone,
    Savings,
    Speed,
    Streak,
    Special,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Achievement document as stored per user. Every catalog entry exists
/// from the start, unearned; awarding only flips `earned`/`earnedAt`.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
    pub earned: bool,
    /// Epoch millis, set once when earned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earned_at: Option<i64>,
}

/// Static catalog entry.
pub struct BadgeSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: BadgeCategory,
    pub rarity: BadgeRarity,
}

impl BadgeSpec {
    pub fn unearned(&self) -> Badge {
        Badge {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            category: self.category,
            rarity: self.rarity,
            earned: false,
            earned_at: None,
        }
    }
}

pub const FIRST_GOAL: &str = "first_goal";
pub const GOAL_MASTER: &str = "goal_master";
pub const SAVINGS_LEGEND: &str = "savings_legend";
pub const THOUSAND_SAVER: &str = "thousand_saver";
pub const TEN_THOUSAND_SAVER: &str = "ten_thousand_saver";
pub const HUNDRED_THOUSAND_SAVER: &str = "hundred_thousand_saver";
pub const LIGHTNING_SAVER: &str = "lightning_saver";
pub const QUICK_SAVER: &str = "quick_saver";
pub const BIG_DREAMER: &str = "big_dreamer";
pub const PERFECTIONIST: &str = "perfectionist";
pub const CONSISTENT_SAVER: &str = "consistent_saver";
pub const DEDICATION_MASTER: &str = "dedication_master";

pub const BADGE_CATALOG: [BadgeSpec; 12] = [
    BadgeSpec {
        id: FIRST_GOAL,
        name: "First Goal",
        description: "Complete your first budget goal",
        category: BadgeCategory::Milestone,
        rarity: BadgeRarity::Common,
    },
    BadgeSpec {
        id: GOAL_MASTER,
        name: "Goal Master",
        description: "Complete 5 budget goals",
        category: BadgeCategory::Milestone,
        rarity: BadgeRarity::Rare,
    },
    BadgeSpec {
        id: SAVINGS_LEGEND,
        name: "Savings Legend",
        description: "Complete 10 budget goals",
        category: BadgeCategory::Milestone,
        rarity: BadgeRarity::Legendary,
    },
    BadgeSpec {
        id: THOUSAND_SAVER,
        name: "Thousand Saver",
        description: "Save a total of 1,000 across completed goals",
        category: BadgeCategory::Savings,
        rarity: BadgeRarity::Common,
    },
    BadgeSpec {
        id: TEN_THOUSAND_SAVER,
        name: "Ten Thousand Saver",
        description: "Save a total of 10,000 across completed goals",
        category: BadgeCategory::Savings,
        rarity: BadgeRarity::Rare,
    },
    BadgeSpec {
        id: HUNDRED_THOUSAND_SAVER,
        name: "Hundred Thousand Saver",
        description: "Save a total of 100,000 across completed goals",
        category: BadgeCategory::Savings,
        rarity: BadgeRarity::Legendary,
    },
    BadgeSpec {
        id: LIGHTNING_SAVER,
        name: "Lightning Saver",
        description: "Complete a goal within a day of creating it",
        category: BadgeCategory::Speed,
        rarity: BadgeRarity::Epic,
    },
    BadgeSpec {
        id: QUICK_SAVER,
        name: "Quick Saver",
        description: "Complete a goal within a week of creating it",
        category: BadgeCategory::Speed,
        rarity: BadgeRarity::Rare,
    },
    BadgeSpec {
        id: BIG_DREAMER,
        name: "Big Dreamer",
        description: "Complete a goal worth 50,000 or more",
        category: BadgeCategory::Special,
        rarity: BadgeRarity::Epic,
    },
    BadgeSpec {
        id: PERFECTIONIST,
        name: "Perfectionist",
        description: "Land exactly on a goal's target amount",
        category: BadgeCategory::Special,
        rarity: BadgeRarity::Rare,
    },
    BadgeSpec {
        id: CONSISTENT_SAVER,
        name: "Consistent Saver",
        description: "Complete 3 budget goals",
        category: BadgeCategory::Streak,
        rarity: BadgeRarity::Common,
    },
    BadgeSpec {
        id: DEDICATION_MASTER,
        name: "Dedication Master",
        description: "Complete 5 budget goals without giving up",
        category: BadgeCategory::Streak,
        rarity: BadgeRarity::Epic,
    },
];
