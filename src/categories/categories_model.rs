use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::BUDGET_TRANSFER_CATEGORY_ID;
use crate::errors::ValidationError;

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub color_hex: String,
    pub icon_name: String,
    /// Expense categories only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_limit: Option<Decimal>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Expense,
    Income,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub color_hex: String,
    pub icon_name: String,
    pub budget_limit: Option<Decimal>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        if self.category_type == CategoryType::Income && self.budget_limit.is_some() {
            return Err(ValidationError::InvalidInput(
                "income categories cannot carry a budget limit".to_string(),
            ));
        }
        if let Some(limit) = self.budget_limit {
            if limit <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount(limit));
            }
        }
        Ok(())
    }
}

impl Category {
    pub fn from_new(id: String, new_category: NewCategory) -> Self {
        Category {
            id,
            name: new_category.name,
            category_type: new_category.category_type,
            color_hex: new_category.color_hex,
            icon_name: new_category.icon_name,
            budget_limit: new_category.budget_limit,
        }
    }
}

/// Built-in category set, seeded once per user. The budget-transfer
/// category backs the audit record written when a goal is funded.
pub(crate) fn default_categories() -> Vec<Category> {
    let entry = |id: &str, name: &str, category_type, color_hex: &str, icon_name: &str| Category {
        id: id.to_string(),
        name: name.to_string(),
        category_type,
        color_hex: color_hex.to_string(),
        icon_name: icon_name.to_string(),
        budget_limit: None,
    };
    vec![
        entry("salary", "Salary", CategoryType::Income, "#4CAF50", "payments"),
        Category {
            budget_limit: Some(dec!(500)),
            ..entry("food_drinks", "Food & Drinks", CategoryType::Expense, "#FF7043", "restaurant")
        },
        entry("transport", "Transport", CategoryType::Expense, "#42A5F5", "directions_bus"),
        entry("shopping", "Shopping", CategoryType::Expense, "#AB47BC", "shopping_bag"),
        entry("bills", "Bills & Utilities", CategoryType::Expense, "#FFCA28", "receipt_long"),
        entry(
            BUDGET_TRANSFER_CATEGORY_ID,
            "Budget Transfer",
            CategoryType::Expense,
            "#26A69A",
            "savings",
        ),
    ]
}
