//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// A monthly spending budget for one category. One row per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for setting a category's budget. Setting it again for the
/// same category overwrites the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category_id: String,
    pub amount: Decimal,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        // Zero is a valid budget (spend nothing); negative is not.
        if self.amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "budget amount cannot be negative: {}",
                self.amount
            ))));
        }
        Ok(())
    }
}

/// A budget line in the current-month report: the configured amount next to
/// what has actually been spent in that category this month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetByCategory {
    pub category_id: String,
    pub category_name: String,
    pub amount: Decimal,
    pub spent: Decimal,
}
