//! Yearly goal models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Savings and investment targets for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyGoals {
    pub id: String,
    pub year: i32,
    pub savings_goal: Decimal,
    pub investment_goal: Decimal,
    /// Target amount kept invested at year end.
    pub ideal_investment: Decimal,
    pub created_at: NaiveDateTime,
}

impl YearlyGoals {
    /// The row reported for a year with no stored goals: all targets zero.
    pub fn zeroed(year: i32) -> Self {
        Self {
            id: String::new(),
            year,
            savings_goal: Decimal::ZERO,
            investment_goal: Decimal::ZERO,
            ideal_investment: Decimal::ZERO,
            created_at: NaiveDateTime::default(),
        }
    }
}

/// Input model for setting the goals of one year. Upserts in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewYearlyGoals {
    pub year: i32,
    pub savings_goal: Decimal,
    pub investment_goal: Decimal,
    pub ideal_investment: Decimal,
}

impl NewYearlyGoals {
    pub fn validate(&self) -> Result<()> {
        if self.year < 1970 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "invalid goal year: {}",
                self.year
            ))));
        }
        Ok(())
    }
}
