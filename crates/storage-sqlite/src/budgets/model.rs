//! Database row model for per-category budgets.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::budgets::{Budget, NewBudget};

use crate::utils::parse_decimal_tolerant;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::budgets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BudgetDB {
    pub id: String,
    pub category_id: String,
    pub amount: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<BudgetDB> for Budget {
    fn from(db: BudgetDB) -> Self {
        Self {
            id: db.id,
            category_id: db.category_id,
            amount: parse_decimal_tolerant(&db.amount, "budget amount"),
            created_at: db.created_at,
        }
    }
}

impl From<NewBudget> for BudgetDB {
    fn from(domain: NewBudget) -> Self {
        Self {
            id: String::new(),
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
