//! Database row model for yearly goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::goals::{NewYearlyGoals, YearlyGoals};

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
#[diesel(table_name = crate::schema::yearly_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct YearlyGoalsDB {
    pub id: String,
    pub year: i32,
    pub savings_goal: String,
    pub investment_goal: String,
    pub ideal_investment: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<YearlyGoalsDB> for YearlyGoals {
    fn from(db: YearlyGoalsDB) -> Self {
        Self {
            id: db.id,
            year: db.year,
            savings_goal: parse_decimal_tolerant(&db.savings_goal, "savings goal"),
            investment_goal: parse_decimal_tolerant(&db.investment_goal, "investment goal"),
            ideal_investment: parse_decimal_tolerant(&db.ideal_investment, "ideal investment"),
            created_at: db.created_at,
        }
    }
}

impl From<NewYearlyGoals> for YearlyGoalsDB {
    fn from(domain: NewYearlyGoals) -> Self {
        Self {
            id: String::new(),
            year: domain.year,
            savings_goal: domain.savings_goal.to_string(),
            investment_goal: domain.investment_goal.to_string(),
            ideal_investment: domain.ideal_investment.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
