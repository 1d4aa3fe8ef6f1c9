//! Database row model for debtors.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::debtors::{Debtor, NewDebtor};

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
#[diesel(table_name = crate::schema::debtors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DebtorDB {
    pub id: String,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub description: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<DebtorDB> for Debtor {
    fn from(db: DebtorDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            first_name: db.first_name,
            last_name: db.last_name,
            description: db.description,
            created_at: db.created_at,
        }
    }
}

impl From<NewDebtor> for DebtorDB {
    fn from(domain: NewDebtor) -> Self {
        Self {
            id: String::new(),
            name: domain.name,
            first_name: domain.first_name,
            last_name: domain.last_name,
            description: domain.description,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
