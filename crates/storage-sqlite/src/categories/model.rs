//! Database row model for categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::categories::{Category, NewCategory};

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
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_essential: bool,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<CategoryDB> for Category {
    fn from(db: CategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            is_essential: db.is_essential,
            created_at: db.created_at,
        }
    }
}

impl From<NewCategory> for CategoryDB {
    fn from(domain: NewCategory) -> Self {
        Self {
            id: String::new(),
            name: domain.name,
            description: domain.description,
            is_essential: domain.is_essential,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
