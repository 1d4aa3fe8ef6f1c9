//! Database row model for sheet mirror configuration.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::errors::{Error, ValidationError};
use fintrack_core::mirror::{SheetConfig, SheetTarget};

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
#[diesel(table_name = crate::schema::sheet_configs)]
#[diesel(primary_key(target))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SheetConfigDB {
    pub target: String,
    pub sheet: String,
    pub a1_range: String,
}

impl TryFrom<SheetConfigDB> for SheetConfig {
    type Error = Error;

    fn try_from(db: SheetConfigDB) -> Result<Self, Error> {
        let target = SheetTarget::from_str(&db.target).map_err(|_| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "stored sheet config has unknown target: {}",
                db.target
            )))
        })?;
        Ok(Self {
            target,
            sheet: db.sheet,
            a1_range: db.a1_range,
        })
    }
}

impl From<SheetConfig> for SheetConfigDB {
    fn from(domain: SheetConfig) -> Self {
        Self {
            target: domain.target.as_str().to_string(),
            sheet: domain.sheet,
            a1_range: domain.a1_range,
        }
    }
}
