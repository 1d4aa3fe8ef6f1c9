use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use fintrack_core::mirror::{SheetConfig, SheetConfigRepositoryTrait, SheetTarget};
use fintrack_core::Result;

use super::model::SheetConfigDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::sheet_configs;

pub struct SheetConfigRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SheetConfigRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SheetConfigRepositoryTrait for SheetConfigRepository {
    fn get(&self, target: SheetTarget) -> Result<SheetConfig> {
        let mut conn = get_connection(&self.pool)?;
        let row = sheet_configs::table
            .find(target.as_str())
            .first::<SheetConfigDB>(&mut conn)
            .map_err(StorageError::from)?;
        SheetConfig::try_from(row)
    }

    fn list(&self) -> Result<Vec<SheetConfig>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = sheet_configs::table
            .order(sheet_configs::target.asc())
            .load::<SheetConfigDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter().map(SheetConfig::try_from).collect()
    }

    async fn upsert(&self, configs: Vec<SheetConfig>) -> Result<Vec<SheetConfig>> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<SheetConfig>> {
                    let mut stored = Vec::with_capacity(configs.len());
                    for config in configs {
                        let row: SheetConfigDB = config.into();
                        let inserted = diesel::insert_into(sheet_configs::table)
                            .values(&row)
                            .on_conflict(sheet_configs::target)
                            .do_update()
                            .set(&row)
                            .returning(SheetConfigDB::as_returning())
                            .get_result::<SheetConfigDB>(conn)
                            .map_err(StorageError::from)?;
                        stored.push(SheetConfig::try_from(inserted)?);
                    }
                    Ok(stored)
                },
            )
            .await
    }
}
