use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::OptionalExtension;
use diesel::SqliteConnection;
use uuid::Uuid;

use fintrack_core::net_worth::{NetWorthSnapshot, NewNetWorthSnapshot, SnapshotRepositoryTrait};
use fintrack_core::Result;

use super::model::NetWorthSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::net_worth_snapshots;

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn upsert(&self, snapshot: NewNetWorthSnapshot) -> Result<NetWorthSnapshot> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<NetWorthSnapshot> {
                    let mut row: NetWorthSnapshotDB = snapshot.into();
                    row.id = Uuid::new_v4().to_string();

                    // One snapshot per (year, month); recomputing a period
                    // overwrites its stored values.
                    diesel::insert_into(net_worth_snapshots::table)
                        .values(&row)
                        .on_conflict((net_worth_snapshots::year, net_worth_snapshots::month))
                        .do_update()
                        .set(&row)
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    let stored = net_worth_snapshots::table
                        .filter(net_worth_snapshots::year.eq(row.year))
                        .filter(net_worth_snapshots::month.eq(row.month))
                        .first::<NetWorthSnapshotDB>(conn)
                        .map_err(StorageError::from)?;
                    Ok(NetWorthSnapshot::from(stored))
                },
            )
            .await
    }

    fn get(&self, year: i32, month: u32) -> Result<Option<NetWorthSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let row = net_worth_snapshots::table
            .filter(net_worth_snapshots::year.eq(year))
            .filter(net_worth_snapshots::month.eq(month as i32))
            .first::<NetWorthSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(NetWorthSnapshot::from))
    }

    fn history(&self) -> Result<Vec<NetWorthSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = net_worth_snapshots::table
            .order((
                net_worth_snapshots::year.asc(),
                net_worth_snapshots::month.asc(),
            ))
            .load::<NetWorthSnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(NetWorthSnapshot::from).collect())
    }
}
