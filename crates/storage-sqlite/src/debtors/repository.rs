use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use fintrack_core::debtors::{Debtor, DebtorRepositoryTrait, NewDebtor};
use fintrack_core::Result;

use super::model::DebtorDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::debtors;

pub struct DebtorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl DebtorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DebtorRepositoryTrait for DebtorRepository {
    async fn create(&self, new_debtor: NewDebtor) -> Result<Debtor> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Debtor> {
                let mut row: DebtorDB = new_debtor.into();
                row.id = Uuid::new_v4().to_string();

                let inserted = diesel::insert_into(debtors::table)
                    .values(&row)
                    .returning(DebtorDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Debtor::from(inserted))
            })
            .await
    }

    fn get_by_id(&self, debtor_id: &str) -> Result<Debtor> {
        let mut conn = get_connection(&self.pool)?;
        let row = debtors::table
            .find(debtor_id)
            .first::<DebtorDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Debtor::from(row))
    }

    fn list(&self) -> Result<Vec<Debtor>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = debtors::table
            .order(debtors::name.asc())
            .load::<DebtorDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Debtor::from).collect())
    }
}
