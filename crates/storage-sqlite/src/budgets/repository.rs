use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use fintrack_core::budgets::{Budget, BudgetRepositoryTrait, NewBudget};
use fintrack_core::Result;

use super::model::BudgetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::budgets;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn list(&self) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    async fn upsert(&self, new_budgets: Vec<NewBudget>) -> Result<Vec<Budget>> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Budget>> {
                let mut stored = Vec::with_capacity(new_budgets.len());
                for new_budget in new_budgets {
                    let mut row: BudgetDB = new_budget.into();
                    row.id = Uuid::new_v4().to_string();

                    // One row per category; setting a budget again
                    // overwrites in place.
                    diesel::insert_into(budgets::table)
                        .values(&row)
                        .on_conflict(budgets::category_id)
                        .do_update()
                        .set(budgets::amount.eq(row.amount.clone()))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    let saved = budgets::table
                        .filter(budgets::category_id.eq(&row.category_id))
                        .first::<BudgetDB>(conn)
                        .map_err(StorageError::from)?;
                    stored.push(Budget::from(saved));
                }
                Ok(stored)
            })
            .await
    }
}
