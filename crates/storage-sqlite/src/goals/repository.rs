use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::OptionalExtension;
use diesel::SqliteConnection;
use uuid::Uuid;

use fintrack_core::goals::{GoalsRepositoryTrait, NewYearlyGoals, YearlyGoals};
use fintrack_core::Result;

use super::model::YearlyGoalsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::yearly_goals;

pub struct GoalsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl GoalsRepositoryTrait for GoalsRepository {
    fn get(&self, year: i32) -> Result<Option<YearlyGoals>> {
        let mut conn = get_connection(&self.pool)?;
        let row = yearly_goals::table
            .filter(yearly_goals::year.eq(year))
            .first::<YearlyGoalsDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(YearlyGoals::from))
    }

    async fn upsert(&self, goals: NewYearlyGoals) -> Result<YearlyGoals> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<YearlyGoals> {
                let mut row: YearlyGoalsDB = goals.into();
                row.id = Uuid::new_v4().to_string();

                // One row per year; setting goals again overwrites in place.
                diesel::insert_into(yearly_goals::table)
                    .values(&row)
                    .on_conflict(yearly_goals::year)
                    .do_update()
                    .set((
                        yearly_goals::savings_goal.eq(row.savings_goal.clone()),
                        yearly_goals::investment_goal.eq(row.investment_goal.clone()),
                        yearly_goals::ideal_investment.eq(row.ideal_investment.clone()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let stored = yearly_goals::table
                    .filter(yearly_goals::year.eq(row.year))
                    .first::<YearlyGoalsDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(YearlyGoals::from(stored))
            })
            .await
    }
}
