use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use fintrack_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use fintrack_core::Result;

use super::model::CategoryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let mut row: CategoryDB = new_category.into();
                row.id = Uuid::new_v4().to_string();

                let inserted = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Category::from(inserted))
            })
            .await
    }

    fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Category::from(row))
    }

    fn list(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .order(categories::name.asc())
            .load::<CategoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}
