//! Category service implementation.

use std::sync::Arc;

use super::categories_model::{Category, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        self.repository.create(new_category).await
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list()
    }
}
