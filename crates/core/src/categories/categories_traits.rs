//! Category repository and service traits.

use async_trait::async_trait;

use super::categories_model::{Category, NewCategory};
use crate::errors::Result;

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    async fn create(&self, new_category: NewCategory) -> Result<Category>;

    fn get_by_id(&self, category_id: &str) -> Result<Category>;

    /// Lists all categories ordered by name.
    fn list(&self) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    fn list_categories(&self) -> Result<Vec<Category>>;
}
