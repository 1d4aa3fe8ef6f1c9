//! Budget repository and service traits.

use async_trait::async_trait;

use super::budgets_model::{Budget, BudgetByCategory, NewBudget};
use crate::errors::Result;

#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    /// All configured budgets, one per category.
    fn list(&self) -> Result<Vec<Budget>>;

    /// Upserts the whole batch as one atomic unit, keyed by category id.
    async fn upsert(&self, budgets: Vec<NewBudget>) -> Result<Vec<Budget>>;
}

#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    /// Budget vs. spent per category for the current calendar month,
    /// ordered by category name.
    fn budget_report(&self) -> Result<Vec<BudgetByCategory>>;

    async fn set_budgets(&self, budgets: Vec<NewBudget>) -> Result<Vec<Budget>>;
}
