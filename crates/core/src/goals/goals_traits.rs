//! Yearly goals repository and service traits.

use async_trait::async_trait;

use super::goals_model::{NewYearlyGoals, YearlyGoals};
use crate::errors::Result;

#[async_trait]
pub trait GoalsRepositoryTrait: Send + Sync {
    /// Returns the stored goals for a year, or `None` when nothing has been
    /// set for it.
    fn get(&self, year: i32) -> Result<Option<YearlyGoals>>;

    /// Creates or updates the goals row for the year. One row per year.
    async fn upsert(&self, goals: NewYearlyGoals) -> Result<YearlyGoals>;
}

#[async_trait]
pub trait GoalsServiceTrait: Send + Sync {
    /// Goals for a year; a year with nothing stored reads as all-zero
    /// targets rather than an error.
    fn get_goals(&self, year: i32) -> Result<YearlyGoals>;

    async fn set_goals(&self, goals: NewYearlyGoals) -> Result<YearlyGoals>;
}
