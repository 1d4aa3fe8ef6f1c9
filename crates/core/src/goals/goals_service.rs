//! Yearly goals service implementation.

use async_trait::async_trait;
use std::sync::Arc;

use super::goals_model::{NewYearlyGoals, YearlyGoals};
use super::goals_traits::{GoalsRepositoryTrait, GoalsServiceTrait};
use crate::errors::Result;

pub struct GoalsService {
    repository: Arc<dyn GoalsRepositoryTrait>,
}

impl GoalsService {
    pub fn new(repository: Arc<dyn GoalsRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl GoalsServiceTrait for GoalsService {
    fn get_goals(&self, year: i32) -> Result<YearlyGoals> {
        Ok(self
            .repository
            .get(year)?
            .unwrap_or_else(|| YearlyGoals::zeroed(year)))
    }

    async fn set_goals(&self, goals: NewYearlyGoals) -> Result<YearlyGoals> {
        goals.validate()?;
        self.repository.upsert(goals).await
    }
}
