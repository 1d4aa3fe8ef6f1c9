//! Goals module - yearly savings and investment targets.

mod goals_model;
mod goals_service;
mod goals_traits;

pub use goals_model::{NewYearlyGoals, YearlyGoals};
pub use goals_service::GoalsService;
pub use goals_traits::{GoalsRepositoryTrait, GoalsServiceTrait};
