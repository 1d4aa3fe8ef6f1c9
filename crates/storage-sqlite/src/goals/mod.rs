//! SQLite storage implementation for yearly goals.

mod model;
mod repository;

pub use model::YearlyGoalsDB;
pub use repository::GoalsRepository;
