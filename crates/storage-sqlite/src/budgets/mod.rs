//! SQLite storage implementation for per-category budgets.

mod model;
mod repository;

pub use model::BudgetDB;
pub use repository::BudgetRepository;
