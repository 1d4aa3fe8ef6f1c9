//! Budgets module - per-category monthly budgets and the budget-vs-spent
//! report.

mod budgets_model;
mod budgets_service;
mod budgets_traits;

#[cfg(test)]
mod budgets_service_tests;

pub use budgets_model::{Budget, BudgetByCategory, NewBudget};
pub use budgets_service::BudgetService;
pub use budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
