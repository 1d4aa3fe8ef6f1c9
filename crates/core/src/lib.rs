//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger reconciliation engine for Fintrack.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod constants;
pub mod debtors;
pub mod errors;
pub mod goals;
pub mod ledger;
pub mod mirror;
pub mod net_worth;
pub mod reconciliation;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
