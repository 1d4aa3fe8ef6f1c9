//! SQLite storage implementation for debtors.

mod model;
mod repository;

pub use model::DebtorDB;
pub use repository::DebtorRepository;
