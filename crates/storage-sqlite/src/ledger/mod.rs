//! SQLite storage implementation for the transaction log.

mod model;
mod repository;

pub use model::{DebtDB, ExpenseDB, IncomeDB, InvestmentMovementDB, TransferDB};
pub use repository::LedgerRepository;
