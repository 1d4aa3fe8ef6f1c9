//! SQLite storage implementation for accounts.

mod model;
mod repository;

pub use model::{AccountDB, InvestmentAccountDB};
pub use repository::{AccountRepository, InvestmentAccountRepository};
