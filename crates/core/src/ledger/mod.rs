//! Ledger module - the append-only transaction kinds and their recording
//! operations (single postings and compound postings).

mod ledger_model;
mod ledger_service;
mod ledger_traits;



pub use ledger_model::{
    default_transaction_date, AccountFlowTotals, Debt, Expense, Income, InvestmentMovement,
    MonthlyIncomeTotal, MovementKind, NewDebt, NewExpense, NewIncome, NewInvestmentMovement,
    NewTransfer, Page, Transfer, YtdTotals,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
