//! Reconciliation module - expected balances replayed from the transaction
//! log, discrepancies against real balances, investment PnL, and debt
//! positions.

mod reconciliation_model;
mod reconciliation_service;
mod reconciliation_traits;

#[cfg(test)]
mod reconciliation_service_tests;

pub use reconciliation_model::{AccountExpectedBalance, DebtByDebtor, InvestmentAccountSummary};
pub use reconciliation_service::ReconciliationService;
pub use reconciliation_traits::ReconciliationServiceTrait;
