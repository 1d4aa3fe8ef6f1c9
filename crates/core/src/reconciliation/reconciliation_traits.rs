//! Reconciliation service trait.

use rust_decimal::Decimal;

use super::reconciliation_model::{AccountExpectedBalance, DebtByDebtor, InvestmentAccountSummary};
use crate::errors::Result;

/// Read-only reconciliation queries over the transaction log.
///
/// All results are re-derived from the log at call time; nothing here is
/// cached as mutable state, so the numbers cannot drift from the log.
pub trait ReconciliationServiceTrait: Send + Sync {
    /// Expected balance of one fiat account: starting balance plus the net of
    /// every transaction referencing it.
    fn expected_balance(&self, account_id: &str) -> Result<Decimal>;

    /// Real minus expected for one fiat account.
    fn discrepancy(&self, account_id: &str) -> Result<Decimal>;

    /// One report row per fiat account, including discrepancy.
    fn account_report(&self) -> Result<Vec<AccountExpectedBalance>>;

    /// PnL summary per investment account.
    fn investment_summary(&self) -> Result<Vec<InvestmentAccountSummary>>;

    /// Net lending position per debtor.
    fn debts_by_debtor(&self) -> Result<Vec<DebtByDebtor>>;
}
