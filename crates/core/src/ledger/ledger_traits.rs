//! Ledger repository and service traits.
//!
//! The repository trait is the write/read surface of the Ledger Store. Every
//! mutating method that touches more than one row (investment movement plus
//! capital, compound postings) is a single atomic unit in the implementation:
//! either every row commits or none does.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::ledger_model::{
    AccountFlowTotals, Debt, Expense, Income, InvestmentMovement, MonthlyIncomeTotal, NewDebt,
    NewExpense, NewIncome, NewInvestmentMovement, NewTransfer, Page, Transfer, YtdTotals,
};
use crate::errors::Result;

#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    async fn insert_income(&self, new_income: NewIncome) -> Result<Income>;

    async fn insert_expense(&self, new_expense: NewExpense) -> Result<Expense>;

    /// Inserts the movement row and adjusts the investment account's capital
    /// in the same transaction. Returns the row and the capital after the
    /// adjustment. Failure of either half rolls back both.
    async fn insert_investment_movement(
        &self,
        new_movement: NewInvestmentMovement,
    ) -> Result<(InvestmentMovement, Decimal)>;

    async fn insert_transfer(&self, new_transfer: NewTransfer) -> Result<Transfer>;

    async fn insert_debt(&self, new_debt: NewDebt) -> Result<Debt>;

    /// Inserts the expense and a debt linked to it (debt.expense_id = new
    /// expense id) as one atomic unit: either both rows exist or neither does.
    async fn insert_expense_with_debt(
        &self,
        new_expense: NewExpense,
        new_debt: NewDebt,
    ) -> Result<(Expense, Debt)>;

    /// Inserts the income and a debt linked to it (debt.income_id = new
    /// income id) as one atomic unit: either both rows exist or neither does.
    async fn insert_debt_repayment(
        &self,
        new_income: NewIncome,
        new_debt: NewDebt,
    ) -> Result<(Income, Debt)>;

    fn list_incomes(&self, limit: i64, offset: i64) -> Result<Page<Income>>;

    fn list_expenses(&self, limit: i64, offset: i64) -> Result<Page<Expense>>;

    fn list_transfers(&self, limit: i64, offset: i64) -> Result<Page<Transfer>>;

    fn list_debts(&self, limit: i64, offset: i64, debtor_id: Option<&str>) -> Result<Page<Debt>>;

    /// All debt rows, for the by-debtor aggregation.
    fn list_all_debts(&self) -> Result<Vec<Debt>>;

    /// Recent expenses, newest first, for linking to debts.
    fn recent_expenses(&self, limit: i64) -> Result<Vec<Expense>>;

    /// Sums of all transaction flows referencing one fiat account.
    fn flow_totals(&self, account_id: &str) -> Result<AccountFlowTotals>;

    /// Flow totals for every fiat account that appears in the log, keyed by
    /// account id. Accounts with no transactions are absent.
    fn flow_totals_all(&self) -> Result<HashMap<String, AccountFlowTotals>>;

    fn monthly_income_sum(&self, year: i32, month: u32) -> Result<Decimal>;

    fn monthly_expense_sum(&self, year: i32, month: u32) -> Result<Decimal>;

    /// Expense totals for one calendar month, keyed by category id.
    /// Categories with no expenses that month are absent.
    fn monthly_expense_by_category(&self, year: i32, month: u32)
        -> Result<HashMap<String, Decimal>>;

    /// Deposit movements only.
    fn monthly_investment_sum(&self, year: i32, month: u32) -> Result<Decimal>;

    fn ytd_totals(&self, year: i32) -> Result<YtdTotals>;

    /// Per-month income totals for one year, ordered by month. Months with
    /// no income are absent.
    fn yearly_income_summary(&self, year: i32) -> Result<Vec<MonthlyIncomeTotal>>;
}

/// The recording surface exposed to the transport layer.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    async fn record_income(&self, new_income: NewIncome) -> Result<Income>;

    async fn record_expense(&self, new_expense: NewExpense) -> Result<Expense>;

    async fn record_investment_movement(
        &self,
        new_movement: NewInvestmentMovement,
    ) -> Result<InvestmentMovement>;

    async fn record_transfer(&self, new_transfer: NewTransfer) -> Result<Transfer>;

    async fn record_debt(&self, new_debt: NewDebt) -> Result<Debt>;

    /// Compound posting: money spent on someone else's behalf. Creates the
    /// expense and an outbound debt linked to it, atomically.
    async fn post_expense_with_debt(
        &self,
        new_expense: NewExpense,
        new_debt: NewDebt,
    ) -> Result<(Expense, Debt)>;

    /// Compound posting: a debtor pays back. Creates the income and an
    /// inbound debt linked to it, atomically.
    async fn post_debt_repayment(
        &self,
        new_income: NewIncome,
        new_debt: NewDebt,
    ) -> Result<(Income, Debt)>;

    fn get_incomes(&self, limit: i64, offset: i64) -> Result<Page<Income>>;

    fn get_expenses(&self, limit: i64, offset: i64) -> Result<Page<Expense>>;

    fn get_transfers(&self, limit: i64, offset: i64) -> Result<Page<Transfer>>;

    fn get_debts(&self, limit: i64, offset: i64, debtor_id: Option<&str>) -> Result<Page<Debt>>;

    fn get_recent_expenses(&self, limit: i64) -> Result<Vec<Expense>>;

    fn get_ytd_totals(&self, year: i32) -> Result<YtdTotals>;

    fn get_yearly_income_summary(&self, year: i32) -> Result<Vec<MonthlyIncomeTotal>>;
}
