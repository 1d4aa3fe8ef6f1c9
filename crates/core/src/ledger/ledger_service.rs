//! Ledger service: posting validation, transaction recording, and compound
//! postings.
//!
//! Every operation validates its input before the repository is touched, so a
//! rejected posting leaves no partial row behind. Mirror events are emitted
//! only after the repository reports a committed write; the mirror is an
//! at-most-once, best-effort observer and can never fail a ledger operation.

use chrono::Datelike;
use log::{debug, warn};
use std::sync::Arc;

use super::ledger_model::{
    Debt, Expense, Income, InvestmentMovement, MonthlyIncomeTotal, NewDebt, NewExpense, NewIncome,
    NewInvestmentMovement, NewTransfer, Page, Transfer, YtdTotals,
};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::constants::DEFAULT_PAGE_SIZE;
use crate::errors::Result;
use crate::mirror::{LedgerEvent, MirrorSink};

/// Callers asking for no particular page size get the default one.
fn page_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_PAGE_SIZE
    } else {
        limit
    }
}

pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    mirror: Arc<dyn MirrorSink>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>, mirror: Arc<dyn MirrorSink>) -> Self {
        Self { repository, mirror }
    }

    /// Month-to-date income total for the month the income landed in, used by
    /// the mirror to refresh the monthly summary cell. Read-only and after
    /// commit, so a failure only degrades the mirror payload.
    fn monthly_total_for(&self, income: &Income) -> Option<rust_decimal::Decimal> {
        match self
            .repository
            .monthly_income_sum(income.date.year(), income.date.month())
        {
            Ok(total) => Some(total),
            Err(e) => {
                warn!("Failed to compute monthly income total for mirror: {}", e);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn record_income(&self, new_income: NewIncome) -> Result<Income> {
        new_income.validate()?;
        let income = self.repository.insert_income(new_income).await?;
        debug!("Recorded income {} ({})", income.id, income.amount);

        let monthly_total = self.monthly_total_for(&income);
        self.mirror.emit(LedgerEvent::IncomeRecorded {
            income: income.clone(),
            monthly_total,
        });
        Ok(income)
    }

    async fn record_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        new_expense.validate()?;
        let expense = self.repository.insert_expense(new_expense).await?;
        debug!("Recorded expense {} ({})", expense.id, expense.amount);

        self.mirror
            .emit(LedgerEvent::ExpenseRecorded(expense.clone()));
        Ok(expense)
    }

    async fn record_investment_movement(
        &self,
        new_movement: NewInvestmentMovement,
    ) -> Result<InvestmentMovement> {
        new_movement.validate()?;
        let (movement, capital) = self
            .repository
            .insert_investment_movement(new_movement)
            .await?;
        debug!(
            "Recorded investment {} {} on account {}, capital now {}",
            movement.kind, movement.amount, movement.investment_account_id, capital
        );

        self.mirror.emit(LedgerEvent::InvestmentRecorded {
            movement: movement.clone(),
            capital,
        });
        Ok(movement)
    }

    async fn record_transfer(&self, new_transfer: NewTransfer) -> Result<Transfer> {
        new_transfer.validate()?;
        let new_transfer = NewTransfer {
            exchange_rate: new_transfer.effective_exchange_rate(),
            ..new_transfer
        };
        let transfer = self.repository.insert_transfer(new_transfer).await?;
        debug!(
            "Recorded transfer {} ({} -> {})",
            transfer.id, transfer.source_account_id, transfer.dest_account_id
        );
        Ok(transfer)
    }

    async fn record_debt(&self, new_debt: NewDebt) -> Result<Debt> {
        new_debt.validate()?;
        let debt = self.repository.insert_debt(new_debt).await?;
        debug!("Recorded debt {} ({})", debt.id, debt.amount);

        self.mirror.emit(LedgerEvent::DebtRecorded(debt.clone()));
        Ok(debt)
    }

    async fn post_expense_with_debt(
        &self,
        new_expense: NewExpense,
        new_debt: NewDebt,
    ) -> Result<(Expense, Debt)> {
        new_expense.validate()?;
        new_debt.validate()?;
        let (expense, debt) = self
            .repository
            .insert_expense_with_debt(new_expense, new_debt)
            .await?;
        debug!(
            "Posted expense {} with outbound debt {} for debtor {}",
            expense.id, debt.id, debt.debtor_name
        );

        self.mirror
            .emit_batch(vec![
                LedgerEvent::ExpenseRecorded(expense.clone()),
                LedgerEvent::DebtRecorded(debt.clone()),
            ]);
        Ok((expense, debt))
    }

    async fn post_debt_repayment(
        &self,
        new_income: NewIncome,
        new_debt: NewDebt,
    ) -> Result<(Income, Debt)> {
        new_income.validate()?;
        new_debt.validate()?;
        // A repayment is money coming back, whatever the caller set.
        let new_debt = NewDebt {
            outbound: false,
            ..new_debt
        };
        let (income, debt) = self
            .repository
            .insert_debt_repayment(new_income, new_debt)
            .await?;
        debug!(
            "Posted repayment income {} closing debt {} from {}",
            income.id, debt.id, debt.debtor_name
        );

        let monthly_total = self.monthly_total_for(&income);
        self.mirror.emit_batch(vec![
            LedgerEvent::IncomeRecorded {
                income: income.clone(),
                monthly_total,
            },
            LedgerEvent::DebtRecorded(debt.clone()),
        ]);
        Ok((income, debt))
    }

    fn get_incomes(&self, limit: i64, offset: i64) -> Result<Page<Income>> {
        self.repository.list_incomes(page_limit(limit), offset)
    }

    fn get_expenses(&self, limit: i64, offset: i64) -> Result<Page<Expense>> {
        self.repository.list_expenses(page_limit(limit), offset)
    }

    fn get_transfers(&self, limit: i64, offset: i64) -> Result<Page<Transfer>> {
        self.repository.list_transfers(page_limit(limit), offset)
    }

    fn get_debts(&self, limit: i64, offset: i64, debtor_id: Option<&str>) -> Result<Page<Debt>> {
        self.repository.list_debts(page_limit(limit), offset, debtor_id)
    }

    fn get_recent_expenses(&self, limit: i64) -> Result<Vec<Expense>> {
        self.repository.recent_expenses(page_limit(limit))
    }

    fn get_ytd_totals(&self, year: i32) -> Result<YtdTotals> {
        self.repository.ytd_totals(year)
    }

    fn get_yearly_income_summary(&self, year: i32) -> Result<Vec<MonthlyIncomeTotal>> {
        self.repository.yearly_income_summary(year)
    }
}
