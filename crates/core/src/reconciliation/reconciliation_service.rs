//! Balance reconciliation service implementation.
//!
//! Expected balances are replayed from the transaction log on every call
//! (starting balance plus flow totals supplied by the store). Keeping the
//! arithmetic here, out of the store, means the numbers are identical whether
//! or not the store also materializes an equivalent view.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::reconciliation_model::{
    AccountExpectedBalance, DebtByDebtor, InvestmentAccountSummary,
};
use super::reconciliation_traits::ReconciliationServiceTrait;
use crate::accounts::{AccountRepositoryTrait, InvestmentAccount, InvestmentAccountRepositoryTrait};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::ledger::{AccountFlowTotals, LedgerRepositoryTrait};

pub struct ReconciliationService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentAccountRepositoryTrait>,
}

impl ReconciliationService {
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentAccountRepositoryTrait>,
    ) -> Self {
        Self {
            ledger_repository,
            account_repository,
            investment_repository,
        }
    }
}

/// The expected-balance formula:
/// starting + income - expenses - deposits sourced here + withdrawals
/// sourced here - transfers out + transfers in.
pub(crate) fn expected_from(starting_balance: Decimal, totals: &AccountFlowTotals) -> Decimal {
    starting_balance + totals.total_income - totals.total_expenses
        - totals.total_investment_deposits
        + totals.total_investment_withdrawals
        - totals.total_transfers_out
        + totals.total_transfers_in
}

pub(crate) fn summarize_investment(account: &InvestmentAccount) -> InvestmentAccountSummary {
    let pnl = account.balance - account.capital;
    let pnl_percent = if account.capital.is_zero() {
        Decimal::ZERO
    } else {
        (pnl / account.capital * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
    };
    InvestmentAccountSummary {
        id: account.id.clone(),
        name: account.name.clone(),
        kind: account.kind,
        currency: account.currency.clone(),
        real_balance: account.balance,
        capital: account.capital,
        starting_capital: account.starting_capital,
        pnl,
        pnl_percent,
    }
}

impl ReconciliationServiceTrait for ReconciliationService {
    fn expected_balance(&self, account_id: &str) -> Result<Decimal> {
        let account = self.account_repository.get_by_id(account_id)?;
        let totals = self.ledger_repository.flow_totals(account_id)?;
        Ok(expected_from(account.starting_balance, &totals))
    }

    fn discrepancy(&self, account_id: &str) -> Result<Decimal> {
        let account = self.account_repository.get_by_id(account_id)?;
        let totals = self.ledger_repository.flow_totals(account_id)?;
        Ok(account.balance - expected_from(account.starting_balance, &totals))
    }

    fn account_report(&self) -> Result<Vec<AccountExpectedBalance>> {
        let accounts = self.account_repository.list()?;
        let mut totals_by_account = self.ledger_repository.flow_totals_all()?;

        Ok(accounts
            .into_iter()
            .map(|account| {
                let totals = totals_by_account.remove(&account.id).unwrap_or_default();
                let expected_balance = expected_from(account.starting_balance, &totals);
                AccountExpectedBalance {
                    id: account.id,
                    name: account.name,
                    currency: account.currency,
                    starting_balance: account.starting_balance,
                    starting_date: account.starting_date,
                    expected_balance,
                    real_balance: account.balance,
                    discrepancy: account.balance - expected_balance,
                    totals,
                }
            })
            .collect())
    }

    fn investment_summary(&self) -> Result<Vec<InvestmentAccountSummary>> {
        let accounts = self.investment_repository.list()?;
        Ok(accounts.iter().map(summarize_investment).collect())
    }

    fn debts_by_debtor(&self) -> Result<Vec<DebtByDebtor>> {
        let debts = self.ledger_repository.list_all_debts()?;

        // BTreeMap keyed by debtor id keeps the output order stable.
        let mut by_debtor: BTreeMap<String, DebtByDebtor> = BTreeMap::new();
        for debt in debts {
            let entry = by_debtor
                .entry(debt.debtor_id.clone())
                .or_insert_with(|| DebtByDebtor {
                    debtor_id: debt.debtor_id.clone(),
                    debtor_name: debt.debtor_name.clone(),
                    total_lent: Decimal::ZERO,
                    total_received: Decimal::ZERO,
                    net_owed: Decimal::ZERO,
                    transaction_count: 0,
                });
            if debt.outbound {
                entry.total_lent += debt.amount;
            } else {
                entry.total_received += debt.amount;
            }
            entry.net_owed = entry.total_lent - entry.total_received;
            entry.transaction_count += 1;
        }

        Ok(by_debtor.into_values().collect())
    }
}
