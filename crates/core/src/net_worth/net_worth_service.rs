//! Net worth snapshot service implementation.

use chrono::Utc;
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::net_worth_model::{NetWorthSnapshot, NewNetWorthSnapshot};
use super::net_worth_traits::{NetWorthServiceTrait, SnapshotRepositoryTrait};
use crate::accounts::{
    AccountRepositoryTrait, InvestmentAccountKind, InvestmentAccountRepositoryTrait,
};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::reconciliation::ReconciliationServiceTrait;

pub struct NetWorthService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentAccountRepositoryTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    reconciliation: Arc<dyn ReconciliationServiceTrait>,
}

impl NetWorthService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentAccountRepositoryTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        reconciliation: Arc<dyn ReconciliationServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            investment_repository,
            snapshot_repository,
            reconciliation,
        }
    }

    /// Share of `part` in `whole` as a percentage; 0 when `whole` is not
    /// positive.
    fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
        if whole <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (part / whole * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION)
    }
}

#[async_trait::async_trait]
impl NetWorthServiceTrait for NetWorthService {
    fn compute_snapshot(&self, year: i32, month: u32) -> Result<NewNetWorthSnapshot> {
        let accounts = self.account_repository.list()?;
        let total_fiat_balance: Decimal = accounts.iter().map(|a| a.balance).sum();

        // Soft default: an unavailable expected-balance derivation degrades
        // the snapshot (expected figures read as 0) rather than failing it.
        // The warning separates "infrastructure missing" from "no
        // transactions yet", which both produce a 0 here.
        let expected_fiat_balance = match self.reconciliation.account_report() {
            Ok(report) => report.iter().map(|row| row.expected_balance).sum(),
            Err(e) => {
                warn!(
                    "Expected balance derivation unavailable, snapshot falls back to 0: {}",
                    e
                );
                Decimal::ZERO
            }
        };

        let mut crypto_balance = Decimal::ZERO;
        let mut crypto_capital = Decimal::ZERO;
        let mut broker_balance = Decimal::ZERO;
        let mut broker_capital = Decimal::ZERO;
        for account in self.investment_repository.list()? {
            match account.kind {
                InvestmentAccountKind::Crypto => {
                    crypto_balance += account.balance;
                    crypto_capital += account.capital;
                }
                InvestmentAccountKind::Broker => {
                    broker_balance += account.balance;
                    broker_capital += account.capital;
                }
            }
        }

        let total_investment_balance = crypto_balance + broker_balance;
        let total_investment_capital = crypto_capital + broker_capital;
        let total_real_net_worth = total_fiat_balance + total_investment_balance;
        let total_pnl = total_investment_balance - total_investment_capital;

        // Investment balances are always treated as real: they come from
        // external reconciliation, not from the transaction log.
        let expected_net_worth = expected_fiat_balance + total_investment_balance;

        Ok(NewNetWorthSnapshot {
            date: Utc::now().naive_utc(),
            year,
            month,
            total_fiat_balance,
            crypto_balance,
            crypto_capital,
            broker_balance,
            broker_capital,
            total_investment_balance,
            total_investment_capital,
            total_real_net_worth,
            total_pnl,
            expected_fiat_balance,
            expected_net_worth,
            fiat_discrepancy: total_fiat_balance - expected_fiat_balance,
            total_discrepancy: total_real_net_worth - expected_net_worth,
            fiat_percent: Self::percent_of(total_fiat_balance, total_real_net_worth),
            crypto_percent: Self::percent_of(crypto_balance, total_real_net_worth),
            broker_percent: Self::percent_of(broker_balance, total_real_net_worth),
        })
    }

    async fn upsert_snapshot(&self, snapshot: NewNetWorthSnapshot) -> Result<NetWorthSnapshot> {
        self.snapshot_repository.upsert(snapshot).await
    }

    fn history(&self) -> Result<Vec<NetWorthSnapshot>> {
        self.snapshot_repository.history()
    }
}
