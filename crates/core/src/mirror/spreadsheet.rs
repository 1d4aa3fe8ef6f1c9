//! Spreadsheet mirror: a best-effort observer of committed ledger events.
//!
//! The actual spreadsheet API client lives outside this crate, behind
//! [`SpreadsheetClientTrait`]. This module owns the queue, the per-target
//! sheet configuration, and the row/cell formatting. Mirror failures are
//! logged and swallowed; they never reach the ledger transaction.

use async_trait::async_trait;
use log::warn;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::mirror_event::LedgerEvent;
use super::mirror_sink::MirrorSink;
use crate::errors::{Error, Result, ValidationError};

/// Queue depth before newly emitted events are dropped.
const MIRROR_QUEUE_DEPTH: usize = 256;

/// Closed set of mirror destinations.
///
/// Each target maps to one sheet + A1 range in the configuration store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetTarget {
    Expenses,
    Income,
    IncomeMonthly,
    Investments,
    Debts,
    AccountingAccounts,
    AccountingInvestmentAccounts,
}

impl SheetTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            SheetTarget::Expenses => "expenses",
            SheetTarget::Income => "income",
            SheetTarget::IncomeMonthly => "income_monthly",
            SheetTarget::Investments => "investments",
            SheetTarget::Debts => "debts",
            SheetTarget::AccountingAccounts => "accounting_accounts",
            SheetTarget::AccountingInvestmentAccounts => "accounting_investment_accounts",
        }
    }
}

impl std::str::FromStr for SheetTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "expenses" => Ok(SheetTarget::Expenses),
            "income" => Ok(SheetTarget::Income),
            "income_monthly" => Ok(SheetTarget::IncomeMonthly),
            "investments" => Ok(SheetTarget::Investments),
            "debts" => Ok(SheetTarget::Debts),
            "accounting_accounts" => Ok(SheetTarget::AccountingAccounts),
            "accounting_investment_accounts" => Ok(SheetTarget::AccountingInvestmentAccounts),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown sheet target: {}",
                other
            )))),
        }
    }
}

impl std::fmt::Display for SheetTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sheet + A1 range for one mirror target.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetConfig {
    pub target: SheetTarget,
    pub sheet: String,
    pub a1_range: String,
}

impl SheetConfig {
    /// Full range reference, e.g. `Fintrack!A:F`.
    pub fn range_ref(&self) -> String {
        format!("{}!{}", self.sheet, self.a1_range)
    }
}

/// Repository for the per-target sheet configuration.
#[async_trait]
pub trait SheetConfigRepositoryTrait: Send + Sync {
    fn get(&self, target: SheetTarget) -> Result<SheetConfig>;

    fn list(&self) -> Result<Vec<SheetConfig>>;

    async fn upsert(&self, configs: Vec<SheetConfig>) -> Result<Vec<SheetConfig>>;
}

/// The write-only external spreadsheet collaborator.
///
/// Implemented outside the core; the outer application layer owns the
/// credentials and the concrete API. Both calls are fire-and-forget from the
/// ledger's point of view.
#[async_trait]
pub trait SpreadsheetClientTrait: Send + Sync {
    /// Appends one row of values under the given range, e.g. `Fintrack!A:F`.
    async fn append_row(&self, sheet_range: &str, values: Vec<String>) -> Result<()>;

    /// Overwrites a single cell, e.g. `Fintrack Config!C5`.
    async fn update_cell(&self, cell_ref: &str, value: String) -> Result<()>;
}

/// Offsets an anchor cell reference by a number of rows: `C5` + 2 -> `C7`.
pub fn offset_cell(anchor: &str, rows: u32) -> Result<String> {
    let split = anchor.find(|c: char| c.is_ascii_digit()).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "cell reference has no row number: {}",
            anchor
        )))
    })?;
    let (column, row) = anchor.split_at(split);
    let row: u32 = row.parse().map_err(|_| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "invalid cell row in: {}",
            anchor
        )))
    })?;
    Ok(format!("{}{}", column, row + rows))
}

/// Cell holding the summary value for a given month: the configured anchor
/// cell plus one row per month past January.
pub fn monthly_cell(config: &SheetConfig, month: u32) -> Result<String> {
    let cell = offset_cell(&config.a1_range, month.saturating_sub(1))?;
    Ok(format!("{}!{}", config.sheet, cell))
}

/// A [`MirrorSink`] backed by a bounded queue and a background task.
///
/// `emit` never blocks: when the queue is full the event is dropped with a
/// warning (at-most-once, no retries).
#[derive(Clone)]
pub struct SpreadsheetMirror {
    tx: mpsc::Sender<LedgerEvent>,
}

impl SpreadsheetMirror {
    /// Spawns the background forwarding task and returns the sink handle.
    pub fn spawn(
        client: Arc<dyn SpreadsheetClientTrait>,
        configs: Arc<dyn SheetConfigRepositoryTrait>,
    ) -> Self {
        let (tx, mut rx) = mpsc::channel::<LedgerEvent>(MIRROR_QUEUE_DEPTH);

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                if let Err(e) = forward_event(client.as_ref(), configs.as_ref(), event).await {
                    warn!("Mirror write failed, event dropped: {}", e);
                }
            }
        });

        Self { tx }
    }
}

impl MirrorSink for SpreadsheetMirror {
    fn emit(&self, event: LedgerEvent) {
        if self.tx.try_send(event).is_err() {
            warn!("Mirror queue full or closed, dropping event");
        }
    }
}

/// Translates one committed event into spreadsheet writes.
async fn forward_event(
    client: &dyn SpreadsheetClientTrait,
    configs: &dyn SheetConfigRepositoryTrait,
    event: LedgerEvent,
) -> Result<()> {
    match event {
        LedgerEvent::ExpenseRecorded(expense) => {
            let config = configs.get(SheetTarget::Expenses)?;
            client
                .append_row(
                    &config.range_ref(),
                    vec![
                        expense.date.to_string(),
                        expense.category,
                        expense.amount.to_string(),
                        expense.description,
                        expense.method,
                        expense.original_amount.to_string(),
                    ],
                )
                .await
        }
        LedgerEvent::IncomeRecorded {
            income,
            monthly_total,
        } => {
            let config = configs.get(SheetTarget::Income)?;
            client
                .append_row(
                    &config.range_ref(),
                    vec![
                        income.date.to_string(),
                        income.description,
                        income.amount.to_string(),
                    ],
                )
                .await?;

            if let Some(total) = monthly_total {
                use chrono::Datelike;
                let monthly = configs.get(SheetTarget::IncomeMonthly)?;
                let cell = monthly_cell(&monthly, income.date.month())?;
                client.update_cell(&cell, total.to_string()).await?;
            }
            Ok(())
        }
        LedgerEvent::InvestmentRecorded { movement, capital } => {
            // The running capital travels with the row; there is no stable
            // per-account cell to address once ids stopped being ordinals.
            let config = configs.get(SheetTarget::Investments)?;
            client
                .append_row(
                    &config.range_ref(),
                    vec![
                        movement.date.to_string(),
                        movement.description,
                        movement.amount.to_string(),
                        movement.investment_account_id,
                        movement.kind.to_string(),
                        capital.to_string(),
                    ],
                )
                .await
        }
        LedgerEvent::DebtRecorded(debt) => {
            let config = configs.get(SheetTarget::Debts)?;
            client
                .append_row(
                    &config.range_ref(),
                    vec![
                        debt.date.to_string(),
                        debt.description,
                        debt.amount.to_string(),
                        debt.debtor_name,
                        debt.currency,
                        if debt.outbound { "lent" } else { "received" }.to_string(),
                    ],
                )
                .await
        }
        LedgerEvent::BalancesReconciled {
            accounts,
            investment_accounts,
        } => {
            let config = configs.get(SheetTarget::AccountingAccounts)?;
            for (row, account) in accounts.iter().enumerate() {
                let cell = offset_cell(&config.a1_range, row as u32)?;
                client
                    .update_cell(
                        &format!("{}!{}", config.sheet, cell),
                        account.balance.to_string(),
                    )
                    .await?;
            }

            let config = configs.get(SheetTarget::AccountingInvestmentAccounts)?;
            for (row, account) in investment_accounts.iter().enumerate() {
                let cell = offset_cell(&config.a1_range, row as u32)?;
                client
                    .update_cell(
                        &format!("{}!{}", config.sheet, cell),
                        account.balance.to_string(),
                    )
                    .await?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_config() -> SheetConfig {
        SheetConfig {
            target: SheetTarget::IncomeMonthly,
            sheet: "Fintrack Config".to_string(),
            a1_range: "C5".to_string(),
        }
    }

    #[test]
    fn test_offset_cell() {
        assert_eq!(offset_cell("C5", 0).unwrap(), "C5");
        assert_eq!(offset_cell("C5", 2).unwrap(), "C7");
        assert_eq!(offset_cell("AB10", 5).unwrap(), "AB15");
    }

    #[test]
    fn test_offset_cell_rejects_rowless_reference() {
        assert!(offset_cell("C", 1).is_err());
    }

    #[test]
    fn test_monthly_cell_january_is_anchor() {
        let cell = monthly_cell(&monthly_config(), 1).unwrap();
        assert_eq!(cell, "Fintrack Config!C5");
    }

    #[test]
    fn test_monthly_cell_december() {
        let cell = monthly_cell(&monthly_config(), 12).unwrap();
        assert_eq!(cell, "Fintrack Config!C16");
    }

    #[test]
    fn test_sheet_target_round_trip() {
        use std::str::FromStr;
        for target in [
            SheetTarget::Expenses,
            SheetTarget::Income,
            SheetTarget::IncomeMonthly,
            SheetTarget::Investments,
            SheetTarget::Debts,
            SheetTarget::AccountingAccounts,
            SheetTarget::AccountingInvestmentAccounts,
        ] {
            assert_eq!(SheetTarget::from_str(target.as_str()).unwrap(), target);
        }
        assert!(SheetTarget::from_str("budget_weekly").is_err());
    }
}
