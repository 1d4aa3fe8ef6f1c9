//! Ledger domain models: the append-only transaction kinds.
//!
//! Every `New*` input validates itself before the service hands it to the
//! store. Validation failures must have zero observable side effects, so the
//! checks here are the single gate in front of every write: the reconciliation
//! math is worthless if a zero or negative amount enters the log.

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

fn require_positive(field: &'static str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NonPositiveAmount {
            field,
            amount,
        }));
    }
    Ok(())
}

/// Default transaction date when the caller omits one: stamped at receipt
/// time.
pub fn default_transaction_date() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// A page of ledger rows plus the unpaginated total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

// === Income ===

/// Money arriving in a fiat account. Increases that account's expected balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub description: String,
    pub account_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncome {
    pub date: Option<NaiveDateTime>,
    pub amount: Decimal,
    pub description: String,
    pub account_id: String,
}

impl NewIncome {
    pub fn validate(&self) -> Result<()> {
        require_positive("income amount", self.amount)
    }
}

// === Expense ===

/// Money leaving a fiat account. Decreases that account's expected balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDateTime,
    pub category: String,
    pub category_id: String,
    pub amount: Decimal,
    pub description: String,
    pub method: String,
    pub original_amount: Decimal,
    pub account_id: String,
    pub account_type: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub date: Option<NaiveDateTime>,
    pub category: String,
    pub category_id: String,
    pub amount: Decimal,
    pub description: String,
    pub method: String,
    pub original_amount: Decimal,
    pub account_id: String,
    pub account_type: String,
}

impl NewExpense {
    pub fn validate(&self) -> Result<()> {
        require_positive("expense amount", self.amount)
    }
}

// === Investment movement ===

/// Closed set of investment movement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Increases investment capital, decreases the source fiat account's
    /// expected balance.
    Deposit,
    /// Decreases investment capital, increases the source fiat account's
    /// expected balance.
    Withdrawal,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Deposit => "deposit",
            MovementKind::Withdrawal => "withdrawal",
        }
    }

    /// Sign of the capital adjustment this kind applies.
    pub fn capital_delta(&self, amount: Decimal) -> Decimal {
        match self {
            MovementKind::Deposit => amount,
            MovementKind::Withdrawal => -amount,
        }
    }
}

impl std::str::FromStr for MovementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deposit" => Ok(MovementKind::Deposit),
            "withdrawal" => Ok(MovementKind::Withdrawal),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "invalid movement kind: {} (must be 'deposit' or 'withdrawal')",
                other
            )))),
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movement of funds between a fiat account and an investment account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentMovement {
    pub id: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: Decimal,
    pub investment_account_id: String,
    pub kind: MovementKind,
    pub source_account_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestmentMovement {
    pub date: Option<NaiveDateTime>,
    pub description: String,
    pub amount: Decimal,
    pub investment_account_id: String,
    pub kind: MovementKind,
    pub source_account_id: String,
}

impl NewInvestmentMovement {
    pub fn validate(&self) -> Result<()> {
        require_positive("movement amount", self.amount)
    }
}

// === Transfer ===

/// A movement of funds between two fiat accounts, possibly cross-currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub source_account_id: String,
    pub source_amount: Decimal,
    pub dest_account_id: String,
    pub dest_amount: Decimal,
    pub exchange_rate: Option<Decimal>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransfer {
    pub date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub source_account_id: String,
    pub source_amount: Decimal,
    pub dest_account_id: String,
    pub dest_amount: Decimal,
    pub exchange_rate: Option<Decimal>,
}

impl NewTransfer {
    pub fn validate(&self) -> Result<()> {
        require_positive("transfer source amount", self.source_amount)?;
        require_positive("transfer destination amount", self.dest_amount)
    }

    /// Derives the exchange rate as dest/source when unset.
    pub fn effective_exchange_rate(&self) -> Option<Decimal> {
        match self.exchange_rate {
            Some(rate) => Some(rate),
            None if self.source_amount > Decimal::ZERO => {
                Some(self.dest_amount / self.source_amount)
            }
            None => None,
        }
    }
}

// === Debt ===

/// A receivable/payable ledger entry.
///
/// A debt row by itself never changes expected balance: the linked expense or
/// income already captured the cash movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub debtor_id: String,
    pub debtor_name: String,
    pub date: NaiveDateTime,
    pub original_amount: Decimal,
    pub currency: String,
    /// true = money lent out; false = money received back.
    pub outbound: bool,
    pub account_id: Option<String>,
    pub expense_id: Option<String>,
    pub income_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDebt {
    pub date: Option<NaiveDateTime>,
    pub description: String,
    pub amount: Decimal,
    pub debtor_id: String,
    pub debtor_name: String,
    pub original_amount: Decimal,
    pub currency: String,
    pub outbound: bool,
    pub account_id: Option<String>,
    pub expense_id: Option<String>,
    pub income_id: Option<String>,
}

impl NewDebt {
    pub fn validate(&self) -> Result<()> {
        require_positive("debt amount", self.amount)
    }
}

// === Derived flow totals ===

/// Per-account sums over the transaction log, the inputs to the expected
/// balance formula. Produced by the store (the relational-view equivalent);
/// the arithmetic itself lives in the reconciliation service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountFlowTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_investment_deposits: Decimal,
    pub total_investment_withdrawals: Decimal,
    pub total_transfers_out: Decimal,
    pub total_transfers_in: Decimal,
}

/// Year-to-date totals for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtdTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    /// Deposits only; withdrawals do not reduce the YTD invested figure.
    pub investments: Decimal,
}

/// One month's income total within a yearly summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncomeTotal {
    pub year: i32,
    pub month: u32,
    pub total_income: Decimal,
}
