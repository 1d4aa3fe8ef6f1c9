//! Net worth snapshot models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The value fields of a monthly net worth rollup.
///
/// Produced by `compute_snapshot`; persisted via upsert on (year, month).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNetWorthSnapshot {
    pub date: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    /// Sum of real balances across all fiat accounts.
    pub total_fiat_balance: Decimal,
    pub crypto_balance: Decimal,
    pub crypto_capital: Decimal,
    pub broker_balance: Decimal,
    pub broker_capital: Decimal,
    pub total_investment_balance: Decimal,
    pub total_investment_capital: Decimal,
    pub total_real_net_worth: Decimal,
    pub total_pnl: Decimal,
    /// Sum of expected balances across all fiat accounts; 0 when the
    /// expected-balance derivation is unavailable.
    pub expected_fiat_balance: Decimal,
    /// Expected fiat plus real investment balances: investment balances come
    /// from external reconciliation, never from the transaction log.
    pub expected_net_worth: Decimal,
    pub fiat_discrepancy: Decimal,
    pub total_discrepancy: Decimal,
    pub fiat_percent: Decimal,
    pub crypto_percent: Decimal,
    pub broker_percent: Decimal,
}

/// A persisted snapshot row. One per (year, month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSnapshot {
    pub id: String,
    pub created_at: NaiveDateTime,
    #[serde(flatten)]
    pub values: NewNetWorthSnapshot,
}
