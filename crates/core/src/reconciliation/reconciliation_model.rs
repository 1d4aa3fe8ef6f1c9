//! Reconciliation report models. All of these are derived per query, never
//! stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::InvestmentAccountKind;
use crate::ledger::AccountFlowTotals;

/// Expected-versus-real report row for one fiat account.
///
/// `expected_balance` is replayed from the transaction log on every query;
/// `discrepancy` is real minus expected: positive means real-world funds
/// exceed what the log predicts, negative means the log predicts more than is
/// actually there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountExpectedBalance {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub starting_balance: Decimal,
    pub starting_date: NaiveDate,
    #[serde(flatten)]
    pub totals: AccountFlowTotals,
    pub expected_balance: Decimal,
    pub real_balance: Decimal,
    pub discrepancy: Decimal,
}

/// PnL summary row for one investment account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAccountSummary {
    pub id: String,
    pub name: String,
    pub kind: InvestmentAccountKind,
    pub currency: String,
    pub real_balance: Decimal,
    pub capital: Decimal,
    pub starting_capital: Decimal,
    pub pnl: Decimal,
    /// 0 when capital is 0, not a math error.
    pub pnl_percent: Decimal,
}

/// Net position against one debtor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtByDebtor {
    pub debtor_id: String,
    pub debtor_name: String,
    pub total_lent: Decimal,
    pub total_received: Decimal,
    /// total_lent - total_received; positive means the debtor still owes us.
    pub net_owed: Decimal,
    pub transaction_count: i64,
}
