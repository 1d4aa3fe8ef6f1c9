//! Ledger event types consumed by the mirror.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{Account, InvestmentAccount};
use crate::ledger::{Debt, Expense, Income, InvestmentMovement};

/// A committed ledger mutation, emitted for downstream mirroring.
///
/// Events are emitted only after the store transaction commits; they carry
/// everything the mirror needs so the mirror never has to read the ledger on
/// the hot path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LedgerEvent {
    ExpenseRecorded(Expense),
    #[serde(rename_all = "camelCase")]
    IncomeRecorded {
        income: Income,
        /// Month-to-date income total after this row, when available.
        monthly_total: Option<Decimal>,
    },
    #[serde(rename_all = "camelCase")]
    InvestmentRecorded {
        movement: InvestmentMovement,
        /// Capital of the investment account after the adjustment.
        capital: Decimal,
    },
    DebtRecorded(Debt),
    #[serde(rename_all = "camelCase")]
    BalancesReconciled {
        accounts: Vec<Account>,
        investment_accounts: Vec<InvestmentAccount>,
    },
}
