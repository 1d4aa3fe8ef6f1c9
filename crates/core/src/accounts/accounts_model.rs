//! Account domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Closed set of investment account kinds.
///
/// The net worth snapshot groups balances and capital by this kind, so the
/// set is deliberately exhaustive: adding a kind forces every grouping match
/// to be revisited at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentAccountKind {
    Crypto,
    Broker,
}

impl InvestmentAccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentAccountKind::Crypto => "Crypto",
            InvestmentAccountKind::Broker => "Broker",
        }
    }
}

impl std::str::FromStr for InvestmentAccountKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Crypto" => Ok(InvestmentAccountKind::Crypto),
            "Broker" => Ok(InvestmentAccountKind::Broker),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown investment account kind: {}",
                other
            )))),
        }
    }
}

impl std::fmt::Display for InvestmentAccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fiat account.
///
/// `balance` is the real balance, entered manually after bank reconciliation.
/// The expected balance is never stored; it is replayed from the transaction
/// log by the reconciliation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub balance: Decimal,
    pub starting_balance: Decimal,
    pub starting_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new fiat account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub balance: Decimal,
    pub starting_balance: Decimal,
    pub starting_date: NaiveDate,
}

impl NewAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "currency".to_string(),
            )));
        }
        Ok(())
    }
}

/// An investment account.
///
/// `balance` is the real balance reconciled from exchange/broker statements;
/// `capital` is the running cost basis, adjusted incrementally by investment
/// movements in the same transaction that records them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAccount {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub kind: InvestmentAccountKind,
    pub currency: String,
    pub balance: Decimal,
    pub capital: Decimal,
    pub starting_capital: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new investment account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestmentAccount {
    pub name: String,
    pub description: Option<String>,
    pub kind: InvestmentAccountKind,
    pub currency: String,
    pub balance: Decimal,
    pub starting_capital: Decimal,
}

impl NewInvestmentAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "currency".to_string(),
            )));
        }
        Ok(())
    }
}

/// One entry of a batch real-balance update (the monthly accounting flow).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub account_id: String,
    pub balance: Decimal,
}
