//! Database row models for fiat and investment accounts.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::accounts::{
    Account, InvestmentAccount, InvestmentAccountKind, NewAccount, NewInvestmentAccount,
};

use crate::utils::parse_decimal_tolerant;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub currency: String,
    pub balance: String,
    pub starting_balance: String,
    pub starting_date: NaiveDate,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            currency: db.currency,
            balance: parse_decimal_tolerant(&db.balance, "account balance"),
            starting_balance: parse_decimal_tolerant(&db.starting_balance, "starting balance"),
            starting_date: db.starting_date,
            created_at: db.created_at,
        }
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        Self {
            // Filled with a fresh UUID by the repository before insertion.
            id: String::new(),
            name: domain.name,
            description: domain.description,
            currency: domain.currency,
            balance: domain.balance.to_string(),
            starting_balance: domain.starting_balance.to_string(),
            starting_date: domain.starting_date,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investment_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentAccountDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    pub currency: String,
    pub balance: String,
    pub capital: String,
    pub starting_capital: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<InvestmentAccountDB> for InvestmentAccount {
    fn from(db: InvestmentAccountDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            // The kind column only ever holds values written through the
            // closed enum; an unknown value is hand-edited data.
            kind: InvestmentAccountKind::from_str(&db.kind).unwrap_or_else(|_| {
                log::error!("Unknown investment account kind '{}', using Broker", db.kind);
                InvestmentAccountKind::Broker
            }),
            currency: db.currency,
            balance: parse_decimal_tolerant(&db.balance, "investment balance"),
            capital: parse_decimal_tolerant(&db.capital, "capital"),
            starting_capital: parse_decimal_tolerant(&db.starting_capital, "starting capital"),
            created_at: db.created_at,
        }
    }
}

impl From<NewInvestmentAccount> for InvestmentAccountDB {
    fn from(domain: NewInvestmentAccount) -> Self {
        Self {
            id: String::new(),
            name: domain.name,
            description: domain.description,
            kind: domain.kind.as_str().to_string(),
            currency: domain.currency,
            balance: domain.balance.to_string(),
            // A new account's capital starts at its starting capital.
            capital: domain.starting_capital.to_string(),
            starting_capital: domain.starting_capital.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
