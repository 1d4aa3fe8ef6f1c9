//! Database row model for net worth snapshots.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::net_worth::{NetWorthSnapshot, NewNetWorthSnapshot};

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
#[diesel(table_name = crate::schema::net_worth_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NetWorthSnapshotDB {
    pub id: String,
    pub date: NaiveDateTime,
    pub year: i32,
    pub month: i32,
    pub total_fiat_balance: String,
    pub crypto_balance: String,
    pub crypto_capital: String,
    pub broker_balance: String,
    pub broker_capital: String,
    pub total_investment_balance: String,
    pub total_investment_capital: String,
    pub total_real_net_worth: String,
    pub total_pnl: String,
    pub expected_fiat_balance: String,
    pub expected_net_worth: String,
    pub fiat_discrepancy: String,
    pub total_discrepancy: String,
    pub fiat_percent: String,
    pub crypto_percent: String,
    pub broker_percent: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<NetWorthSnapshotDB> for NetWorthSnapshot {
    fn from(db: NetWorthSnapshotDB) -> Self {
        Self {
            id: db.id,
            created_at: db.created_at,
            values: NewNetWorthSnapshot {
                date: db.date,
                year: db.year,
                month: db.month as u32,
                total_fiat_balance: parse_decimal_tolerant(
                    &db.total_fiat_balance,
                    "total fiat balance",
                ),
                crypto_balance: parse_decimal_tolerant(&db.crypto_balance, "crypto balance"),
                crypto_capital: parse_decimal_tolerant(&db.crypto_capital, "crypto capital"),
                broker_balance: parse_decimal_tolerant(&db.broker_balance, "broker balance"),
                broker_capital: parse_decimal_tolerant(&db.broker_capital, "broker capital"),
                total_investment_balance: parse_decimal_tolerant(
                    &db.total_investment_balance,
                    "total investment balance",
                ),
                total_investment_capital: parse_decimal_tolerant(
                    &db.total_investment_capital,
                    "total investment capital",
                ),
                total_real_net_worth: parse_decimal_tolerant(
                    &db.total_real_net_worth,
                    "total real net worth",
                ),
                total_pnl: parse_decimal_tolerant(&db.total_pnl, "total pnl"),
                expected_fiat_balance: parse_decimal_tolerant(
                    &db.expected_fiat_balance,
                    "expected fiat balance",
                ),
                expected_net_worth: parse_decimal_tolerant(
                    &db.expected_net_worth,
                    "expected net worth",
                ),
                fiat_discrepancy: parse_decimal_tolerant(&db.fiat_discrepancy, "fiat discrepancy"),
                total_discrepancy: parse_decimal_tolerant(
                    &db.total_discrepancy,
                    "total discrepancy",
                ),
                fiat_percent: parse_decimal_tolerant(&db.fiat_percent, "fiat percent"),
                crypto_percent: parse_decimal_tolerant(&db.crypto_percent, "crypto percent"),
                broker_percent: parse_decimal_tolerant(&db.broker_percent, "broker percent"),
            },
        }
    }
}

impl From<NewNetWorthSnapshot> for NetWorthSnapshotDB {
    fn from(domain: NewNetWorthSnapshot) -> Self {
        Self {
            id: String::new(),
            date: domain.date,
            year: domain.year,
            month: domain.month as i32,
            total_fiat_balance: domain.total_fiat_balance.to_string(),
            crypto_balance: domain.crypto_balance.to_string(),
            crypto_capital: domain.crypto_capital.to_string(),
            broker_balance: domain.broker_balance.to_string(),
            broker_capital: domain.broker_capital.to_string(),
            total_investment_balance: domain.total_investment_balance.to_string(),
            total_investment_capital: domain.total_investment_capital.to_string(),
            total_real_net_worth: domain.total_real_net_worth.to_string(),
            total_pnl: domain.total_pnl.to_string(),
            expected_fiat_balance: domain.expected_fiat_balance.to_string(),
            expected_net_worth: domain.expected_net_worth.to_string(),
            fiat_discrepancy: domain.fiat_discrepancy.to_string(),
            total_discrepancy: domain.total_discrepancy.to_string(),
            fiat_percent: domain.fiat_percent.to_string(),
            crypto_percent: domain.crypto_percent.to_string(),
            broker_percent: domain.broker_percent.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
