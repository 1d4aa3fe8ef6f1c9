//! Database row models for the transaction log tables.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use fintrack_core::ledger::{
    default_transaction_date, Debt, Expense, Income, InvestmentMovement, MovementKind, NewDebt,
    NewExpense, NewIncome, NewInvestmentMovement, NewTransfer, Transfer,
};

use crate::utils::parse_decimal_tolerant;

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::incomes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IncomeDB {
    pub id: String,
    pub date: NaiveDateTime,
    pub amount: String,
    pub description: String,
    pub account_id: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<IncomeDB> for Income {
    fn from(db: IncomeDB) -> Self {
        Self {
            id: db.id,
            date: db.date,
            amount: parse_decimal_tolerant(&db.amount, "income amount"),
            description: db.description,
            account_id: db.account_id,
            created_at: db.created_at,
        }
    }
}

impl From<NewIncome> for IncomeDB {
    fn from(domain: NewIncome) -> Self {
        Self {
            id: String::new(),
            date: domain.date.unwrap_or_else(default_transaction_date),
            amount: domain.amount.to_string(),
            description: domain.description,
            account_id: domain.account_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExpenseDB {
    pub id: String,
    pub date: NaiveDateTime,
    pub category: String,
    pub category_id: String,
    pub amount: String,
    pub description: String,
    pub method: String,
    pub original_amount: String,
    pub account_id: String,
    pub account_type: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            id: db.id,
            date: db.date,
            category: db.category,
            category_id: db.category_id,
            amount: parse_decimal_tolerant(&db.amount, "expense amount"),
            description: db.description,
            method: db.method,
            original_amount: parse_decimal_tolerant(&db.original_amount, "original amount"),
            account_id: db.account_id,
            account_type: db.account_type,
            created_at: db.created_at,
        }
    }
}

impl From<NewExpense> for ExpenseDB {
    fn from(domain: NewExpense) -> Self {
        Self {
            id: String::new(),
            date: domain.date.unwrap_or_else(default_transaction_date),
            category: domain.category,
            category_id: domain.category_id,
            amount: domain.amount.to_string(),
            description: domain.description,
            method: domain.method,
            original_amount: domain.original_amount.to_string(),
            account_id: domain.account_id,
            account_type: domain.account_type,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::investment_movements)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentMovementDB {
    pub id: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub amount: String,
    pub investment_account_id: String,
    pub kind: String,
    pub source_account_id: String,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<InvestmentMovementDB> for InvestmentMovement {
    fn from(db: InvestmentMovementDB) -> Self {
        Self {
            id: db.id,
            date: db.date,
            description: db.description,
            amount: parse_decimal_tolerant(&db.amount, "movement amount"),
            investment_account_id: db.investment_account_id,
            // Written only through the closed enum; an unknown value is
            // hand-edited data.
            kind: MovementKind::from_str(&db.kind).unwrap_or_else(|_| {
                log::error!("Unknown movement kind '{}', using deposit", db.kind);
                MovementKind::Deposit
            }),
            source_account_id: db.source_account_id,
            created_at: db.created_at,
        }
    }
}

impl From<NewInvestmentMovement> for InvestmentMovementDB {
    fn from(domain: NewInvestmentMovement) -> Self {
        Self {
            id: String::new(),
            date: domain.date.unwrap_or_else(default_transaction_date),
            description: domain.description,
            amount: domain.amount.to_string(),
            investment_account_id: domain.investment_account_id,
            kind: domain.kind.as_str().to_string(),
            source_account_id: domain.source_account_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::transfers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransferDB {
    pub id: String,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub source_account_id: String,
    pub source_amount: String,
    pub dest_account_id: String,
    pub dest_amount: String,
    pub exchange_rate: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<TransferDB> for Transfer {
    fn from(db: TransferDB) -> Self {
        Self {
            id: db.id,
            date: db.date,
            description: db.description,
            source_account_id: db.source_account_id,
            source_amount: parse_decimal_tolerant(&db.source_amount, "source amount"),
            dest_account_id: db.dest_account_id,
            dest_amount: parse_decimal_tolerant(&db.dest_amount, "dest amount"),
            exchange_rate: db
                .exchange_rate
                .as_deref()
                .map(|s| parse_decimal_tolerant(s, "exchange rate")),
            created_at: db.created_at,
        }
    }
}

impl From<NewTransfer> for TransferDB {
    fn from(domain: NewTransfer) -> Self {
        Self {
            id: String::new(),
            date: domain.date.unwrap_or_else(default_transaction_date),
            description: domain.description,
            source_account_id: domain.source_account_id,
            source_amount: domain.source_amount.to_string(),
            dest_account_id: domain.dest_account_id,
            dest_amount: domain.dest_amount.to_string(),
            exchange_rate: domain.exchange_rate.map(|r| r.to_string()),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::debts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DebtDB {
    pub id: String,
    pub description: String,
    pub amount: String,
    pub debtor_id: String,
    pub debtor_name: String,
    pub date: NaiveDateTime,
    pub original_amount: String,
    pub currency: String,
    pub outbound: bool,
    pub account_id: Option<String>,
    pub expense_id: Option<String>,
    pub income_id: Option<String>,
    #[diesel(skip_insertion)]
    pub created_at: NaiveDateTime,
}

impl From<DebtDB> for Debt {
    fn from(db: DebtDB) -> Self {
        Self {
            id: db.id,
            description: db.description,
            amount: parse_decimal_tolerant(&db.amount, "debt amount"),
            debtor_id: db.debtor_id,
            debtor_name: db.debtor_name,
            date: db.date,
            original_amount: parse_decimal_tolerant(&db.original_amount, "original amount"),
            currency: db.currency,
            outbound: db.outbound,
            account_id: db.account_id,
            expense_id: db.expense_id,
            income_id: db.income_id,
            created_at: db.created_at,
        }
    }
}

impl From<NewDebt> for DebtDB {
    fn from(domain: NewDebt) -> Self {
        Self {
            id: String::new(),
            description: domain.description,
            amount: domain.amount.to_string(),
            debtor_id: domain.debtor_id,
            debtor_name: domain.debtor_name,
            date: domain.date.unwrap_or_else(default_transaction_date),
            original_amount: domain.original_amount.to_string(),
            currency: domain.currency,
            outbound: domain.outbound,
            account_id: domain.account_id,
            expense_id: domain.expense_id,
            income_id: domain.income_id,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
