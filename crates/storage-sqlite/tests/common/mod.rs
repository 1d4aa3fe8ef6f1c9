//! Shared harness for storage integration tests: a migrated on-disk SQLite
//! database in a temp directory, plus fixture helpers.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use fintrack_core::accounts::{NewAccount, NewInvestmentAccount, InvestmentAccountKind};
use fintrack_core::categories::NewCategory;
use fintrack_core::debtors::NewDebtor;
use fintrack_core::ledger::{NewDebt, NewExpense, NewIncome};
use fintrack_storage_sqlite::{create_pool, run_migrations, spawn_writer, DbPool, WriteHandle};

pub struct TestDb {
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
    _dir: TempDir,
}

/// Must run inside a Tokio runtime; the writer actor is spawned on it.
pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = dir.path().join("fintrack.db");
    let pool = create_pool(db_path.to_str().expect("non-utf8 temp path"))
        .expect("failed to create pool");
    run_migrations(&pool).expect("failed to run migrations");
    let writer = spawn_writer(&pool);
    TestDb {
        pool,
        writer,
        _dir: dir,
    }
}

pub fn new_account(name: &str, starting_balance: Decimal, balance: Decimal) -> NewAccount {
    NewAccount {
        name: name.to_string(),
        description: None,
        currency: "USD".to_string(),
        balance,
        starting_balance,
        starting_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    }
}

pub fn new_investment_account(
    name: &str,
    kind: InvestmentAccountKind,
    balance: Decimal,
    starting_capital: Decimal,
) -> NewInvestmentAccount {
    NewInvestmentAccount {
        name: name.to_string(),
        description: None,
        kind,
        currency: "USD".to_string(),
        balance,
        starting_capital,
    }
}

pub fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: None,
        is_essential: false,
    }
}

pub fn new_debtor(name: &str) -> NewDebtor {
    NewDebtor {
        name: name.to_string(),
        first_name: None,
        last_name: None,
        description: None,
    }
}

pub fn new_income(account_id: &str, amount: Decimal) -> NewIncome {
    NewIncome {
        date: None,
        amount,
        description: "income".to_string(),
        account_id: account_id.to_string(),
    }
}

pub fn new_expense(account_id: &str, category_id: &str, amount: Decimal) -> NewExpense {
    NewExpense {
        date: None,
        category: "Groceries".to_string(),
        category_id: category_id.to_string(),
        amount,
        description: "expense".to_string(),
        method: "card".to_string(),
        original_amount: amount,
        account_id: account_id.to_string(),
        account_type: "checking".to_string(),
    }
}

pub fn new_debt(debtor_id: &str, amount: Decimal, outbound: bool) -> NewDebt {
    NewDebt {
        date: None,
        description: "shared bill".to_string(),
        amount,
        debtor_id: debtor_id.to_string(),
        debtor_name: "debtor".to_string(),
        original_amount: amount,
        currency: "USD".to_string(),
        outbound,
        account_id: None,
        expense_id: None,
        income_id: None,
    }
}
