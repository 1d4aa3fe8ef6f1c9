use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use fintrack_core::errors::{Error, ValidationError};
use fintrack_core::ledger::{
    AccountFlowTotals, Debt, Expense, Income, InvestmentMovement, LedgerRepositoryTrait,
    MonthlyIncomeTotal, MovementKind, NewDebt, NewExpense, NewIncome, NewInvestmentMovement,
    NewTransfer, Page, Transfer, YtdTotals,
};
use fintrack_core::Result;

use super::model::{DebtDB, ExpenseDB, IncomeDB, InvestmentMovementDB, TransferDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{debts, expenses, incomes, investment_accounts, investment_movements, transfers};
use crate::utils::parse_decimal_tolerant;

pub struct LedgerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn sum_amounts(amounts: Vec<String>, field: &str) -> Decimal {
    amounts
        .iter()
        .map(|a| parse_decimal_tolerant(a, field))
        .sum()
}

/// Half-open datetime range covering one calendar month.
fn month_bounds(year: i32, month: u32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "invalid month: {}-{}",
                year, month
            )))
        })?
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Ok((start, end))
}

fn year_bounds(year: i32) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let (start, _) = month_bounds(year, 1)?;
    let (_, end) = month_bounds(year, 12)?;
    Ok((start, end))
}

fn insert_income_row(conn: &mut SqliteConnection, new_income: NewIncome) -> Result<Income> {
    let mut row: IncomeDB = new_income.into();
    row.id = Uuid::new_v4().to_string();

    let inserted = diesel::insert_into(incomes::table)
        .values(&row)
        .returning(IncomeDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Ok(Income::from(inserted))
}

fn insert_expense_row(conn: &mut SqliteConnection, new_expense: NewExpense) -> Result<Expense> {
    let mut row: ExpenseDB = new_expense.into();
    row.id = Uuid::new_v4().to_string();

    let inserted = diesel::insert_into(expenses::table)
        .values(&row)
        .returning(ExpenseDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Ok(Expense::from(inserted))
}

fn insert_debt_row(conn: &mut SqliteConnection, new_debt: NewDebt) -> Result<Debt> {
    let mut row: DebtDB = new_debt.into();
    row.id = Uuid::new_v4().to_string();

    let inserted = diesel::insert_into(debts::table)
        .values(&row)
        .returning(DebtDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Ok(Debt::from(inserted))
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn insert_income(&self, new_income: NewIncome) -> Result<Income> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_income_row(conn, new_income))
            .await
    }

    async fn insert_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_expense_row(conn, new_expense))
            .await
    }

    async fn insert_investment_movement(
        &self,
        new_movement: NewInvestmentMovement,
    ) -> Result<(InvestmentMovement, Decimal)> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<(InvestmentMovement, Decimal)> {
                    let mut row: InvestmentMovementDB = new_movement.into();
                    row.id = Uuid::new_v4().to_string();

                    let inserted = diesel::insert_into(investment_movements::table)
                        .values(&row)
                        .returning(InvestmentMovementDB::as_returning())
                        .get_result::<InvestmentMovementDB>(conn)
                        .map_err(StorageError::from)?;
                    let movement = InvestmentMovement::from(inserted);

                    // Same transaction as the insert: the movement row and
                    // the capital adjustment commit or roll back together.
                    let stored_capital = investment_accounts::table
                        .find(&movement.investment_account_id)
                        .select(investment_accounts::capital)
                        .first::<String>(conn)
                        .map_err(StorageError::from)?;
                    let capital = parse_decimal_tolerant(&stored_capital, "capital")
                        + movement.kind.capital_delta(movement.amount);

                    diesel::update(investment_accounts::table.find(&movement.investment_account_id))
                        .set(investment_accounts::capital.eq(capital.to_string()))
                        .execute(conn)
                        .map_err(StorageError::from)?;

                    Ok((movement, capital))
                },
            )
            .await
    }

    async fn insert_transfer(&self, new_transfer: NewTransfer) -> Result<Transfer> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transfer> {
                let mut row: TransferDB = new_transfer.into();
                row.id = Uuid::new_v4().to_string();

                let inserted = diesel::insert_into(transfers::table)
                    .values(&row)
                    .returning(TransferDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Transfer::from(inserted))
            })
            .await
    }

    async fn insert_debt(&self, new_debt: NewDebt) -> Result<Debt> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| insert_debt_row(conn, new_debt))
            .await
    }

    async fn insert_expense_with_debt(
        &self,
        new_expense: NewExpense,
        new_debt: NewDebt,
    ) -> Result<(Expense, Debt)> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<(Expense, Debt)> {
                    let expense = insert_expense_row(conn, new_expense)?;
                    let debt = insert_debt_row(
                        conn,
                        NewDebt {
                            expense_id: Some(expense.id.clone()),
                            ..new_debt
                        },
                    )?;
                    Ok((expense, debt))
                },
            )
            .await
    }

    async fn insert_debt_repayment(
        &self,
        new_income: NewIncome,
        new_debt: NewDebt,
    ) -> Result<(Income, Debt)> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<(Income, Debt)> {
                    let income = insert_income_row(conn, new_income)?;
                    let debt = insert_debt_row(
                        conn,
                        NewDebt {
                            income_id: Some(income.id.clone()),
                            ..new_debt
                        },
                    )?;
                    Ok((income, debt))
                },
            )
            .await
    }

    fn list_incomes(&self, limit: i64, offset: i64) -> Result<Page<Income>> {
        let mut conn = get_connection(&self.pool)?;
        let total = incomes::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = incomes::table
            .order(incomes::date.desc())
            .limit(limit)
            .offset(offset)
            .load::<IncomeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page {
            items: rows.into_iter().map(Income::from).collect(),
            total,
        })
    }

    fn list_expenses(&self, limit: i64, offset: i64) -> Result<Page<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let total = expenses::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = expenses::table
            .order(expenses::date.desc())
            .limit(limit)
            .offset(offset)
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page {
            items: rows.into_iter().map(Expense::from).collect(),
            total,
        })
    }

    fn list_transfers(&self, limit: i64, offset: i64) -> Result<Page<Transfer>> {
        let mut conn = get_connection(&self.pool)?;
        let total = transfers::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?;
        let rows = transfers::table
            .order(transfers::date.desc())
            .limit(limit)
            .offset(offset)
            .load::<TransferDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Page {
            items: rows.into_iter().map(Transfer::from).collect(),
            total,
        })
    }

    fn list_debts(&self, limit: i64, offset: i64, debtor_id: Option<&str>) -> Result<Page<Debt>> {
        let mut conn = get_connection(&self.pool)?;

        let (total, rows) = match debtor_id {
            Some(debtor) => {
                let total = debts::table
                    .filter(debts::debtor_id.eq(debtor))
                    .count()
                    .get_result::<i64>(&mut conn)
                    .map_err(StorageError::from)?;
                let rows = debts::table
                    .filter(debts::debtor_id.eq(debtor))
                    .order(debts::date.desc())
                    .limit(limit)
                    .offset(offset)
                    .load::<DebtDB>(&mut conn)
                    .map_err(StorageError::from)?;
                (total, rows)
            }
            None => {
                let total = debts::table
                    .count()
                    .get_result::<i64>(&mut conn)
                    .map_err(StorageError::from)?;
                let rows = debts::table
                    .order(debts::date.desc())
                    .limit(limit)
                    .offset(offset)
                    .load::<DebtDB>(&mut conn)
                    .map_err(StorageError::from)?;
                (total, rows)
            }
        };
        Ok(Page {
            items: rows.into_iter().map(Debt::from).collect(),
            total,
        })
    }

    fn list_all_debts(&self) -> Result<Vec<Debt>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = debts::table
            .order(debts::date.asc())
            .load::<DebtDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Debt::from).collect())
    }

    fn recent_expenses(&self, limit: i64) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .order(expenses::date.desc())
            .limit(limit)
            .load::<ExpenseDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn flow_totals(&self, account_id: &str) -> Result<AccountFlowTotals> {
        let mut conn = get_connection(&self.pool)?;

        let income_amounts = incomes::table
            .filter(incomes::account_id.eq(account_id))
            .select(incomes::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let expense_amounts = expenses::table
            .filter(expenses::account_id.eq(account_id))
            .select(expenses::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let deposit_amounts = investment_movements::table
            .filter(investment_movements::source_account_id.eq(account_id))
            .filter(investment_movements::kind.eq(MovementKind::Deposit.as_str()))
            .select(investment_movements::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let withdrawal_amounts = investment_movements::table
            .filter(investment_movements::source_account_id.eq(account_id))
            .filter(investment_movements::kind.eq(MovementKind::Withdrawal.as_str()))
            .select(investment_movements::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let outgoing_amounts = transfers::table
            .filter(transfers::source_account_id.eq(account_id))
            .select(transfers::source_amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let incoming_amounts = transfers::table
            .filter(transfers::dest_account_id.eq(account_id))
            .select(transfers::dest_amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(AccountFlowTotals {
            total_income: sum_amounts(income_amounts, "income amount"),
            total_expenses: sum_amounts(expense_amounts, "expense amount"),
            total_investment_deposits: sum_amounts(deposit_amounts, "movement amount"),
            total_investment_withdrawals: sum_amounts(withdrawal_amounts, "movement amount"),
            total_transfers_out: sum_amounts(outgoing_amounts, "source amount"),
            total_transfers_in: sum_amounts(incoming_amounts, "dest amount"),
        })
    }

    fn flow_totals_all(&self) -> Result<HashMap<String, AccountFlowTotals>> {
        let mut conn = get_connection(&self.pool)?;
        let mut totals: HashMap<String, AccountFlowTotals> = HashMap::new();

        let income_rows = incomes::table
            .select((incomes::account_id, incomes::amount))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        for (account, amount) in income_rows {
            totals.entry(account).or_default().total_income +=
                parse_decimal_tolerant(&amount, "income amount");
        }

        let expense_rows = expenses::table
            .select((expenses::account_id, expenses::amount))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        for (account, amount) in expense_rows {
            totals.entry(account).or_default().total_expenses +=
                parse_decimal_tolerant(&amount, "expense amount");
        }

        let movement_rows = investment_movements::table
            .select((
                investment_movements::source_account_id,
                investment_movements::kind,
                investment_movements::amount,
            ))
            .load::<(String, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        for (account, kind, amount) in movement_rows {
            let entry = totals.entry(account).or_default();
            let amount = parse_decimal_tolerant(&amount, "movement amount");
            if kind == MovementKind::Withdrawal.as_str() {
                entry.total_investment_withdrawals += amount;
            } else {
                entry.total_investment_deposits += amount;
            }
        }

        let transfer_rows = transfers::table
            .select((
                transfers::source_account_id,
                transfers::source_amount,
                transfers::dest_account_id,
                transfers::dest_amount,
            ))
            .load::<(String, String, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        for (source, source_amount, dest, dest_amount) in transfer_rows {
            totals.entry(source).or_default().total_transfers_out +=
                parse_decimal_tolerant(&source_amount, "source amount");
            totals.entry(dest).or_default().total_transfers_in +=
                parse_decimal_tolerant(&dest_amount, "dest amount");
        }

        Ok(totals)
    }

    fn monthly_income_sum(&self, year: i32, month: u32) -> Result<Decimal> {
        let (start, end) = month_bounds(year, month)?;
        let mut conn = get_connection(&self.pool)?;
        let amounts = incomes::table
            .filter(incomes::date.ge(start))
            .filter(incomes::date.lt(end))
            .select(incomes::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(sum_amounts(amounts, "income amount"))
    }

    fn monthly_expense_sum(&self, year: i32, month: u32) -> Result<Decimal> {
        let (start, end) = month_bounds(year, month)?;
        let mut conn = get_connection(&self.pool)?;
        let amounts = expenses::table
            .filter(expenses::date.ge(start))
            .filter(expenses::date.lt(end))
            .select(expenses::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(sum_amounts(amounts, "expense amount"))
    }

    fn monthly_expense_by_category(
        &self,
        year: i32,
        month: u32,
    ) -> Result<HashMap<String, Decimal>> {
        let (start, end) = month_bounds(year, month)?;
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::date.ge(start))
            .filter(expenses::date.lt(end))
            .select((expenses::category_id, expenses::amount))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for (category_id, amount) in rows {
            *totals.entry(category_id).or_default() +=
                parse_decimal_tolerant(&amount, "expense amount");
        }
        Ok(totals)
    }

    fn monthly_investment_sum(&self, year: i32, month: u32) -> Result<Decimal> {
        let (start, end) = month_bounds(year, month)?;
        let mut conn = get_connection(&self.pool)?;
        let amounts = investment_movements::table
            .filter(investment_movements::date.ge(start))
            .filter(investment_movements::date.lt(end))
            .filter(investment_movements::kind.eq(MovementKind::Deposit.as_str()))
            .select(investment_movements::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(sum_amounts(amounts, "movement amount"))
    }

    fn ytd_totals(&self, year: i32) -> Result<YtdTotals> {
        let (start, end) = year_bounds(year)?;
        let mut conn = get_connection(&self.pool)?;

        let income_amounts = incomes::table
            .filter(incomes::date.ge(start))
            .filter(incomes::date.lt(end))
            .select(incomes::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let expense_amounts = expenses::table
            .filter(expenses::date.ge(start))
            .filter(expenses::date.lt(end))
            .select(expenses::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        let deposit_amounts = investment_movements::table
            .filter(investment_movements::date.ge(start))
            .filter(investment_movements::date.lt(end))
            .filter(investment_movements::kind.eq(MovementKind::Deposit.as_str()))
            .select(investment_movements::amount)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(YtdTotals {
            income: sum_amounts(income_amounts, "income amount"),
            expenses: sum_amounts(expense_amounts, "expense amount"),
            investments: sum_amounts(deposit_amounts, "movement amount"),
        })
    }

    fn yearly_income_summary(&self, year: i32) -> Result<Vec<MonthlyIncomeTotal>> {
        let (start, end) = year_bounds(year)?;
        let mut conn = get_connection(&self.pool)?;
        let rows = incomes::table
            .filter(incomes::date.ge(start))
            .filter(incomes::date.lt(end))
            .select((incomes::date, incomes::amount))
            .load::<(NaiveDateTime, String)>(&mut conn)
            .map_err(StorageError::from)?;

        // BTreeMap keeps the months in calendar order.
        let mut by_month: std::collections::BTreeMap<u32, Decimal> = Default::default();
        for (date, amount) in rows {
            *by_month.entry(date.month()).or_default() +=
                parse_decimal_tolerant(&amount, "income amount");
        }
        Ok(by_month
            .into_iter()
            .map(|(month, total_income)| MonthlyIncomeTotal {
                year,
                month,
                total_income,
            })
            .collect())
    }
}
