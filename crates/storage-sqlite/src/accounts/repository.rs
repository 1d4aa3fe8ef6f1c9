use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use fintrack_core::accounts::{
    Account, AccountRepositoryTrait, BalanceUpdate, InvestmentAccount,
    InvestmentAccountRepositoryTrait, NewAccount, NewInvestmentAccount,
};
use fintrack_core::Result;

use super::model::{AccountDB, InvestmentAccountDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{accounts, investment_accounts};

pub struct AccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn set_account_balance(
    conn: &mut SqliteConnection,
    account_id: &str,
    balance: Decimal,
) -> Result<Account> {
    let updated = diesel::update(accounts::table.find(account_id))
        .set(accounts::balance.eq(balance.to_string()))
        .execute(conn)
        .map_err(StorageError::from)?;
    if updated == 0 {
        return Err(StorageError::QueryFailed(diesel::result::Error::NotFound).into());
    }
    let row = accounts::table
        .find(account_id)
        .first::<AccountDB>(conn)
        .map_err(StorageError::from)?;
    Ok(Account::from(row))
}

#[async_trait]
impl AccountRepositoryTrait for AccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Account> {
                let mut row: AccountDB = new_account.into();
                row.id = Uuid::new_v4().to_string();

                let inserted = diesel::insert_into(accounts::table)
                    .values(&row)
                    .returning(AccountDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Account::from(inserted))
            })
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;
        let row = accounts::table
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Account::from(row))
    }

    fn list(&self) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = accounts::table
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn update_balance(&self, account_id: &str, balance: Decimal) -> Result<Account> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| set_account_balance(conn, &account_id, balance))
            .await
    }

    async fn update_balances(&self, updates: Vec<BalanceUpdate>) -> Result<Vec<Account>> {
        // One writer job, so the whole batch is one transaction.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Account>> {
                updates
                    .into_iter()
                    .map(|u| set_account_balance(conn, &u.account_id, u.balance))
                    .collect()
            })
            .await
    }
}

pub struct InvestmentAccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentAccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn set_investment_balance(
    conn: &mut SqliteConnection,
    account_id: &str,
    balance: Decimal,
) -> Result<InvestmentAccount> {
    let updated = diesel::update(investment_accounts::table.find(account_id))
        .set(investment_accounts::balance.eq(balance.to_string()))
        .execute(conn)
        .map_err(StorageError::from)?;
    if updated == 0 {
        return Err(StorageError::QueryFailed(diesel::result::Error::NotFound).into());
    }
    let row = investment_accounts::table
        .find(account_id)
        .first::<InvestmentAccountDB>(conn)
        .map_err(StorageError::from)?;
    Ok(InvestmentAccount::from(row))
}

#[async_trait]
impl InvestmentAccountRepositoryTrait for InvestmentAccountRepository {
    async fn create(&self, new_account: NewInvestmentAccount) -> Result<InvestmentAccount> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<InvestmentAccount> {
                    let mut row: InvestmentAccountDB = new_account.into();
                    row.id = Uuid::new_v4().to_string();

                    let inserted = diesel::insert_into(investment_accounts::table)
                        .values(&row)
                        .returning(InvestmentAccountDB::as_returning())
                        .get_result(conn)
                        .map_err(StorageError::from)?;
                    Ok(InvestmentAccount::from(inserted))
                },
            )
            .await
    }

    fn get_by_id(&self, account_id: &str) -> Result<InvestmentAccount> {
        let mut conn = get_connection(&self.pool)?;
        let row = investment_accounts::table
            .find(account_id)
            .first::<InvestmentAccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(InvestmentAccount::from(row))
    }

    fn list(&self) -> Result<Vec<InvestmentAccount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investment_accounts::table
            .order(investment_accounts::name.asc())
            .load::<InvestmentAccountDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(InvestmentAccount::from).collect())
    }

    async fn update_balance(
        &self,
        account_id: &str,
        balance: Decimal,
    ) -> Result<InvestmentAccount> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| {
                set_investment_balance(conn, &account_id, balance)
            })
            .await
    }

    async fn update_balances(
        &self,
        updates: Vec<BalanceUpdate>,
    ) -> Result<Vec<InvestmentAccount>> {
        self.writer
            .exec(
                move |conn: &mut SqliteConnection| -> Result<Vec<InvestmentAccount>> {
                    updates
                        .into_iter()
                        .map(|u| set_investment_balance(conn, &u.account_id, u.balance))
                        .collect()
                },
            )
            .await
    }
}
