//! Account service implementation.

use log::debug;
use std::sync::Arc;

use super::accounts_model::{
    Account, BalanceUpdate, InvestmentAccount, NewAccount, NewInvestmentAccount,
};
use super::accounts_traits::{
    AccountRepositoryTrait, AccountServiceTrait, InvestmentAccountRepositoryTrait,
};
use crate::errors::Result;
use crate::mirror::{LedgerEvent, MirrorSink};

/// Service for managing fiat and investment accounts.
pub struct AccountService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentAccountRepositoryTrait>,
    mirror: Arc<dyn MirrorSink>,
}

impl AccountService {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentAccountRepositoryTrait>,
        mirror: Arc<dyn MirrorSink>,
    ) -> Self {
        Self {
            account_repository,
            investment_repository,
            mirror,
        }
    }
}

#[async_trait::async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!("Creating account {}", new_account.name);
        self.account_repository.create(new_account).await
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.account_repository.get_by_id(account_id)
    }

    fn list_accounts(&self) -> Result<Vec<Account>> {
        self.account_repository.list()
    }

    async fn create_investment_account(
        &self,
        new_account: NewInvestmentAccount,
    ) -> Result<InvestmentAccount> {
        new_account.validate()?;
        debug!("Creating investment account {}", new_account.name);
        self.investment_repository.create(new_account).await
    }

    fn get_investment_account(&self, account_id: &str) -> Result<InvestmentAccount> {
        self.investment_repository.get_by_id(account_id)
    }

    fn list_investment_accounts(&self) -> Result<Vec<InvestmentAccount>> {
        self.investment_repository.list()
    }

    async fn reconcile_balances(
        &self,
        account_updates: Vec<BalanceUpdate>,
        investment_updates: Vec<BalanceUpdate>,
    ) -> Result<(Vec<Account>, Vec<InvestmentAccount>)> {
        let accounts = if account_updates.is_empty() {
            Vec::new()
        } else {
            self.account_repository
                .update_balances(account_updates)
                .await?
        };
        let investment_accounts = if investment_updates.is_empty() {
            Vec::new()
        } else {
            self.investment_repository
                .update_balances(investment_updates)
                .await?
        };

        // Best-effort mirror of the reconciled balances, after commit.
        self.mirror.emit(LedgerEvent::BalancesReconciled {
            accounts: accounts.clone(),
            investment_accounts: investment_accounts.clone(),
        });

        Ok((accounts, investment_accounts))
    }
}
