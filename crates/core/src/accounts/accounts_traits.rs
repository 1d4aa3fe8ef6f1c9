//! Account repository and service traits.
//!
//! These traits define the contract for account operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{
    Account, BalanceUpdate, InvestmentAccount, NewAccount, NewInvestmentAccount,
};
use crate::errors::Result;

/// Trait defining the contract for fiat account repository operations.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    async fn create(&self, new_account: NewAccount) -> Result<Account>;

    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Lists all fiat accounts ordered by name.
    fn list(&self) -> Result<Vec<Account>>;

    /// Sets the real balance of one account.
    async fn update_balance(&self, account_id: &str, balance: Decimal) -> Result<Account>;

    /// Sets the real balances of several accounts in one atomic unit.
    async fn update_balances(&self, updates: Vec<BalanceUpdate>) -> Result<Vec<Account>>;
}

/// Trait defining the contract for investment account repository operations.
///
/// Capital is not mutable through this trait: it is adjusted only inside the
/// transaction that records an investment movement (see the ledger repository).
#[async_trait]
pub trait InvestmentAccountRepositoryTrait: Send + Sync {
    async fn create(&self, new_account: NewInvestmentAccount) -> Result<InvestmentAccount>;

    fn get_by_id(&self, account_id: &str) -> Result<InvestmentAccount>;

    /// Lists all investment accounts ordered by name.
    fn list(&self) -> Result<Vec<InvestmentAccount>>;

    /// Sets the real (reconciled) balance of one investment account.
    async fn update_balance(&self, account_id: &str, balance: Decimal)
        -> Result<InvestmentAccount>;

    /// Sets the real balances of several investment accounts in one atomic unit.
    async fn update_balances(
        &self,
        updates: Vec<BalanceUpdate>,
    ) -> Result<Vec<InvestmentAccount>>;
}

/// Trait defining the contract for account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    fn get_account(&self, account_id: &str) -> Result<Account>;

    fn list_accounts(&self) -> Result<Vec<Account>>;

    async fn create_investment_account(
        &self,
        new_account: NewInvestmentAccount,
    ) -> Result<InvestmentAccount>;

    fn get_investment_account(&self, account_id: &str) -> Result<InvestmentAccount>;

    fn list_investment_accounts(&self) -> Result<Vec<InvestmentAccount>>;

    /// Records the outcome of a manual reconciliation: sets real balances on
    /// fiat and investment accounts in one pass and reports the updated rows.
    async fn reconcile_balances(
        &self,
        account_updates: Vec<BalanceUpdate>,
        investment_updates: Vec<BalanceUpdate>,
    ) -> Result<(Vec<Account>, Vec<InvestmentAccount>)>;
}
