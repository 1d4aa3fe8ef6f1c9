use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::reconciliation_service::{expected_from, summarize_investment, ReconciliationService};
use super::reconciliation_traits::ReconciliationServiceTrait;
use crate::accounts::{
    Account, AccountRepositoryTrait, BalanceUpdate, InvestmentAccount, InvestmentAccountKind,
    InvestmentAccountRepositoryTrait, NewAccount, NewInvestmentAccount,
};
use crate::errors::{Error, Result};
use crate::ledger::{
    AccountFlowTotals, Debt, Expense, Income, InvestmentMovement, LedgerRepositoryTrait,
    MonthlyIncomeTotal, NewDebt, NewExpense, NewIncome, NewInvestmentMovement, NewTransfer, Page,
    Transfer, YtdTotals,
};

fn fiat_account(id: &str, starting_balance: Decimal, balance: Decimal) -> Account {
    Account {
        id: id.to_string(),
        name: format!("account-{}", id),
        description: None,
        currency: "USD".to_string(),
        balance,
        starting_balance,
        starting_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        created_at: Utc::now().naive_utc(),
    }
}

fn debt(debtor_id: &str, debtor_name: &str, amount: Decimal, outbound: bool) -> Debt {
    Debt {
        id: uuid::Uuid::new_v4().to_string(),
        description: "shared bill".to_string(),
        amount,
        debtor_id: debtor_id.to_string(),
        debtor_name: debtor_name.to_string(),
        date: Utc::now().naive_utc(),
        original_amount: amount,
        currency: "USD".to_string(),
        outbound,
        account_id: None,
        expense_id: None,
        income_id: None,
        created_at: Utc::now().naive_utc(),
    }
}

/// Read-only ledger stub: flow totals and debts are fixed per test.
#[derive(Default)]
struct StubLedgerRepository {
    totals: HashMap<String, AccountFlowTotals>,
    debts: Vec<Debt>,
}

#[async_trait]
impl LedgerRepositoryTrait for StubLedgerRepository {
    async fn insert_income(&self, _new_income: NewIncome) -> Result<Income> {
        unimplemented!()
    }

    async fn insert_expense(&self, _new_expense: NewExpense) -> Result<Expense> {
        unimplemented!()
    }

    async fn insert_investment_movement(
        &self,
        _new_movement: NewInvestmentMovement,
    ) -> Result<(InvestmentMovement, Decimal)> {
        unimplemented!()
    }

    async fn insert_transfer(&self, _new_transfer: NewTransfer) -> Result<Transfer> {
        unimplemented!()
    }

    async fn insert_debt(&self, _new_debt: NewDebt) -> Result<Debt> {
        unimplemented!()
    }

    async fn insert_expense_with_debt(
        &self,
        _new_expense: NewExpense,
        _new_debt: NewDebt,
    ) -> Result<(Expense, Debt)> {
        unimplemented!()
    }

    async fn insert_debt_repayment(
        &self,
        _new_income: NewIncome,
        _new_debt: NewDebt,
    ) -> Result<(Income, Debt)> {
        unimplemented!()
    }

    fn list_incomes(&self, _limit: i64, _offset: i64) -> Result<Page<Income>> {
        unimplemented!()
    }

    fn list_expenses(&self, _limit: i64, _offset: i64) -> Result<Page<Expense>> {
        unimplemented!()
    }

    fn list_transfers(&self, _limit: i64, _offset: i64) -> Result<Page<Transfer>> {
        unimplemented!()
    }

    fn list_debts(
        &self,
        _limit: i64,
        _offset: i64,
        _debtor_id: Option<&str>,
    ) -> Result<Page<Debt>> {
        unimplemented!()
    }

    fn list_all_debts(&self) -> Result<Vec<Debt>> {
        Ok(self.debts.clone())
    }

    fn recent_expenses(&self, _limit: i64) -> Result<Vec<Expense>> {
        unimplemented!()
    }

    fn flow_totals(&self, account_id: &str) -> Result<AccountFlowTotals> {
        Ok(self.totals.get(account_id).cloned().unwrap_or_default())
    }

    fn flow_totals_all(&self) -> Result<HashMap<String, AccountFlowTotals>> {
        Ok(self.totals.clone())
    }

    fn monthly_income_sum(&self, _year: i32, _month: u32) -> Result<Decimal> {
        unimplemented!()
    }

    fn monthly_expense_sum(&self, _year: i32, _month: u32) -> Result<Decimal> {
        unimplemented!()
    }

    fn monthly_expense_by_category(
        &self,
        _year: i32,
        _month: u32,
    ) -> Result<HashMap<String, Decimal>> {
        unimplemented!()
    }

    fn monthly_investment_sum(&self, _year: i32, _month: u32) -> Result<Decimal> {
        unimplemented!()
    }

    fn ytd_totals(&self, _year: i32) -> Result<YtdTotals> {
        unimplemented!()
    }

    fn yearly_income_summary(&self, _year: i32) -> Result<Vec<MonthlyIncomeTotal>> {
        unimplemented!()
    }
}

struct StubAccountRepository {
    accounts: Vec<Account>,
}

#[async_trait]
impl AccountRepositoryTrait for StubAccountRepository {
    async fn create(&self, _new_account: NewAccount) -> Result<Account> {
        unimplemented!()
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
            .ok_or_else(|| Error::Repository("account not found".to_string()))
    }

    fn list(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    async fn update_balance(&self, _account_id: &str, _balance: Decimal) -> Result<Account> {
        unimplemented!()
    }

    async fn update_balances(&self, _updates: Vec<BalanceUpdate>) -> Result<Vec<Account>> {
        unimplemented!()
    }
}

struct StubInvestmentRepository {
    accounts: Vec<InvestmentAccount>,
}

#[async_trait]
impl InvestmentAccountRepositoryTrait for StubInvestmentRepository {
    async fn create(&self, _new_account: NewInvestmentAccount) -> Result<InvestmentAccount> {
        unimplemented!()
    }

    fn get_by_id(&self, _account_id: &str) -> Result<InvestmentAccount> {
        unimplemented!()
    }

    fn list(&self) -> Result<Vec<InvestmentAccount>> {
        Ok(self.accounts.clone())
    }

    async fn update_balance(
        &self,
        _account_id: &str,
        _balance: Decimal,
    ) -> Result<InvestmentAccount> {
        unimplemented!()
    }

    async fn update_balances(
        &self,
        _updates: Vec<BalanceUpdate>,
    ) -> Result<Vec<InvestmentAccount>> {
        unimplemented!()
    }
}

fn service(
    accounts: Vec<Account>,
    investment_accounts: Vec<InvestmentAccount>,
    totals: HashMap<String, AccountFlowTotals>,
    debts: Vec<Debt>,
) -> ReconciliationService {
    ReconciliationService::new(
        Arc::new(StubLedgerRepository { totals, debts }),
        Arc::new(StubAccountRepository { accounts }),
        Arc::new(StubInvestmentRepository {
            accounts: investment_accounts,
        }),
    )
}

fn all_flows() -> AccountFlowTotals {
    AccountFlowTotals {
        total_income: dec!(500),
        total_expenses: dec!(200),
        total_investment_deposits: dec!(300),
        total_investment_withdrawals: dec!(100),
        total_transfers_out: dec!(50),
        total_transfers_in: dec!(25),
    }
}

#[test]
fn test_expected_balance_formula_all_flows() {
    // 1000 + 500 - 200 - 300 + 100 - 50 + 25
    assert_eq!(expected_from(dec!(1000), &all_flows()), dec!(1075));
}

#[test]
fn test_expected_balance_of_untouched_account_is_starting_balance() {
    assert_eq!(
        expected_from(dec!(1000), &AccountFlowTotals::default()),
        dec!(1000)
    );
}

#[test]
fn test_expected_balance_queries_only_that_account() {
    let mut totals = HashMap::new();
    totals.insert("acc-1".to_string(), all_flows());
    let service = service(
        vec![
            fiat_account("acc-1", dec!(1000), dec!(1050)),
            fiat_account("acc-2", dec!(400), dec!(400)),
        ],
        vec![],
        totals,
        vec![],
    );

    assert_eq!(service.expected_balance("acc-1").unwrap(), dec!(1075));
    // No transactions reference acc-2, so its expected balance stays at its
    // starting balance.
    assert_eq!(service.expected_balance("acc-2").unwrap(), dec!(400));
}

#[test]
fn test_discrepancy_is_real_minus_expected() {
    let mut totals = HashMap::new();
    totals.insert("acc-1".to_string(), all_flows());
    let service = service(
        vec![fiat_account("acc-1", dec!(1000), dec!(1050))],
        vec![],
        totals,
        vec![],
    );

    // Real 1050 against expected 1075: money is missing.
    assert_eq!(service.discrepancy("acc-1").unwrap(), dec!(-25));
}

#[test]
fn test_account_report_covers_accounts_absent_from_the_log() {
    let mut totals = HashMap::new();
    totals.insert("acc-1".to_string(), all_flows());
    let service = service(
        vec![
            fiat_account("acc-1", dec!(1000), dec!(1075)),
            fiat_account("acc-2", dec!(400), dec!(390)),
        ],
        vec![],
        totals,
        vec![],
    );

    let report = service.account_report().unwrap();
    assert_eq!(report.len(), 2);

    let row1 = report.iter().find(|r| r.id == "acc-1").unwrap();
    assert_eq!(row1.expected_balance, dec!(1075));
    assert_eq!(row1.discrepancy, dec!(0));

    let row2 = report.iter().find(|r| r.id == "acc-2").unwrap();
    assert_eq!(row2.expected_balance, dec!(400));
    assert_eq!(row2.discrepancy, dec!(-10));
    assert_eq!(row2.totals, AccountFlowTotals::default());
}

#[test]
fn test_investment_summary_pnl() {
    let account = InvestmentAccount {
        id: "inv-1".to_string(),
        name: "exchange".to_string(),
        description: None,
        kind: InvestmentAccountKind::Crypto,
        currency: "USD".to_string(),
        balance: dec!(1200),
        capital: dec!(800),
        starting_capital: dec!(500),
        created_at: Utc::now().naive_utc(),
    };

    let summary = summarize_investment(&account);
    assert_eq!(summary.pnl, dec!(400));
    assert_eq!(summary.pnl_percent, dec!(50));
}

#[test]
fn test_investment_summary_zero_capital_has_zero_percent() {
    let account = InvestmentAccount {
        id: "inv-1".to_string(),
        name: "exchange".to_string(),
        description: None,
        kind: InvestmentAccountKind::Broker,
        currency: "USD".to_string(),
        balance: dec!(50),
        capital: dec!(0),
        starting_capital: dec!(0),
        created_at: Utc::now().naive_utc(),
    };

    let summary = summarize_investment(&account);
    assert_eq!(summary.pnl, dec!(50));
    assert_eq!(summary.pnl_percent, dec!(0));
}

#[test]
fn test_debts_by_debtor_nets_lent_against_received() {
    let service = service(
        vec![],
        vec![],
        HashMap::new(),
        vec![
            debt("deb-1", "Alex", dec!(100), true),
            debt("deb-1", "Alex", dec!(40), false),
            debt("deb-2", "Sam", dec!(25), true),
        ],
    );

    let positions = service.debts_by_debtor().unwrap();
    assert_eq!(positions.len(), 2);

    let alex = positions.iter().find(|p| p.debtor_id == "deb-1").unwrap();
    assert_eq!(alex.total_lent, dec!(100));
    assert_eq!(alex.total_received, dec!(40));
    assert_eq!(alex.net_owed, dec!(60));
    assert_eq!(alex.transaction_count, 2);

    let sam = positions.iter().find(|p| p.debtor_id == "deb-2").unwrap();
    assert_eq!(sam.net_owed, dec!(25));
    assert_eq!(sam.transaction_count, 1);
}
