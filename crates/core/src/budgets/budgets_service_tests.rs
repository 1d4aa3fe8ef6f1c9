use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::budgets_model::{Budget, NewBudget};
use super::budgets_service::BudgetService;
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::{Category, CategoryRepositoryTrait, NewCategory};
use crate::errors::Result;
use crate::ledger::{
    AccountFlowTotals, Debt, Expense, Income, InvestmentMovement, LedgerRepositoryTrait,
    MonthlyIncomeTotal, NewDebt, NewExpense, NewIncome, NewInvestmentMovement, NewTransfer, Page,
    Transfer, YtdTotals,
};

struct StubBudgetRepository {
    stored: Mutex<Vec<Budget>>,
}

#[async_trait]
impl BudgetRepositoryTrait for StubBudgetRepository {
    fn list(&self) -> Result<Vec<Budget>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn upsert(&self, budgets: Vec<NewBudget>) -> Result<Vec<Budget>> {
        let mut stored = self.stored.lock().unwrap();
        let mut results = Vec::with_capacity(budgets.len());
        for new_budget in budgets {
            match stored
                .iter_mut()
                .find(|b| b.category_id == new_budget.category_id)
            {
                Some(existing) => {
                    existing.amount = new_budget.amount;
                    results.push(existing.clone());
                }
                None => {
                    let row = Budget {
                        id: format!("budget-{}", stored.len() + 1),
                        category_id: new_budget.category_id,
                        amount: new_budget.amount,
                        created_at: Utc::now().naive_utc(),
                    };
                    stored.push(row.clone());
                    results.push(row);
                }
            }
        }
        Ok(results)
    }
}

struct StubCategoryRepository {
    categories: Vec<Category>,
}

#[async_trait]
impl CategoryRepositoryTrait for StubCategoryRepository {
    async fn create(&self, _new_category: NewCategory) -> Result<Category> {
        unimplemented!()
    }

    fn get_by_id(&self, _category_id: &str) -> Result<Category> {
        unimplemented!()
    }

    fn list(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

/// Ledger stub: only the per-category month aggregation is exercised here.
#[derive(Default)]
struct StubLedgerRepository {
    spent: HashMap<String, Decimal>,
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
        unimplemented!()
    }

    fn recent_expenses(&self, _limit: i64) -> Result<Vec<Expense>> {
        unimplemented!()
    }

    fn flow_totals(&self, _account_id: &str) -> Result<AccountFlowTotals> {
        unimplemented!()
    }

    fn flow_totals_all(&self) -> Result<HashMap<String, AccountFlowTotals>> {
        unimplemented!()
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
        Ok(self.spent.clone())
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

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        is_essential: false,
        created_at: Utc::now().naive_utc(),
    }
}

fn service(
    budgets: Vec<Budget>,
    categories: Vec<Category>,
    spent: HashMap<String, Decimal>,
) -> BudgetService {
    BudgetService::new(
        Arc::new(StubBudgetRepository {
            stored: Mutex::new(budgets),
        }),
        Arc::new(StubCategoryRepository { categories }),
        Arc::new(StubLedgerRepository { spent }),
    )
}

fn budget(category_id: &str, amount: Decimal) -> Budget {
    Budget {
        id: format!("budget-{}", category_id),
        category_id: category_id.to_string(),
        amount,
        created_at: Utc::now().naive_utc(),
    }
}

#[test]
fn test_report_pairs_budgets_with_month_spending() {
    let mut spent = HashMap::new();
    spent.insert("cat-1".to_string(), dec!(180.50));
    let service = service(
        vec![budget("cat-1", dec!(400)), budget("cat-2", dec!(120))],
        vec![
            category("cat-1", "Groceries"),
            category("cat-2", "Transport"),
        ],
        spent,
    );

    let report = service.budget_report_for(2026, 3).unwrap();
    assert_eq!(report.len(), 2);

    // Ordered by category name.
    assert_eq!(report[0].category_name, "Groceries");
    assert_eq!(report[0].amount, dec!(400));
    assert_eq!(report[0].spent, dec!(180.50));

    // No expenses that month reads as spent 0, not a missing row.
    assert_eq!(report[1].category_name, "Transport");
    assert_eq!(report[1].spent, dec!(0));
}

#[test]
fn test_report_ignores_spending_in_unbudgeted_categories() {
    let mut spent = HashMap::new();
    spent.insert("cat-2".to_string(), dec!(75));
    let service = service(
        vec![budget("cat-1", dec!(400))],
        vec![
            category("cat-1", "Groceries"),
            category("cat-2", "Transport"),
        ],
        spent,
    );

    let report = service.budget_report_for(2026, 3).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].category_id, "cat-1");
}

#[tokio::test]
async fn test_set_budgets_overwrites_per_category() {
    let service = service(
        vec![],
        vec![category("cat-1", "Groceries")],
        HashMap::new(),
    );

    service
        .set_budgets(vec![NewBudget {
            category_id: "cat-1".to_string(),
            amount: dec!(300),
        }])
        .await
        .unwrap();
    let updated = service
        .set_budgets(vec![NewBudget {
            category_id: "cat-1".to_string(),
            amount: dec!(450),
        }])
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].amount, dec!(450));

    let report = service.budget_report_for(2026, 3).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].amount, dec!(450));
}

#[tokio::test]
async fn test_set_budgets_rejects_negative_amount() {
    let service = service(vec![], vec![], HashMap::new());

    let result = service
        .set_budgets(vec![
            NewBudget {
                category_id: "cat-1".to_string(),
                amount: dec!(100),
            },
            NewBudget {
                category_id: "cat-2".to_string(),
                amount: dec!(-1),
            },
        ])
        .await;

    assert!(result.is_err());
    // The whole batch is rejected, including the valid entry.
    assert!(service.budget_report_for(2026, 3).unwrap().is_empty());
}

#[test]
fn test_zero_budget_is_allowed() {
    assert!(NewBudget {
        category_id: "cat-1".to_string(),
        amount: dec!(0),
    }
    .validate()
    .is_ok());
}
