//! Budget service implementation.
//!
//! The report joins three read paths: configured budgets, category names,
//! and the current month's expense totals grouped by category. Keeping the
//! join here, out of the store, mirrors how expected balances are derived.

use chrono::{Datelike, Utc};
use log::warn;
use std::sync::Arc;

use super::budgets_model::{Budget, BudgetByCategory, NewBudget};
use super::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::Result;
use crate::ledger::LedgerRepositoryTrait;
use rust_decimal::Decimal;

pub struct BudgetService {
    budget_repository: Arc<dyn BudgetRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repository: Arc<dyn BudgetRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            budget_repository,
            category_repository,
            ledger_repository,
        }
    }

    /// The report for one calendar month. `budget_report` feeds it the
    /// current month; tests feed it a fixed one.
    pub fn budget_report_for(&self, year: i32, month: u32) -> Result<Vec<BudgetByCategory>> {
        let budgets = self.budget_repository.list()?;
        let spent_by_category = self
            .ledger_repository
            .monthly_expense_by_category(year, month)?;
        let names: std::collections::HashMap<String, String> = self
            .category_repository
            .list()?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut report: Vec<BudgetByCategory> = budgets
            .into_iter()
            .filter_map(|budget| match names.get(&budget.category_id) {
                Some(name) => Some(BudgetByCategory {
                    category_name: name.clone(),
                    spent: spent_by_category
                        .get(&budget.category_id)
                        .copied()
                        .unwrap_or(Decimal::ZERO),
                    category_id: budget.category_id,
                    amount: budget.amount,
                }),
                None => {
                    warn!(
                        "Budget {} references missing category {}, skipping",
                        budget.id, budget.category_id
                    );
                    None
                }
            })
            .collect();
        report.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(report)
    }
}

#[async_trait::async_trait]
impl BudgetServiceTrait for BudgetService {
    fn budget_report(&self) -> Result<Vec<BudgetByCategory>> {
        let now = Utc::now();
        self.budget_report_for(now.year(), now.month())
    }

    async fn set_budgets(&self, budgets: Vec<NewBudget>) -> Result<Vec<Budget>> {
        for budget in &budgets {
            budget.validate()?;
        }
        self.budget_repository.upsert(budgets).await
    }
}
