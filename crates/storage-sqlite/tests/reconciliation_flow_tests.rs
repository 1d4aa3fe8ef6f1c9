//! End-to-end reconciliation flows: expected balances replayed from a real
//! transaction log, flow totals, and period sums.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use fintrack_core::accounts::{
    AccountRepositoryTrait, InvestmentAccountKind, InvestmentAccountRepositoryTrait,
};
use fintrack_core::categories::CategoryRepositoryTrait;
use fintrack_core::debtors::DebtorRepositoryTrait;
use fintrack_core::ledger::{
    LedgerRepositoryTrait, MovementKind, NewIncome, NewInvestmentMovement, NewTransfer,
};
use fintrack_core::reconciliation::{ReconciliationService, ReconciliationServiceTrait};
use fintrack_storage_sqlite::accounts::{AccountRepository, InvestmentAccountRepository};
use fintrack_storage_sqlite::categories::CategoryRepository;
use fintrack_storage_sqlite::debtors::DebtorRepository;
use fintrack_storage_sqlite::ledger::LedgerRepository;

struct World {
    accounts: Arc<AccountRepository>,
    investments: Arc<InvestmentAccountRepository>,
    categories: Arc<CategoryRepository>,
    ledger: Arc<LedgerRepository>,
    reconciliation: ReconciliationService,
}

fn world(db: &common::TestDb) -> World {
    let accounts = Arc::new(AccountRepository::new(
        Arc::clone(&db.pool),
        db.writer.clone(),
    ));
    let investments = Arc::new(InvestmentAccountRepository::new(
        Arc::clone(&db.pool),
        db.writer.clone(),
    ));
    let categories = Arc::new(CategoryRepository::new(
        Arc::clone(&db.pool),
        db.writer.clone(),
    ));
    let ledger = Arc::new(LedgerRepository::new(
        Arc::clone(&db.pool),
        db.writer.clone(),
    ));
    let reconciliation = ReconciliationService::new(
        ledger.clone(),
        accounts.clone(),
        investments.clone(),
    );
    World {
        accounts,
        investments,
        categories,
        ledger,
        reconciliation,
    }
}

#[tokio::test]
async fn test_expected_balance_replays_every_flow_kind() {
    let db = common::setup();
    let w = world(&db);
    let account = w
        .accounts
        .create(common::new_account("checking", dec!(1000), dec!(1050)))
        .await
        .unwrap();
    let other = w
        .accounts
        .create(common::new_account("savings", dec!(500), dec!(500)))
        .await
        .unwrap();
    let category = w
        .categories
        .create(common::new_category("Groceries"))
        .await
        .unwrap();
    let investment = w
        .investments
        .create(common::new_investment_account(
            "exchange",
            InvestmentAccountKind::Crypto,
            dec!(0),
            dec!(0),
        ))
        .await
        .unwrap();

    w.ledger
        .insert_income(common::new_income(&account.id, dec!(500)))
        .await
        .unwrap();
    w.ledger
        .insert_expense(common::new_expense(&account.id, &category.id, dec!(200)))
        .await
        .unwrap();
    w.ledger
        .insert_investment_movement(NewInvestmentMovement {
            date: None,
            description: "buy".to_string(),
            amount: dec!(300),
            investment_account_id: investment.id.clone(),
            kind: MovementKind::Deposit,
            source_account_id: account.id.clone(),
        })
        .await
        .unwrap();
    w.ledger
        .insert_investment_movement(NewInvestmentMovement {
            date: None,
            description: "sell".to_string(),
            amount: dec!(100),
            investment_account_id: investment.id.clone(),
            kind: MovementKind::Withdrawal,
            source_account_id: account.id.clone(),
        })
        .await
        .unwrap();
    w.ledger
        .insert_transfer(NewTransfer {
            date: None,
            description: None,
            source_account_id: account.id.clone(),
            source_amount: dec!(50),
            dest_account_id: other.id.clone(),
            dest_amount: dec!(50),
            exchange_rate: None,
        })
        .await
        .unwrap();
    w.ledger
        .insert_transfer(NewTransfer {
            date: None,
            description: None,
            source_account_id: other.id.clone(),
            source_amount: dec!(25),
            dest_account_id: account.id.clone(),
            dest_amount: dec!(25),
            exchange_rate: None,
        })
        .await
        .unwrap();

    // 1000 + 500 - 200 - 300 + 100 - 50 + 25
    assert_eq!(
        w.reconciliation.expected_balance(&account.id).unwrap(),
        dec!(1075)
    );
    // Real balance 1050: 25 missing.
    assert_eq!(
        w.reconciliation.discrepancy(&account.id).unwrap(),
        dec!(-25)
    );
    // The counterparty account saw one transfer out and one in.
    assert_eq!(
        w.reconciliation.expected_balance(&other.id).unwrap(),
        dec!(525)
    );
}

#[tokio::test]
async fn test_account_with_no_transactions_expects_starting_balance() {
    let db = common::setup();
    let w = world(&db);
    let account = w
        .accounts
        .create(common::new_account("untouched", dec!(750), dec!(750)))
        .await
        .unwrap();

    assert_eq!(
        w.reconciliation.expected_balance(&account.id).unwrap(),
        dec!(750)
    );
    assert_eq!(w.reconciliation.discrepancy(&account.id).unwrap(), dec!(0));

    let report = w.reconciliation.account_report().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].expected_balance, dec!(750));
}

#[tokio::test]
async fn test_transactions_on_one_account_leave_others_untouched() {
    let db = common::setup();
    let w = world(&db);
    let busy = w
        .accounts
        .create(common::new_account("busy", dec!(0), dec!(0)))
        .await
        .unwrap();
    let idle = w
        .accounts
        .create(common::new_account("idle", dec!(300), dec!(300)))
        .await
        .unwrap();

    w.ledger
        .insert_income(common::new_income(&busy.id, dec!(900)))
        .await
        .unwrap();

    assert_eq!(
        w.reconciliation.expected_balance(&busy.id).unwrap(),
        dec!(900)
    );
    assert_eq!(
        w.reconciliation.expected_balance(&idle.id).unwrap(),
        dec!(300)
    );
}

#[tokio::test]
async fn test_monthly_and_ytd_sums_respect_period_bounds() {
    let db = common::setup();
    let w = world(&db);
    let account = w
        .accounts
        .create(common::new_account("checking", dec!(0), dec!(0)))
        .await
        .unwrap();

    let march = NaiveDate::from_ymd_opt(2026, 3, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let april = NaiveDate::from_ymd_opt(2026, 4, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let last_year = NaiveDate::from_ymd_opt(2025, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();

    for (date, amount) in [(march, dec!(100)), (april, dec!(40)), (last_year, dec!(7))] {
        w.ledger
            .insert_income(NewIncome {
                date: Some(date),
                ..common::new_income(&account.id, amount)
            })
            .await
            .unwrap();
    }

    assert_eq!(w.ledger.monthly_income_sum(2026, 3).unwrap(), dec!(100));
    // April 1st midnight lands in April, not March.
    assert_eq!(w.ledger.monthly_income_sum(2026, 4).unwrap(), dec!(40));
    assert_eq!(w.ledger.monthly_income_sum(2026, 5).unwrap(), dec!(0));

    let ytd = w.ledger.ytd_totals(2026).unwrap();
    assert_eq!(ytd.income, dec!(140));
    assert_eq!(ytd.expenses, dec!(0));
}

#[tokio::test]
async fn test_investment_summary_reads_live_capital() {
    let db = common::setup();
    let w = world(&db);
    let account = w
        .accounts
        .create(common::new_account("checking", dec!(0), dec!(0)))
        .await
        .unwrap();
    let investment = w
        .investments
        .create(common::new_investment_account(
            "broker",
            InvestmentAccountKind::Broker,
            dec!(0),
            dec!(1000),
        ))
        .await
        .unwrap();

    w.ledger
        .insert_investment_movement(NewInvestmentMovement {
            date: None,
            description: "buy".to_string(),
            amount: dec!(500),
            investment_account_id: investment.id.clone(),
            kind: MovementKind::Deposit,
            source_account_id: account.id.clone(),
        })
        .await
        .unwrap();
    w.investments
        .update_balance(&investment.id, dec!(1800))
        .await
        .unwrap();

    let summary = w.reconciliation.investment_summary().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].capital, dec!(1500));
    assert_eq!(summary[0].pnl, dec!(300));
    assert_eq!(summary[0].pnl_percent, dec!(20));
}

#[tokio::test]
async fn test_yearly_income_summary_groups_by_month() {
    let db = common::setup();
    let w = world(&db);
    let account = w
        .accounts
        .create(common::new_account("checking", dec!(0), dec!(0)))
        .await
        .unwrap();

    let dates = [
        (2026, 3, 10, dec!(100)),
        (2026, 3, 20, dec!(50)),
        (2026, 7, 1, dec!(400)),
        (2025, 12, 31, dec!(9)),
    ];
    for (year, month, day, amount) in dates {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        w.ledger
            .insert_income(NewIncome {
                date: Some(date),
                ..common::new_income(&account.id, amount)
            })
            .await
            .unwrap();
    }

    let summary = w.ledger.yearly_income_summary(2026).unwrap();
    // Months without income produce no row; the rest come out in order.
    assert_eq!(summary.len(), 2);
    assert_eq!((summary[0].month, summary[0].total_income), (3, dec!(150)));
    assert_eq!((summary[1].month, summary[1].total_income), (7, dec!(400)));
    assert!(summary.iter().all(|m| m.year == 2026));
}

#[tokio::test]
async fn test_lend_then_repay_restores_balance_and_clears_debt() {
    let db = common::setup();
    let w = world(&db);
    let debtors = DebtorRepository::new(Arc::clone(&db.pool), db.writer.clone());

    let account = w
        .accounts
        .create(common::new_account("checking", dec!(1000), dec!(1000)))
        .await
        .unwrap();
    let category = w
        .categories
        .create(common::new_category("Shared"))
        .await
        .unwrap();
    let debtor = debtors.create(common::new_debtor("alex")).await.unwrap();

    // Lending: money leaves the account as an expense, tracked as an
    // outbound debt against the debtor.
    w.ledger
        .insert_expense_with_debt(
            common::new_expense(&account.id, &category.id, dec!(100)),
            common::new_debt(&debtor.id, dec!(100), true),
        )
        .await
        .unwrap();

    let positions = w.reconciliation.debts_by_debtor().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].net_owed, dec!(100));
    assert_eq!(
        w.reconciliation.expected_balance(&account.id).unwrap(),
        dec!(900)
    );

    // Repayment: the money comes back as income, with an inbound debt
    // entry netting the position out.
    w.ledger
        .insert_debt_repayment(
            common::new_income(&account.id, dec!(100)),
            common::new_debt(&debtor.id, dec!(100), false),
        )
        .await
        .unwrap();

    let positions = w.reconciliation.debts_by_debtor().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].net_owed, dec!(0));
    assert_eq!(positions[0].total_lent, dec!(100));
    assert_eq!(positions[0].total_received, dec!(100));
    assert_eq!(positions[0].transaction_count, 2);
    assert_eq!(
        w.reconciliation.expected_balance(&account.id).unwrap(),
        dec!(1000)
    );
}
