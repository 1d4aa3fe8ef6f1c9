// Diesel table definitions for the ledger database.
//
// Money columns are TEXT: decimal amounts are stored in their string form and
// parsed back tolerantly, never as floats.

diesel::table! {
    accounts (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        currency -> Text,
        balance -> Text,
        starting_balance -> Text,
        starting_date -> Date,
        created_at -> Timestamp,
    }
}

diesel::table! {
    investment_accounts (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        kind -> Text,
        currency -> Text,
        balance -> Text,
        capital -> Text,
        starting_capital -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    categories (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        is_essential -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    budgets (id) {
        id -> Text,
        category_id -> Text,
        amount -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    debtors (id) {
        id -> Text,
        name -> Text,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        description -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    incomes (id) {
        id -> Text,
        date -> Timestamp,
        amount -> Text,
        description -> Text,
        account_id -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    expenses (id) {
        id -> Text,
        date -> Timestamp,
        category -> Text,
        category_id -> Text,
        amount -> Text,
        description -> Text,
        method -> Text,
        original_amount -> Text,
        account_id -> Text,
        account_type -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    investment_movements (id) {
        id -> Text,
        date -> Timestamp,
        description -> Text,
        amount -> Text,
        investment_account_id -> Text,
        kind -> Text,
        source_account_id -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    transfers (id) {
        id -> Text,
        date -> Timestamp,
        description -> Nullable<Text>,
        source_account_id -> Text,
        source_amount -> Text,
        dest_account_id -> Text,
        dest_amount -> Text,
        exchange_rate -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    debts (id) {
        id -> Text,
        description -> Text,
        amount -> Text,
        debtor_id -> Text,
        debtor_name -> Text,
        date -> Timestamp,
        original_amount -> Text,
        currency -> Text,
        outbound -> Bool,
        account_id -> Nullable<Text>,
        expense_id -> Nullable<Text>,
        income_id -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    yearly_goals (id) {
        id -> Text,
        year -> Integer,
        savings_goal -> Text,
        investment_goal -> Text,
        ideal_investment -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    net_worth_snapshots (id) {
        id -> Text,
        date -> Timestamp,
        year -> Integer,
        month -> Integer,
        total_fiat_balance -> Text,
        crypto_balance -> Text,
        crypto_capital -> Text,
        broker_balance -> Text,
        broker_capital -> Text,
        total_investment_balance -> Text,
        total_investment_capital -> Text,
        total_real_net_worth -> Text,
        total_pnl -> Text,
        expected_fiat_balance -> Text,
        expected_net_worth -> Text,
        fiat_discrepancy -> Text,
        total_discrepancy -> Text,
        fiat_percent -> Text,
        crypto_percent -> Text,
        broker_percent -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    sheet_configs (target) {
        target -> Text,
        sheet -> Text,
        a1_range -> Text,
    }
}

diesel::joinable!(budgets -> categories (category_id));
diesel::joinable!(incomes -> accounts (account_id));
diesel::joinable!(expenses -> accounts (account_id));
diesel::joinable!(expenses -> categories (category_id));
diesel::joinable!(investment_movements -> investment_accounts (investment_account_id));
diesel::joinable!(debts -> debtors (debtor_id));

diesel::allow_tables_to_appear_in_same_query!(
    accounts,
    investment_accounts,
    budgets,
    categories,
    debtors,
    incomes,
    expenses,
    investment_movements,
    transfers,
    debts,
    yearly_goals,
    net_worth_snapshots,
    sheet_configs,
);
