// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::aggregate::{
    accumulated_prior_balance, daily_average, month_transactions, month_view, monthly_totals,
    recurring_summary, synthesize_recurring, synthesized_id,
};
use fintrack::models::{Category, Transaction, TransactionKind};
use fintrack::period::YearMonth;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn ym(y: i32, m: u32) -> YearMonth {
    YearMonth::new(y, m).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(id: &str, kind: TransactionKind, amount: Decimal, on: NaiveDate, recurring: bool) -> Transaction {
    let category = match kind {
        TransactionKind::Income => Category::Salary,
        TransactionKind::Expense => Category::Food,
    };
    Transaction {
        id: id.to_string(),
        description: format!("txn {}", id),
        amount,
        kind,
        category,
        occurred_at: on,
        is_recurring: recurring,
    }
}

fn january_ledger() -> Vec<Transaction> {
    vec![
        txn("r1", TransactionKind::Income, dec!(500), date(2024, 1, 5), true),
        txn("e1", TransactionKind::Expense, dec!(300), date(2024, 1, 10), false),
        txn("i1", TransactionKind::Income, dec!(1000), date(2024, 1, 2), false),
    ]
}

/// Reference: filter by month and sum signed amounts in one pass.
fn direct_balance(all: &[Transaction], month: YearMonth) -> Decimal {
    all.iter()
        .filter(|t| month.contains(t.occurred_at))
        .map(|t| t.signed_amount())
        .sum()
}

#[test]
fn future_month_projects_recurring_only() {
    let all = january_ledger();
    let txns = month_transactions(&all, ym(2024, 3), ym(2024, 1));
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].id, "recurring-r1-2024-3");
    assert_eq!(txns[0].occurred_at, date(2024, 3, 5));

    let totals = monthly_totals(&txns);
    assert_eq!(totals.income, dec!(500));
    assert_eq!(totals.expenses, Decimal::ZERO);
    assert_eq!(totals.balance, dec!(500));
}

#[test]
fn prior_balance_counts_every_stored_transaction_once() {
    let all = january_ledger();
    // 1000 - 300 plus the stored January instance of the recurring income.
    assert_eq!(accumulated_prior_balance(&all, ym(2024, 3)), dec!(1200));
    assert_eq!(accumulated_prior_balance(&all, ym(2024, 1)), Decimal::ZERO);
    assert_eq!(accumulated_prior_balance(&all, ym(2024, 2)), dec!(1200));
}

#[test]
fn prior_balance_of_one_time_entries() {
    let all = vec![
        txn("i1", TransactionKind::Income, dec!(1000), date(2024, 1, 2), false),
        txn("e1", TransactionKind::Expense, dec!(300), date(2024, 1, 10), false),
    ];
    assert_eq!(accumulated_prior_balance(&all, ym(2024, 3)), dec!(700));
}

#[test]
fn prior_balance_uses_calendar_order_and_ignores_input_order() {
    let mut all = vec![
        txn("a", TransactionKind::Income, dec!(10), date(2023, 12, 31), false),
        txn("b", TransactionKind::Expense, dec!(4), date(2023, 2, 1), false),
        txn("c", TransactionKind::Income, dec!(100), date(2024, 2, 1), false),
        txn("d", TransactionKind::Income, dec!(7.25), date(2024, 1, 31), false),
    ];
    let forward = accumulated_prior_balance(&all, ym(2024, 2));
    all.reverse();
    let backward = accumulated_prior_balance(&all, ym(2024, 2));
    assert_eq!(forward, dec!(13.25));
    assert_eq!(forward, backward);
    // "2024-10" sorts before "2024-9" as text; as months it does not.
    assert_eq!(accumulated_prior_balance(&all, ym(2024, 10)), dec!(113.25));
}

#[test]
fn past_and_current_months_do_not_synthesize() {
    let all = january_ledger();
    assert!(month_transactions(&all, ym(2024, 2), ym(2024, 2)).is_empty());
    assert!(month_transactions(&all, ym(2023, 12), ym(2024, 2)).is_empty());
    let jan = month_transactions(&all, ym(2024, 1), ym(2024, 1));
    let ids: Vec<_> = jan.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "e1", "i1"]);
}

#[test]
fn future_month_keeps_real_future_dated_entries() {
    let all = vec![
        txn("later", TransactionKind::Expense, dec!(80), date(2024, 6, 3), false),
        txn("other", TransactionKind::Expense, dec!(5), date(2024, 7, 3), false),
    ];
    let june = month_transactions(&all, ym(2024, 6), ym(2024, 1));
    assert_eq!(june.len(), 1);
    assert_eq!(june[0].id, "later");
    assert!(month_transactions(&all, ym(2024, 8), ym(2024, 1)).is_empty());
}

#[test]
fn template_dated_in_target_month_is_not_duplicated() {
    let all = vec![txn("r", TransactionKind::Expense, dec!(50), date(2024, 5, 1), true)];
    let may = month_transactions(&all, ym(2024, 5), ym(2024, 1));
    assert_eq!(may.len(), 1);
    assert_eq!(may[0].id, "r");
}

#[test]
fn synthesized_ids_are_distinct_across_months() {
    let all = vec![txn("t", TransactionKind::Income, dec!(20), date(2024, 1, 15), true)];
    let mut ids = Vec::new();
    for m in 2..=12 {
        let txns = synthesize_recurring(&all, ym(2024, m));
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].occurred_at, date(2024, m, 15));
        assert_eq!(txns[0].amount, dec!(20));
        assert_eq!(txns[0].kind, TransactionKind::Income);
        assert_eq!(txns[0].category, Category::Salary);
        assert!(txns[0].is_recurring);
        ids.push(txns[0].id.clone());
    }
    ids.push(synthesized_id("t", ym(2025, 2)));
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());
    assert!(!ids.contains(&"t".to_string()));
}

#[test]
fn day_31_template_clamps_to_month_end() {
    let all = vec![txn("rent", TransactionKind::Expense, dec!(900), date(2024, 1, 31), true)];
    assert_eq!(synthesize_recurring(&all, ym(2024, 2))[0].occurred_at, date(2024, 2, 29));
    assert_eq!(synthesize_recurring(&all, ym(2025, 2))[0].occurred_at, date(2025, 2, 28));
    assert_eq!(synthesize_recurring(&all, ym(2024, 4))[0].occurred_at, date(2024, 4, 30));
    assert_eq!(synthesize_recurring(&all, ym(2024, 5))[0].occurred_at, date(2024, 5, 31));
}

#[test]
fn synthesis_follows_template_order() {
    let all = vec![
        txn("b", TransactionKind::Expense, dec!(1), date(2024, 1, 1), true),
        txn("x", TransactionKind::Expense, dec!(1), date(2024, 1, 1), false),
        txn("a", TransactionKind::Income, dec!(1), date(2024, 1, 1), true),
    ];
    let ids: Vec<_> = synthesize_recurring(&all, ym(2024, 4))
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["recurring-b-2024-4", "recurring-a-2024-4"]);
}

#[test]
fn no_templates_means_empty_projection() {
    let all = vec![txn("x", TransactionKind::Income, dec!(9), date(2024, 1, 1), false)];
    let txns = month_transactions(&all, ym(2024, 9), ym(2024, 1));
    assert!(txns.is_empty());
    let totals = monthly_totals(&txns);
    assert_eq!(totals.balance, Decimal::ZERO);
}

#[test]
fn pipeline_agrees_with_direct_sum() {
    let all = vec![
        txn("1", TransactionKind::Income, dec!(12.40), date(2024, 3, 1), false),
        txn("2", TransactionKind::Expense, dec!(0.10), date(2024, 3, 31), true),
        txn("3", TransactionKind::Expense, dec!(99.99), date(2024, 4, 1), false),
        txn("4", TransactionKind::Income, dec!(0), date(2024, 2, 29), false),
    ];
    for m in [ym(2024, 2), ym(2024, 3), ym(2024, 4)] {
        let totals = monthly_totals(&month_transactions(&all, m, ym(2024, 4)));
        assert_eq!(totals.balance, totals.income - totals.expenses);
        assert_eq!(totals.balance, direct_balance(&all, m));
    }
}

#[test]
fn repeated_calls_are_identical() {
    let all = january_ledger();
    let a = month_transactions(&all, ym(2024, 7), ym(2024, 1));
    let b = month_transactions(&all, ym(2024, 7), ym(2024, 1));
    assert_eq!(a, b);
    assert_eq!(monthly_totals(&a), monthly_totals(&b));
}

#[test]
fn deleting_an_entry_moves_totals_by_its_signed_amount() {
    let all = january_ledger();
    let before = monthly_totals(&month_transactions(&all, ym(2024, 1), ym(2024, 1)));
    let removed = all[1].clone();
    let rest: Vec<_> = all.iter().filter(|t| t.id != removed.id).cloned().collect();
    let after = monthly_totals(&month_transactions(&rest, ym(2024, 1), ym(2024, 1)));
    assert_eq!(rest.len(), all.len() - 1);
    assert_eq!(before.balance - after.balance, removed.signed_amount());
    assert_eq!(before.expenses - after.expenses, removed.amount);
}

#[test]
fn month_view_carries_opening_into_closing() {
    let all = january_ledger();
    let view = month_view(&all, ym(2024, 3), ym(2024, 1));
    assert!(view.projected);
    assert_eq!(view.opening_balance, dec!(1200));
    assert_eq!(view.totals.balance, dec!(500));
    assert_eq!(view.closing_balance, dec!(1700));
    assert_eq!(view.recurring.income_count, 1);
    assert_eq!(view.recurring.expense_count, 0);

    let current = month_view(&all, ym(2024, 1), ym(2024, 1));
    assert!(!current.projected);
    assert_eq!(current.opening_balance, Decimal::ZERO);
    assert_eq!(current.closing_balance, dec!(1200));
}

#[test]
fn recurring_summary_nets_templates() {
    let all = vec![
        txn("s", TransactionKind::Income, dec!(3000), date(2024, 1, 5), true),
        txn("r", TransactionKind::Expense, dec!(1200.50), date(2024, 1, 1), true),
        txn("o", TransactionKind::Expense, dec!(40), date(2024, 1, 8), false),
    ];
    let s = recurring_summary(&all);
    assert_eq!(s.count, 2);
    assert_eq!(s.monthly_net, dec!(1799.50));
}

#[test]
fn daily_average_uses_absolute_balance() {
    assert_eq!(daily_average(dec!(-100), 4), dec!(25));
    assert_eq!(daily_average(dec!(30), 0), dec!(30));
}

#[test]
fn extreme_amounts_saturate_instead_of_panicking() {
    let all = vec![
        txn("a", TransactionKind::Income, Decimal::MAX, date(2024, 1, 3), true),
        txn("b", TransactionKind::Income, Decimal::MAX, date(2024, 1, 4), true),
    ];
    let totals = monthly_totals(&month_transactions(&all, ym(2024, 1), ym(2024, 1)));
    assert_eq!(totals.income, Decimal::MAX);
    assert_eq!(totals.balance, Decimal::MAX);
    assert_eq!(recurring_summary(&all).monthly_net, Decimal::MAX);
    assert_eq!(accumulated_prior_balance(&all, ym(2024, 2)), Decimal::MAX);

    let view = month_view(&all, ym(2024, 4), ym(2024, 1));
    assert_eq!(view.opening_balance, Decimal::MAX);
    assert_eq!(view.totals.income, Decimal::MAX);
    assert_eq!(view.closing_balance, Decimal::MAX);

    let costs = vec![
        txn("x", TransactionKind::Expense, Decimal::MAX, date(2023, 12, 4), false),
        txn("y", TransactionKind::Expense, Decimal::MAX, date(2023, 12, 5), false),
    ];
    assert_eq!(accumulated_prior_balance(&costs, ym(2024, 1)), Decimal::MIN);
    assert_eq!(monthly_totals(&costs).balance, Decimal::MIN);
}
