// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly totals, carried-forward balances and recurring projections.
//!
//! Every function here is pure: it takes a snapshot of the collection plus the
//! months involved and never touches storage.

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::period::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Id of the projected copy of `template_id` in `month`.
pub fn synthesized_id(template_id: &str, month: YearMonth) -> String {
    format!("recurring-{}-{}-{}", template_id, month.year(), month.month())
}

/// One projected copy of every recurring template, placed on the template's
/// day-of-month (clamped to the month's last day).
pub fn synthesize_recurring(all: &[Transaction], month: YearMonth) -> Vec<Transaction> {
    all.iter()
        .filter(|t| t.is_recurring)
        .map(|t| project(t, month))
        .collect()
}

fn project(template: &Transaction, month: YearMonth) -> Transaction {
    Transaction {
        id: synthesized_id(&template.id, month),
        description: template.description.clone(),
        amount: template.amount,
        kind: template.kind,
        category: template.category,
        occurred_at: month.day_clamped(template.occurred_at.day()),
        is_recurring: true,
    }
}

/// Entries relevant to `month`, in collection order.
///
/// Past and current months only see stored transactions dated in the month.
/// Months after `current` additionally get a projected copy of each recurring
/// template, except templates whose own date already falls in that month.
pub fn month_transactions(
    all: &[Transaction],
    month: YearMonth,
    current: YearMonth,
) -> Vec<Transaction> {
    let future = month > current;
    let mut out = Vec::new();
    for t in all {
        if t.month() == month {
            out.push(t.clone());
        } else if future && t.is_recurring {
            out.push(project(t, month));
        }
    }
    out
}

/// Sums saturate at the `Decimal` bounds rather than overflow.
pub fn monthly_totals(txns: &[Transaction]) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for t in txns {
        match t.kind {
            TransactionKind::Income => totals.income = totals.income.saturating_add(t.amount),
            TransactionKind::Expense => {
                totals.expenses = totals.expenses.saturating_add(t.amount)
            }
        }
    }
    totals.balance = totals.income.saturating_sub(totals.expenses);
    totals
}

/// Net of every stored transaction dated before the first day of `month`.
pub fn accumulated_prior_balance(all: &[Transaction], month: YearMonth) -> Decimal {
    let start = month.first_day();
    all.iter()
        .filter(|t| t.occurred_at < start)
        .map(Transaction::signed_amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RecurringSummary {
    pub count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    /// Income minus expenses of all recurring templates.
    pub monthly_net: Decimal,
}

pub fn recurring_summary(all: &[Transaction]) -> RecurringSummary {
    let mut summary = RecurringSummary::default();
    for t in all.iter().filter(|t| t.is_recurring) {
        summary.count += 1;
        match t.kind {
            TransactionKind::Income => summary.income_count += 1,
            TransactionKind::Expense => summary.expense_count += 1,
        }
        summary.monthly_net = summary.monthly_net.saturating_add(t.signed_amount());
    }
    summary
}

/// |balance| spread over the elapsed days of the month; day 0 counts as 1.
pub fn daily_average(balance: Decimal, day_of_month: u32) -> Decimal {
    balance.abs() / Decimal::from(day_of_month.max(1))
}

/// Everything the month screen shows for one selected month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub month: YearMonth,
    pub projected: bool,
    pub opening_balance: Decimal,
    pub totals: MonthlyTotals,
    pub closing_balance: Decimal,
    pub recurring: RecurringSummary,
    pub transactions: Vec<Transaction>,
}

pub fn month_view(all: &[Transaction], month: YearMonth, current: YearMonth) -> MonthView {
    let transactions = month_transactions(all, month, current);
    let totals = monthly_totals(&transactions);
    let opening_balance = accumulated_prior_balance(all, month);
    MonthView {
        month,
        projected: month > current,
        opening_balance,
        totals,
        closing_balance: opening_balance.saturating_add(totals.balance),
        recurring: recurring_summary(all),
        transactions,
    }
}
