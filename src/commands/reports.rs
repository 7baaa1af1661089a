// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    daily_average, month_transactions, month_view, monthly_totals, recurring_summary, MonthView,
    MonthlyTotals, RecurringSummary,
};
use crate::commands::transactions::row_cells;
use crate::models::Transaction;
use crate::period::{Clock, YearMonth};
use crate::utils::{fmt_money, fmt_signed, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle_month(all: &[Transaction], sub: &clap::ArgMatches, clock: &dyn Clock) -> Result<()> {
    let view = month_report(all, sub, clock)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let status = if view.projected { "Projection" } else { "Actual" };
    println!("{} ({})", view.month, status);
    let income_label = if view.projected { "Recurring income" } else { "Income" };
    let expense_label = if view.projected { "Recurring costs" } else { "Expenses" };
    println!(
        "{}",
        pretty_table(
            &["Opening", income_label, expense_label, "Closing", "Month"],
            vec![vec![
                fmt_money(&view.opening_balance),
                format!("+{}", fmt_money(&view.totals.income)),
                format!("-{}", fmt_money(&view.totals.expenses)),
                fmt_money(&view.closing_balance),
                fmt_signed(&view.totals.balance),
            ]],
        )
    );
    if view.projected && view.recurring.count == 0 {
        println!("No recurring transactions configured; add fixed income and costs to see a projection.");
    }
    if !view.transactions.is_empty() {
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Amount", "Recurring"],
                view.transactions.iter().map(row_cells).collect(),
            )
        );
    }
    Ok(())
}

/// View for `--month`, `--next N` / `--prev N` relative to the clock's current
/// month, or the current month itself.
pub fn month_report(
    all: &[Transaction],
    sub: &clap::ArgMatches,
    clock: &dyn Clock,
) -> Result<MonthView> {
    let current = clock.current_month();
    let month = if let Some(m) = sub.get_one::<String>("month") {
        parse_month(m)?
    } else if let Some(n) = sub.get_one::<u32>("next") {
        current.shift(i64::from(*n))?
    } else if let Some(n) = sub.get_one::<u32>("prev") {
        current.shift(-i64::from(*n))?
    } else {
        current
    };
    Ok(month_view(all, month, current))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub month: YearMonth,
    pub totals: MonthlyTotals,
    pub transaction_count: usize,
    pub daily_average: Decimal,
    pub recurring: RecurringSummary,
}

pub fn summary(all: &[Transaction], clock: &dyn Clock) -> Summary {
    let today = clock.today();
    let month = YearMonth::from_date(today);
    let txns = month_transactions(all, month, month);
    let totals = monthly_totals(&txns);
    Summary {
        month,
        totals,
        transaction_count: txns.len(),
        daily_average: daily_average(totals.balance, today.day()),
        recurring: recurring_summary(all),
    }
}

pub fn handle_summary(all: &[Transaction], sub: &clap::ArgMatches, clock: &dyn Clock) -> Result<()> {
    let s = summary(all, clock);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let mood = if s.totals.balance >= Decimal::ZERO {
        "in the black"
    } else {
        "watch your spending"
    };
    println!("{}: balance {} ({})", s.month, fmt_money(&s.totals.balance), mood);
    println!(
        "{}",
        pretty_table(
            &["Metric", "Value"],
            vec![
                vec!["Income".into(), fmt_money(&s.totals.income)],
                vec!["Expenses".into(), fmt_money(&s.totals.expenses)],
                vec!["Transactions".into(), s.transaction_count.to_string()],
                vec!["Average per day".into(), fmt_money(&s.daily_average)],
                vec!["Recurring configured".into(), s.recurring.count.to_string()],
                vec!["Recurring monthly value".into(), fmt_signed(&s.recurring.monthly_net)],
            ],
        )
    );
    Ok(())
}
