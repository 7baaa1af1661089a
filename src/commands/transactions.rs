// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::LedgerStore;
use crate::models::{Category, NewTransaction, Transaction, TransactionKind};
use crate::notify::{Notice, Notifier};
use crate::period::Clock;
use crate::store::KeyValueStore;
use crate::utils::{fmt_signed, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{bail, Result};

pub fn handle<S: KeyValueStore>(
    ledger: &mut LedgerStore<S>,
    m: &clap::ArgMatches,
    clock: &dyn Clock,
    notifier: &dyn Notifier,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let txn = ledger.add(draft_from(sub, clock)?)?;
            notifier.notify(&Notice::added(&txn));
            println!("id: {}", txn.id);
        }
        Some(("edit", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let Some(existing) = ledger.get(id) else {
                bail!("Transaction '{}' not found", id);
            };
            let txn = apply_edit(existing, sub)?;
            let txn = ledger.update(txn)?;
            notifier.notify(&Notice::updated(&txn));
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let removed = ledger.delete(id)?;
            notifier.notify(&Notice::removed(&removed));
        }
        Some(("clear", sub)) => {
            if !sub.get_flag("yes") {
                bail!("Refusing to remove all transactions without --yes");
            }
            let count = ledger.clear()?;
            notifier.notify(&Notice::cleared(count));
        }
        Some(("list", sub)) => list(ledger.transactions(), sub)?,
        _ => {}
    }
    Ok(())
}

/// Validated form input for `add`; the date defaults to today.
pub fn draft_from(sub: &clap::ArgMatches, clock: &dyn Clock) -> Result<NewTransaction> {
    let description = sub.get_one::<String>("description").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = TransactionKind::parse(sub.get_one::<String>("type").unwrap())?;
    let category = Category::parse(kind, sub.get_one::<String>("category").unwrap())?;
    let occurred_at = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => clock.today(),
    };
    let draft = NewTransaction {
        description,
        amount,
        kind,
        category,
        occurred_at,
        is_recurring: sub.get_flag("recurring"),
    };
    draft.validate()?;
    Ok(draft)
}

/// Full replacement record: `existing` with the fields given on the command line.
pub fn apply_edit(existing: &Transaction, sub: &clap::ArgMatches) -> Result<Transaction> {
    let mut txn = existing.clone();
    if let Some(d) = sub.get_one::<String>("description") {
        txn.description = d.trim().to_string();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        txn.amount = parse_decimal(a)?;
    }
    let kind_changed = match sub.get_one::<String>("type") {
        Some(k) => {
            let kind = TransactionKind::parse(k)?;
            let changed = kind != txn.kind;
            txn.kind = kind;
            changed
        }
        None => false,
    };
    match sub.get_one::<String>("category") {
        Some(c) => txn.category = Category::parse(txn.kind, c)?,
        // Switching type without a category leaves nothing valid to keep.
        None if kind_changed => bail!("--category is required when changing --type"),
        None => {}
    }
    if let Some(d) = sub.get_one::<String>("date") {
        txn.occurred_at = parse_date(d)?;
    }
    if let Some(r) = sub.get_one::<bool>("recurring") {
        txn.is_recurring = *r;
    }
    Ok(txn)
}

fn list(all: &[Transaction], sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(all, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Amount", "Recurring"],
                data.iter().map(row_cells).collect(),
            )
        );
    }
    Ok(())
}

pub fn row_cells(t: &Transaction) -> Vec<String> {
    vec![
        t.id.clone(),
        t.occurred_at.to_string(),
        t.description.clone(),
        t.category.to_string(),
        fmt_signed(&t.signed_amount()),
        if t.is_recurring { "monthly".into() } else { String::new() },
    ]
}

/// Stored transactions matching `--month` / `--limit`, in collection order.
pub fn query_rows(all: &[Transaction], sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(all
        .iter()
        .filter(|t| month.is_none_or(|m| t.month() == m))
        .take(limit)
        .cloned()
        .collect())
}
