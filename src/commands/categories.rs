// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, TransactionKind};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let kinds = match m.get_one::<String>("type") {
        Some(k) => vec![TransactionKind::parse(k)?],
        None => vec![TransactionKind::Income, TransactionKind::Expense],
    };
    let mut data = Vec::new();
    for kind in kinds {
        for c in Category::for_kind(kind) {
            data.push(vec![kind.to_string(), c.slug().to_string(), c.label().to_string()]);
        }
    }
    println!("{}", pretty_table(&["Type", "Key", "Category"], data));
    Ok(())
}
