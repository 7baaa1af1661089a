// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use serde::Serialize;

use crate::models::{Transaction, TransactionKind};
use crate::utils::fmt_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Destructive,
    Warning,
}

/// User-facing message emitted after a ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, description: String) -> Self {
        Self {
            level,
            title: title.to_string(),
            description,
        }
    }

    pub fn added(txn: &Transaction) -> Self {
        let what = match txn.kind {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        Self::new(
            NoticeLevel::Success,
            "Transaction added",
            format!("{} of {} was recorded.", what, fmt_money(&txn.amount)),
        )
    }

    pub fn updated(txn: &Transaction) -> Self {
        Self::new(
            NoticeLevel::Success,
            "Transaction updated",
            format!("Changes to '{}' were saved.", txn.description),
        )
    }

    pub fn removed(txn: &Transaction) -> Self {
        Self::new(
            NoticeLevel::Destructive,
            "Transaction removed",
            format!("'{}' was deleted.", txn.description),
        )
    }

    pub fn cleared(count: usize) -> Self {
        Self::new(
            NoticeLevel::Success,
            "Data cleared",
            format!("All {} transactions were removed.", count),
        )
    }

    pub fn recovered(diagnostic: &str) -> Self {
        Self::new(
            NoticeLevel::Warning,
            "Stored data could not be read",
            format!("Starting with an empty ledger ({}).", diagnostic),
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Warnings go to stderr, everything else to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Destructive => println!("{}", notice),
            NoticeLevel::Warning => eprintln!("warning: {}", notice),
        }
    }
}
