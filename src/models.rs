// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};
use crate::period::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(s: &str) -> LedgerResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::Validation(format!(
                "Unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => f.write_str("income"),
            TransactionKind::Expense => f.write_str("expense"),
        }
    }
}

/// Income and expense categories are disjoint; every variant belongs to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Salary,
    Freelance,
    Investments,
    Sales,
    OtherIncome,
    Food,
    Transport,
    Housing,
    Health,
    Education,
    Leisure,
    Shopping,
    OtherExpense,
}

const INCOME_CATEGORIES: [Category; 5] = [
    Category::Salary,
    Category::Freelance,
    Category::Investments,
    Category::Sales,
    Category::OtherIncome,
];

const EXPENSE_CATEGORIES: [Category; 8] = [
    Category::Food,
    Category::Transport,
    Category::Housing,
    Category::Health,
    Category::Education,
    Category::Leisure,
    Category::Shopping,
    Category::OtherExpense,
];

impl Category {
    pub fn for_kind(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Income => &INCOME_CATEGORIES,
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Category::Salary
            | Category::Freelance
            | Category::Investments
            | Category::Sales
            | Category::OtherIncome => TransactionKind::Income,
            Category::Food
            | Category::Transport
            | Category::Housing
            | Category::Health
            | Category::Education
            | Category::Leisure
            | Category::Shopping
            | Category::OtherExpense => TransactionKind::Expense,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investments => "investments",
            Category::Sales => "sales",
            Category::OtherIncome => "other_income",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Health => "health",
            Category::Education => "education",
            Category::Leisure => "leisure",
            Category::Shopping => "shopping",
            Category::OtherExpense => "other_expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investments => "Investments",
            Category::Sales => "Sales",
            Category::OtherIncome | Category::OtherExpense => "Other",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Leisure => "Leisure",
            Category::Shopping => "Shopping",
        }
    }

    // Labels written by the Portuguese-language web version of the tracker.
    fn legacy_label(&self) -> &'static str {
        match self {
            Category::Salary => "Salário",
            Category::Freelance => "Freelance",
            Category::Investments => "Investimentos",
            Category::Sales => "Vendas",
            Category::OtherIncome | Category::OtherExpense => "Outros",
            Category::Food => "Alimentação",
            Category::Transport => "Transporte",
            Category::Housing => "Moradia",
            Category::Health => "Saúde",
            Category::Education => "Educação",
            Category::Leisure => "Lazer",
            Category::Shopping => "Compras",
        }
    }

    /// Resolves a slug, English label or legacy label within the categories of `kind`.
    pub fn parse(kind: TransactionKind, s: &str) -> LedgerResult<Self> {
        let needle = s.trim();
        Category::for_kind(kind)
            .iter()
            .copied()
            .find(|c| {
                c.slug().eq_ignore_ascii_case(needle)
                    || c.label().eq_ignore_ascii_case(needle)
                    || c.legacy_label().to_lowercase() == needle.to_lowercase()
            })
            .ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Category '{}' is not a valid {} category",
                    needle, kind
                ))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredTransaction")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    #[serde(rename = "date")]
    pub occurred_at: NaiveDate,
    pub is_recurring: bool,
}

impl Transaction {
    /// Amount with the sign implied by `kind`.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.occurred_at)
    }
}

/// On-disk shape of a transaction, checked before it becomes a [`Transaction`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTransaction {
    id: String,
    description: String,
    amount: Decimal,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: String,
    date: String,
    #[serde(default)]
    is_recurring: bool,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = LedgerError;

    fn try_from(raw: StoredTransaction) -> Result<Self, Self::Error> {
        if raw.amount.is_sign_negative() && !raw.amount.is_zero() {
            return Err(LedgerError::Validation(format!(
                "Transaction {} has negative amount {}",
                raw.id, raw.amount
            )));
        }
        let category = Category::parse(raw.kind, &raw.category)?;
        let occurred_at = parse_stored_date(&raw.date)?;
        Ok(Transaction {
            id: raw.id,
            description: raw.description,
            amount: raw.amount,
            kind: raw.kind,
            category,
            occurred_at,
            is_recurring: raw.is_recurring,
        })
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, read as a local calendar date.
pub fn parse_stored_date(s: &str) -> LedgerResult<NaiveDate> {
    parse_stored_date_in(s, &Local)
}

/// Like [`parse_stored_date`], with timestamps converted into `tz` first.
pub fn parse_stored_date_in<Tz: TimeZone>(s: &str, tz: &Tz) -> LedgerResult<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(tz).date_naive())
        .map_err(|_| LedgerError::Validation(format!("Invalid transaction date '{}'", s)))
}

/// Exclusive upper bound for amounts (10^13). Two decimal places below it stay
/// within the 15 significant digits a JSON number keeps exactly, and sums of
/// such amounts stay far from `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x4E72_A000, 0x918, 0, false, 0);

fn check_amount(amount: Decimal, shown: &dyn fmt::Display) -> LedgerResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::Validation(format!(
            "Amount must not be negative: {}",
            shown
        )));
    }
    if amount >= MAX_AMOUNT {
        return Err(LedgerError::Validation(format!(
            "Amount {} must be below {}",
            shown, MAX_AMOUNT
        )));
    }
    Ok(())
}

/// Parses user input into a non-negative amount below [`MAX_AMOUNT`] with at
/// most two decimal places.
pub fn parse_amount(s: &str) -> LedgerResult<Decimal> {
    let s = s.trim();
    let amount = s
        .parse::<Decimal>()
        .map_err(|_| LedgerError::Validation(format!("Invalid amount '{}'", s)))?;
    check_amount(amount, &s)?;
    if amount.normalize().scale() > 2 {
        return Err(LedgerError::Validation(format!(
            "Amount '{}' has more than two decimal places",
            s
        )));
    }
    Ok(amount)
}

/// Form input for a transaction that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: Category,
    pub occurred_at: NaiveDate,
    pub is_recurring: bool,
}

impl NewTransaction {
    pub fn validate(&self) -> LedgerResult<()> {
        validate_fields(&self.description, self.amount, self.kind, self.category)
    }

    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            description: self.description.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            occurred_at: self.occurred_at,
            is_recurring: self.is_recurring,
        }
    }
}

pub fn validate_transaction(txn: &Transaction) -> LedgerResult<()> {
    if txn.id.trim().is_empty() {
        return Err(LedgerError::Validation("Transaction id is empty".into()));
    }
    validate_fields(&txn.description, txn.amount, txn.kind, txn.category)
}

fn validate_fields(
    description: &str,
    amount: Decimal,
    kind: TransactionKind,
    category: Category,
) -> LedgerResult<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation("Description is required".into()));
    }
    check_amount(amount, &amount)?;
    if category.kind() != kind {
        return Err(LedgerError::Validation(format!(
            "Category '{}' is not a valid {} category",
            category, kind
        )));
    }
    Ok(())
}
