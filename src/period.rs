// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar months and the clock used to decide which of them lie in the future.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::errors::LedgerError;

/// A calendar month. Field order makes the derived ordering a calendar ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    /// 1-based, 1..=12.
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(LedgerError::Validation(format!(
                "Invalid month {}-{:02}",
                year, month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.day_clamped(1)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.day_clamped(self.days_in_month())
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            _ => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
        }
    }

    /// Day `day` of this month, clamped into `1..=days_in_month`.
    pub fn day_clamped(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        match NaiveDate::from_ymd_opt(self.year, self.month, day) {
            Some(date) => date,
            // Constructors only admit months whose first day exists, and then every day does.
            None => unreachable!("{} has no day {}", self, day),
        }
    }

    /// The month `months` away from this one; negative values go back.
    pub fn shift(&self, months: i64) -> Result<Self, LedgerError> {
        let out_of_range =
            || LedgerError::Validation(format!("Month {} {:+} is out of range", self, months));
        let index = (i64::from(self.year) * 12 + i64::from(self.month) - 1)
            .checked_add(months)
            .ok_or_else(out_of_range)?;
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| out_of_range())?;
        let month = index.rem_euclid(12) as u32 + 1;
        Self::new(year, month).map_err(|_| out_of_range())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| {
                LedgerError::Validation(format!("Invalid month '{}', expected YYYY-MM", s))
            })?;
        Ok(Self::from_date(date))
    }
}

/// Source of "today", so month classification stays deterministic in tests.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    fn current_month(&self) -> YearMonth {
        YearMonth::from_date(self.today())
    }
}

/// Local wall-clock date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
