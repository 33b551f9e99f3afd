//! Shared constructors for unit tests.

use crate::{System, Week};
use chrono::NaiveDate;

/// Calendar date from parts, panicking on invalid input.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Validated week from parts, panicking on invalid input.
pub(crate) fn week(year: i32, week: i32, system: System) -> Week {
    Week::new(year, week, system).unwrap()
}
