mod consts;
mod prelude;
mod types;
mod year;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use types::System;
pub use year::Year;

use crate::types::{WND_CUTOVER_ORDINAL, check_week, check_year, date_from_ordinal, year_start};
use chrono::{Datelike, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Represents a week in the epidemiological week calendar.
/// A week is identified by its epidemiological year, its week number
/// within that year, and the numbering system the pair is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32, System)", into = "(i32, i32, System)")]
pub struct Week {
    year: i32,
    week: i32,
    system: System,
}

/// Error type for week and year construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Year outside the supported span.
    #[error("year must be in 1..9999")]
    YearOutOfRange(i32),

    /// Week number outside the valid range for its year and system.
    #[error("week must be in 1..{max} for year")]
    WeekOutOfRange { week: i32, max: i32 },

    /// Unrecognized numbering system token.
    #[error("system must be 'cdc', 'iso' or 'wnd'")]
    UnknownSystem(String),

    /// Week string too short or not numeric.
    #[error("invalid week string: {0}")]
    InvalidWeekString(String),
}

impl Week {
    /// Creates a new Week from its year, week number and system.
    ///
    /// # Errors
    /// Returns `Error::YearOutOfRange` if the year is outside `1..=9999`,
    /// or `Error::WeekOutOfRange` if the week number is outside the range
    /// the year spans under the given system.
    pub fn new(year: i32, week: i32, system: System) -> Result<Self, Error> {
        let year = check_year(year)?;
        let week = check_week(year, week, system)?;
        Ok(Self { year, week, system })
    }

    /// Creates a Week without validation. The caller must have already
    /// proven the triple valid.
    pub(crate) const fn new_unchecked(year: i32, week: i32, system: System) -> Self {
        Self { year, week, system }
    }

    /// Derives the Week containing a Gregorian date. Any time-of-day
    /// component of the value is discarded.
    ///
    /// Dates on or after 2019-11-14 are always numbered under the WND
    /// system, whatever system the caller asked for.
    ///
    /// # Errors
    /// Returns `Error::YearOutOfRange` if the derived epidemiological year
    /// falls outside `1..=9999`.
    pub fn from_date(date: impl Datelike, system: System) -> Result<Self, Error> {
        let ordinal = date.num_days_from_ce();
        let system = if ordinal >= WND_CUTOVER_ORDINAL {
            System::Wnd
        } else {
            system
        };
        let mut year = date.year();
        let mut week = (ordinal - year_start(year, system)).div_euclid(DAYS_IN_WEEK);
        if week < 0 {
            // The date precedes week 1 of its calendar year
            year -= 1;
            week = (ordinal - year_start(year, system)).div_euclid(DAYS_IN_WEEK);
        } else if week >= 52 && ordinal >= year_start(year + 1, system) {
            // The date already falls in week 1 of the next year
            year += 1;
            week = 0;
        }
        check_year(year)?;
        Ok(Self::new_unchecked(year, week + 1, system))
    }

    /// Parses a Week from `YYYYww`, `YYYYWww` or `YYYY-Www`. Characters
    /// past the week number, such as a trailing weekday digit, are
    /// ignored.
    ///
    /// # Errors
    /// Returns `Error::InvalidWeekString` if the text is too short or not
    /// numeric, and the validation errors of [`Week::new`] otherwise.
    pub fn from_string(text: &str, system: System) -> Result<Self, Error> {
        let digits: String = text
            .chars()
            .filter(|c| *c != '-' && !c.eq_ignore_ascii_case(&'w'))
            .collect();
        let invalid = || Error::InvalidWeekString(text.to_owned());
        let year = digits
            .get(0..4)
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)?;
        let week = digits
            .get(4..6)
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid)?;
        Self::new(year, week, system)
    }

    /// Derives the Week containing the current local date.
    ///
    /// # Errors
    /// Propagates the errors of [`Week::from_date`].
    pub fn this_week(system: System) -> Result<Self, Error> {
        Self::from_date(Local::now().date_naive(), system)
    }

    /// Returns the epidemiological year.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the week number within the year.
    pub const fn week(&self) -> i32 {
        self.week
    }

    /// Returns the numbering system.
    pub const fn system(&self) -> System {
        self.system
    }

    /// Returns the week as a `(year, week)` pair.
    pub const fn week_tuple(&self) -> (i32, i32) {
        (self.year, self.week)
    }

    /// Formats the week as CDC (MMWR) reports do, e.g. `201501`.
    pub fn cdc_format(&self) -> String {
        format!("{:04}{:02}", self.year, self.week)
    }

    /// Formats the week in compact ISO form, e.g. `2015W01`.
    pub fn iso_format(&self) -> String {
        format!("{:04}W{:02}", self.year, self.week)
    }

    /// Formats the week in WND form, e.g. `201947`.
    pub fn wnd_format(&self) -> String {
        format!("{:04}{:02}", self.year, self.week)
    }

    /// Day ordinal of the first day of the week.
    const fn start_ordinal(&self) -> i32 {
        year_start(self.year, self.system) + (self.week - 1) * DAYS_IN_WEEK
    }

    /// Returns the date of the first day of the week.
    pub fn start_date(&self) -> NaiveDate {
        date_from_ordinal(self.start_ordinal())
    }

    /// Returns the date of the last day of the week.
    pub fn end_date(&self) -> NaiveDate {
        date_from_ordinal(self.start_ordinal() + DAYS_IN_WEEK - 1)
    }

    /// Returns an iterator over the seven dates of the week. Each call
    /// produces a fresh iterator starting at [`Week::start_date`].
    pub fn iter_dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start_date().iter_days().take(DAYS_IN_WEEK as usize)
    }

    /// Returns the date of the given weekday within the week. The weekday
    /// follows the ISO convention (Monday first) regardless of the week's
    /// own system.
    pub fn day_date(&self, weekday: Weekday) -> NaiveDate {
        let diff = (self.system.adjustment() + weekday.num_days_from_monday() as i32)
            .rem_euclid(DAYS_IN_WEEK);
        date_from_ordinal(self.start_ordinal() + diff)
    }

    pub fn monday(&self) -> NaiveDate {
        self.day_date(Weekday::Mon)
    }

    pub fn tuesday(&self) -> NaiveDate {
        self.day_date(Weekday::Tue)
    }

    pub fn wednesday(&self) -> NaiveDate {
        self.day_date(Weekday::Wed)
    }

    pub fn thursday(&self) -> NaiveDate {
        self.day_date(Weekday::Thu)
    }

    pub fn friday(&self) -> NaiveDate {
        self.day_date(Weekday::Fri)
    }

    pub fn saturday(&self) -> NaiveDate {
        self.day_date(Weekday::Sat)
    }

    pub fn sunday(&self) -> NaiveDate {
        self.day_date(Weekday::Sun)
    }

    /// Checks whether a date falls within the week. Any time-of-day
    /// component of the value is discarded.
    pub fn contains(&self, date: impl Datelike) -> bool {
        let ordinal = date.num_days_from_ce();
        let start = self.start_ordinal();
        (start..start + DAYS_IN_WEEK).contains(&ordinal)
    }

    /// Advances the week's start date by whole weeks and re-derives the
    /// week, preferring the current system (subject to the WND cutover).
    /// Returns `None` when the result falls outside the supported span.
    pub fn checked_add_weeks(self, weeks: i32) -> Option<Self> {
        let ordinal = i64::from(self.start_ordinal()) + i64::from(weeks) * i64::from(DAYS_IN_WEEK);
        let date = NaiveDate::from_num_days_from_ce_opt(i32::try_from(ordinal).ok()?)?;
        Self::from_date(date, self.system).ok()
    }

    /// Moves the week's start date back by whole weeks. Returns `None`
    /// when the result falls outside the supported span.
    pub fn checked_sub_weeks(self, weeks: i32) -> Option<Self> {
        self.checked_add_weeks(weeks.checked_neg()?)
    }
}

impl fmt::Display for Week {
    /// Formats with the week's own system: `YYYYww` for CDC and WND,
    /// `YYYYWww` for ISO.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = match self.system {
            System::Cdc => self.cdc_format(),
            System::Iso => self.iso_format(),
            System::Wnd => self.wnd_format(),
        };
        f.write_str(&formatted)
    }
}

impl FromStr for Week {
    type Err = Error;

    /// Parses with the default CDC system. Use [`Week::from_string`] to
    /// parse under another system.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s, System::default())
    }
}

impl PartialOrd for Week {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Week {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare the (year, week) pairs first…
        match self.week_tuple().cmp(&other.week_tuple()) {
            // …ties can only involve differing systems; break them by the
            // weeks' actual start dates.
            Ordering::Equal => self.start_ordinal().cmp(&other.start_ordinal()),
            ord => ord,
        }
    }
}

impl Add<i32> for Week {
    type Output = Self;

    /// Returns the week whose start date lies `weeks` whole weeks ahead.
    ///
    /// # Panics
    /// Panics when the result falls outside the supported year span. Use
    /// [`Week::checked_add_weeks`] to handle that case.
    fn add(self, weeks: i32) -> Self::Output {
        self.checked_add_weeks(weeks)
            .expect("week arithmetic out of the supported year span")
    }
}

impl Sub<i32> for Week {
    type Output = Self;

    /// Returns the week whose start date lies `weeks` whole weeks back.
    ///
    /// # Panics
    /// Panics when the result falls outside the supported year span. Use
    /// [`Week::checked_sub_weeks`] to handle that case.
    fn sub(self, weeks: i32) -> Self::Output {
        self.checked_sub_weeks(weeks)
            .expect("week arithmetic out of the supported year span")
    }
}

impl TryFrom<(i32, i32, System)> for Week {
    type Error = Error;

    fn try_from((year, week, system): (i32, i32, System)) -> Result<Self, Self::Error> {
        Self::new(year, week, system)
    }
}

impl From<Week> for (i32, i32, System) {
    fn from(week: Week) -> Self {
        (week.year, week.week, week.system)
    }
}
