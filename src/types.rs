use crate::Error;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_IN_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_YEAR, MID_WEEK_ANCHOR, MIN_YEAR, WND_CUTOVER_DAY, WND_CUTOVER_MONTH,
    WND_CUTOVER_YEAR,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An epidemiological week numbering system.
///
/// `Cdc` numbers MMWR weeks anchored on Sunday, `Iso` numbers ISO-8601
/// weeks anchored on Monday, and `Wnd` is the numbering in force for all
/// dates from 2019-11-14 onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum System {
    /// US CDC (MMWR) weeks
    #[default]
    Cdc,
    /// ISO-8601 weeks
    Iso,
    /// WND weeks, forced for dates on or after 2019-11-14
    Wnd,
}

impl System {
    /// Returns the canonical token for the system.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cdc => "CDC",
            Self::Iso => "ISO",
            Self::Wnd => "WND",
        }
    }

    /// Day-of-week offset used to locate the first day of week 1.
    pub(crate) const fn adjustment(self) -> i32 {
        match self {
            Self::Cdc => 1,
            Self::Iso => 0,
            Self::Wnd => 4,
        }
    }
}

impl FromStr for System {
    type Err = Error;

    /// Parses a system token, ignoring case.
    ///
    /// # Errors
    /// Returns `Error::UnknownSystem` for anything but `cdc`, `iso` or `wnd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cdc" => Ok(Self::Cdc),
            "iso" => Ok(Self::Iso),
            "wnd" => Ok(Self::Wnd),
            _ => Err(Error::UnknownSystem(s.to_owned())),
        }
    }
}

impl TryFrom<String> for System {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<System> for String {
    fn from(system: System) -> Self {
        system.as_str().to_owned()
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- validation helpers shared by every construction site ---

/// Checks that a year is within the supported span.
///
/// # Errors
/// Returns `Error::YearOutOfRange` if the year is outside `1..=9999`.
pub(crate) fn check_year(year: i32) -> Result<i32, Error> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::YearOutOfRange(year));
    }
    Ok(year)
}

/// Checks that a week number is valid for the given year and system.
///
/// # Errors
/// Returns `Error::WeekOutOfRange` if the week is outside
/// `1..=year_total_weeks(year, system)`.
pub(crate) fn check_week(year: i32, week: i32, system: System) -> Result<i32, Error> {
    let max = year_total_weeks(year, system);
    if !(1..=max).contains(&week) {
        return Err(Error::WeekOutOfRange { week, max });
    }
    Ok(week)
}

// --- proleptic Gregorian day-ordinal arithmetic ---
//
// Ordinals count days since the reference epoch, with 0001-01-01 = 1.

pub(crate) const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub(crate) const fn days_in_month(year: i32, month: u32) -> i32 {
    debug_assert!(month != 0 && month <= 12);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days in all years preceding the given year.
pub(crate) const fn days_before_year(year: i32) -> i32 {
    let y = year - 1;
    y * 365 + y / 4 - y / 100 + y / 400
}

/// Day ordinal of a calendar date given as year, month and day.
pub(crate) const fn ordinal_from_ymd(year: i32, month: u32, day: u32) -> i32 {
    let mut days = days_before_year(year);
    let mut m = 1;
    while m < month {
        days += days_in_month(year, m);
        m += 1;
    }
    days + day as i32
}

/// Weekday of a day ordinal, 0 = Monday .. 6 = Sunday.
pub(crate) const fn weekday_from_ordinal(ordinal: i32) -> i32 {
    (ordinal - 1).rem_euclid(DAYS_IN_WEEK)
}

/// Day ordinal of 2019-11-14, the first date numbered under the WND system.
pub(crate) const WND_CUTOVER_ORDINAL: i32 =
    ordinal_from_ymd(WND_CUTOVER_YEAR, WND_CUTOVER_MONTH, WND_CUTOVER_DAY);

/// Day ordinal of the first day of week 1 of the given epidemiological year.
///
/// The candidate start is the week boundary at or before Jan 1; when Jan 1
/// falls past the mid-week anchor, that week belongs to the previous year
/// and the start rolls forward one week.
pub(crate) const fn year_start(year: i32, system: System) -> i32 {
    let adjustment = system.adjustment();
    let mid_weekday = MID_WEEK_ANCHOR - adjustment;
    let jan1_ordinal = days_before_year(year) + 1;
    let jan1_weekday = weekday_from_ordinal(jan1_ordinal);
    let mut week1_start = jan1_ordinal - jan1_weekday - adjustment;
    if jan1_weekday > mid_weekday {
        week1_start += DAYS_IN_WEEK;
    }
    week1_start
}

/// Number of weeks in the given epidemiological year, either 52 or 53.
pub(crate) const fn year_total_weeks(year: i32, system: System) -> i32 {
    (year_start(year + 1, system) - year_start(year, system)) / DAYS_IN_WEEK
}

/// Converts a day ordinal back to a calendar date.
///
/// Ordinals reached from validated weeks always fall inside chrono's
/// supported range.
pub(crate) fn date_from_ordinal(ordinal: i32) -> NaiveDate {
    NaiveDate::from_num_days_from_ce_opt(ordinal).expect("day ordinal out of chrono date range")
}
