use serde::{Deserialize, Serialize};

use crate::types::{check_year, date_from_ordinal, year_start, year_total_weeks};
use crate::{Error, System, Week, prelude::*};
use chrono::{Datelike, Local, NaiveDate};

/// Represents a year in the epidemiological week calendar under a given
/// numbering system. A year spans 52 or 53 whole weeks and produces its
/// [`Week`] values on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{year:04}")]
#[serde(try_from = "(i32, System)", into = "(i32, System)")]
pub struct Year {
    year: i32,
    system: System,
}

impl Year {
    /// Creates a new Year from its number and system.
    ///
    /// # Errors
    /// Returns `Error::YearOutOfRange` if the year is outside `1..=9999`.
    pub fn new(year: i32, system: System) -> Result<Self, Error> {
        let year = check_year(year)?;
        Ok(Self { year, system })
    }

    /// The epidemiological year numbered after the current local date's
    /// calendar year.
    ///
    /// # Errors
    /// Propagates the validation errors of [`Year::new`].
    pub fn this_year(system: System) -> Result<Self, Error> {
        Self::new(Local::now().date_naive().year(), system)
    }

    /// Returns the year number.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the numbering system.
    pub const fn system(&self) -> System {
        self.system
    }

    /// Number of weeks the year spans, either 52 or 53.
    pub const fn total_weeks(&self) -> i32 {
        year_total_weeks(self.year, self.system)
    }

    /// Returns the date of the first day of the year's first week.
    pub fn start_date(&self) -> NaiveDate {
        date_from_ordinal(year_start(self.year, self.system))
    }

    /// Returns the date of the last day of the year's final week.
    pub fn end_date(&self) -> NaiveDate {
        date_from_ordinal(year_start(self.year + 1, self.system) - 1)
    }

    /// Returns an iterator over all weeks of the year. Each call produces
    /// a fresh iterator starting at week 1; the weeks skip re-validation,
    /// their numbers being in range by construction.
    pub fn iter_weeks(&self) -> impl Iterator<Item = Week> + use<> {
        let Self { year, system } = *self;
        (1..=self.total_weeks()).map(move |week| Week::new_unchecked(year, week, system))
    }
}

impl TryFrom<(i32, System)> for Year {
    type Error = Error;

    fn try_from((year, system): (i32, System)) -> Result<Self, Self::Error> {
        Self::new(year, system)
    }
}

impl From<Year> for (i32, System) {
    fn from(year: Year) -> Self {
        (year.year, year.system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn year(year: i32, system: System) -> Year {
        Year::new(year, system).unwrap()
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_year_display() {
        assert_eq!(year(2015, System::Cdc).to_string(), "2015");
        assert_eq!(year(33, System::Iso).to_string(), "0033");
    }

    #[test]
    fn test_year_accessors() {
        let y = year(2020, System::Wnd);
        assert_eq!(y.year(), 2020);
        assert_eq!(y.system(), System::Wnd);
    }

    #[test]
    fn test_year_equality_and_hash() {
        assert_eq!(year(2015, System::Cdc), year(2015, System::Cdc));
        assert_ne!(year(2015, System::Cdc), year(2015, System::Iso));
        assert_ne!(year(2015, System::Cdc), year(2016, System::Cdc));
        assert_eq!(
            hash_of(&year(2015, System::Cdc)),
            hash_of(&year(2015, System::Cdc))
        );
        assert_ne!(
            hash_of(&year(2015, System::Cdc)),
            hash_of(&year(2015, System::Iso))
        );
    }

    #[test]
    fn test_year_invalid() {
        assert!(matches!(
            Year::new(0, System::Cdc),
            Err(Error::YearOutOfRange(0))
        ));
        assert!(matches!(
            Year::new(10000, System::Cdc),
            Err(Error::YearOutOfRange(10000))
        ));
    }

    #[test]
    fn test_year_total_weeks() {
        assert_eq!(year(2015, System::Cdc).total_weeks(), 52);
        assert_eq!(year(2015, System::Iso).total_weeks(), 53);
        assert_eq!(year(2020, System::Wnd).total_weeks(), 52);
    }

    #[test]
    fn test_year_start_date() {
        assert_eq!(year(2015, System::Cdc).start_date(), date(2015, 1, 4));
        assert_eq!(year(2015, System::Iso).start_date(), date(2014, 12, 29));
        assert_eq!(year(2020, System::Wnd).start_date(), date(2020, 1, 2));
    }

    #[test]
    fn test_year_end_date() {
        assert_eq!(year(2015, System::Cdc).end_date(), date(2016, 1, 2));
        assert_eq!(year(2015, System::Iso).end_date(), date(2016, 1, 3));
        assert_eq!(year(2020, System::Wnd).end_date(), date(2020, 12, 30));
    }

    #[test]
    fn test_year_iter_weeks() {
        let cdc_weeks: Vec<Week> = (1..=52)
            .map(|w| Week::new(2015, w, System::Cdc).unwrap())
            .collect();
        assert_eq!(
            year(2015, System::Cdc).iter_weeks().collect::<Vec<_>>(),
            cdc_weeks
        );

        let iso_weeks: Vec<Week> = (1..=53)
            .map(|w| Week::new(2015, w, System::Iso).unwrap())
            .collect();
        assert_eq!(
            year(2015, System::Iso).iter_weeks().collect::<Vec<_>>(),
            iso_weeks
        );

        // Each call restarts from week 1
        let y = year(2020, System::Wnd);
        assert_eq!(
            y.iter_weeks().collect::<Vec<_>>(),
            y.iter_weeks().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_year_span_coverage() {
        // The weeks of a year tile its date span without gaps or overlaps
        for system in [System::Cdc, System::Iso, System::Wnd] {
            for number in [2014, 2015, 2019, 2020] {
                let y = year(number, system);
                let weeks: Vec<Week> = y.iter_weeks().collect();
                assert_eq!(weeks.len(), usize::try_from(y.total_weeks()).unwrap());
                let mut expected_start = y.start_date();
                for week in &weeks {
                    assert_eq!(week.start_date(), expected_start, "{system} {week}");
                    expected_start = week.end_date().succ_opt().unwrap();
                }
                assert_eq!(weeks.last().unwrap().end_date(), y.end_date());
            }
        }
    }

    #[test]
    fn test_year_this_year() {
        let today = Local::now().date_naive();
        let y = Year::this_year(System::Cdc).unwrap();
        assert_eq!(y.year(), today.year());
        assert_eq!(y.system(), System::Cdc);
        assert_eq!(
            y.start_date(),
            date_from_ordinal(year_start(today.year(), System::Cdc))
        );
    }

    #[test]
    fn test_year_try_from_tuple() {
        let y = Year::try_from((2015, System::Iso)).unwrap();
        assert_eq!(y, year(2015, System::Iso));
        let (number, system): (i32, System) = y.into();
        assert_eq!((number, system), (2015, System::Iso));

        assert!(Year::try_from((10000, System::Cdc)).is_err());
    }

    #[test]
    fn test_year_serde() {
        let y = year(2020, System::Wnd);
        let json = serde_json::to_string(&y).unwrap();
        assert_eq!(json, r#"[2020,"WND"]"#);
        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, y);

        let result: Result<Year, _> = serde_json::from_str(r#"[10000,"CDC"]"#);
        assert!(result.is_err());
    }
}
