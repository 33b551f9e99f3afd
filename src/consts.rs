/// Minimum valid epidemiological year (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Maximum valid epidemiological year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Days in an epidemiological week
pub const DAYS_IN_WEEK: i32 = 7;

/// Mid-week anchor weekday (0 = Monday) deciding whether the week
/// containing Jan 1 counts as week 1 of its year
pub(crate) const MID_WEEK_ANCHOR: i32 = 3;

/// Date parts of 2019-11-14, the first day numbered under the WND system
pub(crate) const WND_CUTOVER_YEAR: i32 = 2019;
pub(crate) const WND_CUTOVER_MONTH: u32 = 11;
pub(crate) const WND_CUTOVER_DAY: u32 = 14;

/// Month number for February
pub(crate) const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub(crate) const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub(crate) const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;
