//! Proleptic Gregorian calendar arithmetic.
//!
//! Everything the pipeline needs from a date library, done with plain integer
//! arithmetic: leap years, month lengths, day-of-year, day numbers (days since
//! 1970-01-01), weekdays, quarters and the Sunday-first month grid.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest supported year.
pub const MIN_YEAR: i32 = 1;
/// Latest supported year.
pub const MAX_YEAR: i32 = 9999;

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday header labels, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Calendar input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Year outside `MIN_YEAR..=MAX_YEAR`.
    #[error("year {0} is out of range ({MIN_YEAR}..={MAX_YEAR})")]
    YearOutOfRange(i32),
    /// Month outside `1..=12`.
    #[error("month {0} is out of range (1..=12)")]
    MonthOutOfRange(u8),
    /// Day outside the month's length.
    #[error("day {day} is out of range for {year:04}-{month:02}")]
    DayOutOfRange {
        /// Year of the rejected date
        year: i32,
        /// Month of the rejected date
        month: u8,
        /// Rejected day
        day: u8,
    },
    /// Text that is not an ISO `YYYY-MM-DD` date.
    #[error("invalid day format {0:?}; use YYYY-MM-DD")]
    Parse(String),
}

/// `true` for Gregorian leap years.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, CalendarError> {
    check_year(year)?;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(CalendarError::MonthOutOfRange(month)),
    }
}

/// English name of `month`.
pub fn month_name(month: u8) -> Result<&'static str, CalendarError> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx))
        .copied()
        .ok_or(CalendarError::MonthOutOfRange(month))
}

fn check_year(year: i32) -> Result<(), CalendarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    /// Sunday (first column of the month grid)
    Sunday,
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Zero-based column in a Sunday-first week.
    pub const fn column(self) -> usize {
        self as usize
    }

    fn from_column(column: usize) -> Self {
        Self::ALL.get(column).copied().unwrap_or(Weekday::Sunday)
    }
}

/// A validated calendar day.
///
/// Field order gives chronological `Ord`. Serialises as `"YYYY-MM-DD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Validate and build a date.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let len = days_in_month(year, month)?;
        if day == 0 || day > len {
            return Err(CalendarError::DayOutOfRange { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Year component.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1..=12).
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Day-of-month component (1..=31).
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// January 1st of this date's year.
    pub const fn start_of_year(&self) -> Self {
        Self {
            year: self.year,
            month: 1,
            day: 1,
        }
    }

    /// Zero-based calendar quarter (Jan–Mar = 0 … Oct–Dec = 3).
    // SAFETY: month is validated to 1..=12 so month - 1 cannot underflow.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn quarter(&self) -> u8 {
        (self.month - 1) / 3
    }

    /// Days since 1970-01-01 (negative before the epoch).
    ///
    /// Howard Hinnant's `days_from_civil`.
    // SAFETY: year is bounded to 1..=9999, every intermediate fits easily in i64.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn day_number(&self) -> i64 {
        let month = i64::from(self.month);
        let day = i64::from(self.day);
        let year = i64::from(self.year) - i64::from(month <= 2);
        let era = year.div_euclid(400);
        let yoe = year.rem_euclid(400);
        let mp = (month + 9) % 12;
        let doy = (153 * mp + 2) / 5 + day - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    /// Inverse of [`CalendarDate::day_number`].
    // SAFETY: `civil_from_days` arithmetic is bounded for any result that then
    // passes the year range check below.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    pub fn from_day_number(days: i64) -> Result<Self, CalendarError> {
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);
        let year = i32::try_from(year).map_err(|_| CalendarError::YearOutOfRange(i32::MAX))?;
        // month in 1..=12 and day in 1..=31 by construction
        Self::new(year, month as u8, day as u8)
    }

    /// Date `days` later (or earlier, when negative).
    pub fn checked_add_days(&self, days: i64) -> Result<Self, CalendarError> {
        let target = self
            .day_number()
            .checked_add(days)
            .ok_or(CalendarError::YearOutOfRange(self.year))?;
        Self::from_day_number(target)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        other.day_number().saturating_sub(self.day_number())
    }

    /// 1-based ordinal day within the year (Jan 1 = 1).
    // SAFETY: the difference is at most 365, so +1 and the u16 cast are exact.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn day_of_year(&self) -> u16 {
        (self.start_of_year().days_until(self) + 1) as u16
    }

    /// Day of the week.
    // SAFETY: rem_euclid(7) is in 0..7.
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday (column 4 of a Sunday-first week).
        Weekday::from_column((self.day_number() + 4).rem_euclid(7) as usize)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    /// Parses `YYYY-MM-DD`; a trailing `THH:MM...` time part is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CalendarError::Parse(s.to_string());
        let date_part = s.trim().split('T').next().ok_or_else(bad)?;
        let mut parts = date_part.splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad());
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(bad());
        }
        let year = y.parse::<i32>().map_err(|_| bad())?;
        let month = m.parse::<u8>().map_err(|_| bad())?;
        let day = d.parse::<u8>().map_err(|_| bad())?;
        Self::new(year, month, day)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(value: CalendarDate) -> Self {
        value.to_string()
    }
}

/// One Sunday-first week row; `None` marks slots outside the month.
pub type Week = [Option<u8>; 7];

/// Maximum number of week rows any month can span.
pub const MAX_WEEKS: usize = 6;

/// Sunday-first month grid.
///
/// Each week has seven slots; days before the 1st and after the last day are
/// `None`. Yields 4 to 6 rows.
pub fn month_weeks(year: i32, month: u8) -> Result<heapless::Vec<Week, MAX_WEEKS>, CalendarError> {
    let len = days_in_month(year, month)?;
    let first = CalendarDate::new(year, month, 1)?;
    let mut weeks: heapless::Vec<Week, MAX_WEEKS> = heapless::Vec::new();
    let mut week: Week = [None; 7];
    let mut column = first.weekday().column();

    for day in 1..=len {
        if let Some(slot) = week.get_mut(column) {
            *slot = Some(day);
        }
        column = column.saturating_add(1);
        if column == 7 {
            // A month never spans more than MAX_WEEKS rows.
            let _ = weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column != 0 {
        let _ = weeks.push(week);
    }
    Ok(weeks)
}
