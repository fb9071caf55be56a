use std::fmt;
use thiserror::Error;
use time::{macros::date, util::is_leap_year, Date, Month, Weekday};

/// First year offered by the year lists unless configured otherwise
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Last year offered by the year lists unless configured otherwise
pub const DEFAULT_MAX_YEAR: i32 = 2100;

/// Lower limit used when a typed duration moves the start date backwards
pub const FLOOR_DAY: CalendarDay = CalendarDay(date!(1900 - 01 - 01));

/// Upper limit used when a typed duration moves the end date forwards
pub const CEILING_DAY: CalendarDay = CalendarDay(date!(2100 - 12 - 31));

const MONTHS_IN_YEAR: i32 = 12;

/// A single day of the proleptic Gregorian calendar.
///
/// Months are exposed both as [`Month`] values and as zero-based indices
/// (`month0()`, 0 = January), the latter being what the month-grid and
/// scroll-position arithmetic work in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CalendarDay(Date);

impl CalendarDay {
    /// Construct a day from a year, a zero-based month, and a day of the
    /// month, rejecting anything that is not a real calendar date.
    pub fn new(year: i32, month0: u8, day: u8) -> Result<CalendarDay, DayError> {
        let month = month_from_index0(month0)?;
        check_year(year)?;
        if day == 0 || day > days_in_month(year, month) {
            return Err(DayError::InvalidDay {
                year,
                month: month0 + 1,
                day,
            });
        }
        Date::from_calendar_date(year, month, day)
            .map(CalendarDay)
            .map_err(|_| DayError::InvalidYear(year))
    }

    /// Like [`CalendarDay::new`], but a day of the month past the end of
    /// the month is reduced to the month's last day (e.g., January 31 in
    /// February becomes February 28 or 29).
    pub fn clamped(year: i32, month0: u8, day: u8) -> Result<CalendarDay, DayError> {
        let month = month_from_index0(month0)?;
        check_year(year)?;
        let day = day.clamp(1, days_in_month(year, month));
        Date::from_calendar_date(year, month, day)
            .map(CalendarDay)
            .map_err(|_| DayError::InvalidYear(year))
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    pub fn month0(self) -> u8 {
        u8::from(self.0.month()) - 1
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the day `n` days after (or, for negative `n`, before) this
    /// one, saturating at the ends of the representable calendar
    pub fn add_days(self, n: i32) -> CalendarDay {
        let jd = self.0.to_julian_day().saturating_add(n);
        match Date::from_julian_day(jd) {
            Ok(date) => CalendarDay(date),
            Err(_) if n < 0 => CalendarDay(Date::MIN),
            Err(_) => CalendarDay(Date::MAX),
        }
    }

    /// Replace the year, clamping the day of the month if the same month
    /// is shorter in the new year (February 29 → February 28)
    pub fn with_year(self, year: i32) -> Result<CalendarDay, DayError> {
        CalendarDay::clamped(year, self.month0(), self.day())
    }

    /// Move by whole months, keeping the day of the month where possible.
    /// Returns `None` when the result would leave the supported calendar.
    pub fn add_months(self, n: i32) -> Option<CalendarDay> {
        let total = self
            .year()
            .checked_mul(MONTHS_IN_YEAR)?
            .checked_add(i32::from(self.month0()))?
            .checked_add(n)?;
        let month0 = u8::try_from(total.rem_euclid(MONTHS_IN_YEAR)).ok()?;
        CalendarDay::clamped(total.div_euclid(MONTHS_IN_YEAR), month0, self.day()).ok()
    }

    pub fn first_of_month(self) -> CalendarDay {
        self.add_days(1 - i32::from(self.day()))
    }
}

impl From<Date> for CalendarDay {
    fn from(date: Date) -> CalendarDay {
        CalendarDay(date)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            u8::from(self.month()),
            self.day()
        )
    }
}

/// Signed number of whole days from `a` to `b`
pub fn days_between(a: CalendarDay, b: CalendarDay) -> i32 {
    b.0.to_julian_day() - a.0.to_julian_day()
}

pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

pub(crate) fn month_from_index0(month0: u8) -> Result<Month, DayError> {
    if month0 >= 12 {
        return Err(DayError::InvalidMonth(month0));
    }
    Month::try_from(month0 + 1).map_err(|_| DayError::InvalidMonth(month0))
}

pub(crate) fn check_year(year: i32) -> Result<(), DayError> {
    if (Date::MIN.year()..=Date::MAX.year()).contains(&year) {
        Ok(())
    } else {
        Err(DayError::InvalidYear(year))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum DayError {
    #[error("month index {0} is outside 0-11")]
    InvalidMonth(u8),
    #[error("{year:04}-{month:02} has no day {day}")]
    InvalidDay { year: i32, month: u8, day: u8 },
    #[error("year {0} is outside the supported calendar")]
    InvalidYear(i32),
}
