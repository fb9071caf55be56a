use crate::day::{
    check_year, days_between, CalendarDay, DayError, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR,
};
use std::collections::BTreeSet;
use thiserror::Error;
use time::Weekday;

/// Which days may be picked, which are highlighted, and which years the
/// year lists offer.
///
/// A non-empty allow-list of selectable days overrides the min/max dates
/// entirely.  Setters validate their input before changing anything, so a
/// rejected call leaves the constraints as they were.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateConstraints {
    min_date: Option<CalendarDay>,
    max_date: Option<CalendarDay>,
    selectable_days: BTreeSet<CalendarDay>,
    highlighted_days: BTreeSet<CalendarDay>,
    min_year: i32,
    max_year: i32,
    week_start: Weekday,
}

impl DateConstraints {
    pub fn new() -> DateConstraints {
        DateConstraints::default()
    }

    pub fn min_date(&self) -> Option<CalendarDay> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<CalendarDay> {
        self.max_date
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn set_min_date(&mut self, date: Option<CalendarDay>) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (date, self.max_date) {
            if min > max {
                return Err(ConfigError::InvertedDates { min, max });
            }
        }
        let previous = std::mem::replace(&mut self.min_date, date);
        if let Err(e) = self.check_years() {
            self.min_date = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn set_max_date(&mut self, date: Option<CalendarDay>) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_date, date) {
            if min > max {
                return Err(ConfigError::InvertedDates { min, max });
            }
        }
        let previous = std::mem::replace(&mut self.max_date, date);
        if let Err(e) = self.check_years() {
            self.max_date = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn set_selectable_days<I>(&mut self, days: I)
    where
        I: IntoIterator<Item = CalendarDay>,
    {
        self.selectable_days = days.into_iter().collect();
    }

    pub fn set_highlighted_days<I>(&mut self, days: I)
    where
        I: IntoIterator<Item = CalendarDay>,
    {
        self.highlighted_days = days.into_iter().collect();
    }

    pub fn set_year_range(&mut self, start: i32, end: i32) -> Result<(), ConfigError> {
        check_year(start)?;
        check_year(end)?;
        if end < start {
            return Err(ConfigError::InvertedYears { start, end });
        }
        let previous = (self.min_year, self.max_year);
        (self.min_year, self.max_year) = (start, end);
        if let Err(e) = self.check_years() {
            (self.min_year, self.max_year) = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn set_week_start(&mut self, weekday: Weekday) {
        self.week_start = weekday;
    }

    pub fn is_selectable(&self, day: CalendarDay) -> bool {
        if !self.selectable_days.is_empty() {
            return self.selectable_days.contains(&day);
        }
        self.min_date.is_none_or(|min| day >= min) && self.max_date.is_none_or(|max| day <= max)
    }

    pub fn is_highlighted(&self, day: CalendarDay) -> bool {
        self.highlighted_days.contains(&day)
    }

    /// The earliest day that can ever be picked: the first allow-listed day
    /// if there is an allow-list, otherwise the min date (if any)
    pub fn lower_bound(&self) -> Option<CalendarDay> {
        self.selectable_days.first().copied().or(self.min_date)
    }

    /// The latest day that can ever be picked: the last allow-listed day if
    /// there is an allow-list, otherwise the max date (if any)
    pub fn upper_bound(&self) -> Option<CalendarDay> {
        self.selectable_days.last().copied().or(self.max_date)
    }

    pub fn clamp(&self, day: CalendarDay) -> CalendarDay {
        match (self.lower_bound(), self.upper_bound()) {
            (Some(lower), _) if day < lower => lower,
            (_, Some(upper)) if day > upper => upper,
            _ => day,
        }
    }

    /// The pickable day closest to `day`, preferring the earlier one on a
    /// tie.  Without an allow-list this is [`DateConstraints::clamp`].
    pub fn nearest_selectable(&self, day: CalendarDay) -> CalendarDay {
        let before = self.selectable_days.range(..=day).next_back().copied();
        let after = self.selectable_days.range(day..).next().copied();
        match (before, after) {
            (Some(b), Some(a)) if days_between(b, day) <= days_between(day, a) => b,
            (_, Some(a)) => a,
            (Some(b), None) => b,
            (None, None) => self.clamp(day),
        }
    }

    pub fn effective_min_year(&self) -> i32 {
        match self.selectable_days.first() {
            Some(first) => first.year(),
            None => self
                .min_date
                .map_or(self.min_year, |min| min.year().max(self.min_year)),
        }
    }

    pub fn effective_max_year(&self) -> i32 {
        match self.selectable_days.last() {
            Some(last) => last.year(),
            None => self
                .max_date
                .map_or(self.max_year, |max| max.year().min(self.max_year)),
        }
    }

    /// The year lists must offer at least one year
    fn check_years(&self) -> Result<(), ConfigError> {
        let (start, end) = (self.effective_min_year(), self.effective_max_year());
        if end < start {
            return Err(ConfigError::NoYears { start, end });
        }
        Ok(())
    }
}

impl Default for DateConstraints {
    fn default() -> DateConstraints {
        DateConstraints {
            min_date: None,
            max_date: None,
            selectable_days: BTreeSet::new(),
            highlighted_days: BTreeSet::new(),
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            week_start: Weekday::Sunday,
        }
    }
}

/// Convert a week-start number in the 1 (Sunday) through 7 (Saturday)
/// convention into a [`Weekday`]
pub fn week_start_from_number(n: u8) -> Result<Weekday, ConfigError> {
    match n {
        1 => Ok(Weekday::Sunday),
        2 => Ok(Weekday::Monday),
        3 => Ok(Weekday::Tuesday),
        4 => Ok(Weekday::Wednesday),
        5 => Ok(Weekday::Thursday),
        6 => Ok(Weekday::Friday),
        7 => Ok(Weekday::Saturday),
        _ => Err(ConfigError::WeekStart(n)),
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum date {min} is after maximum date {max}")]
    InvertedDates { min: CalendarDay, max: CalendarDay },
    #[error("year range end {end} is before its start {start}")]
    InvertedYears { start: i32, end: i32 },
    #[error("date limits leave no year between {start} and {end} to pick from")]
    NoYears { start: i32, end: i32 },
    #[error("week start {0} is not between 1 (Sunday) and 7 (Saturday)")]
    WeekStart(u8),
    #[error(transparent)]
    Day(#[from] DayError),
}
