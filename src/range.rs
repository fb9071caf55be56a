use crate::constraints::DateConstraints;
use crate::day::{days_between, CalendarDay, DayError};
use std::fmt;

/// One endpoint of the range
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Start => write!(f, "start"),
            Side::End => write!(f, "end"),
        }
    }
}

/// The picked start and end days plus the number of days between them.
///
/// Invariant: `end >= start` and `duration == days_between(start, end)`.
/// Every mutator re-establishes both before returning.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RangeState {
    start: CalendarDay,
    end: CalendarDay,
    duration: u32,
}

impl RangeState {
    /// Create a range; an `end` before `start` collapses onto `start`
    pub fn new(start: CalendarDay, end: CalendarDay) -> RangeState {
        let mut range = RangeState::collapsed(start);
        range.set_end(end);
        range
    }

    pub fn collapsed(day: CalendarDay) -> RangeState {
        RangeState {
            start: day,
            end: day,
            duration: 0,
        }
    }

    pub fn start(&self) -> CalendarDay {
        self.start
    }

    pub fn end(&self) -> CalendarDay {
        self.end
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn get(&self, side: Side) -> CalendarDay {
        match side {
            Side::Start => self.start,
            Side::End => self.end,
        }
    }

    /// Set the start day, dragging the end along if it would otherwise fall
    /// before the new start
    pub fn set_start(&mut self, day: CalendarDay) {
        self.start = day;
        if self.end < day {
            self.end = day;
        }
        self.recompute();
    }

    /// Set the end day; a day before the start leaves a zero-length range
    /// at the start
    pub fn set_end(&mut self, day: CalendarDay) {
        self.end = day.max(self.start);
        self.recompute();
    }

    /// Move one side to another year.  The day of the month is clamped to
    /// the new month length, the result is clamped into the constraints'
    /// bounds, and finally the end is pushed up to the start if needed.
    pub fn set_year(
        &mut self,
        side: Side,
        year: i32,
        constraints: &DateConstraints,
    ) -> Result<(), DayError> {
        let moved = constraints.clamp(self.get(side).with_year(year)?);
        match side {
            Side::Start => self.set_start(moved),
            Side::End => self.set_end(moved),
        }
        Ok(())
    }

    /// Recompute `side` from the other (anchored) side so that the range
    /// spans `days` days
    pub fn set_duration(&mut self, side: Side, days: u32) {
        let days = i32::try_from(days).unwrap_or(i32::MAX);
        match side {
            Side::Start => self.start = self.end.add_days(-days),
            Side::End => self.end = self.start.add_days(days),
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        debug_assert!(self.end >= self.start, "range end precedes start");
        self.duration = days_between(self.start, self.end).unsigned_abs();
    }
}

impl fmt::Display for RangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.start, self.end, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn day(d: time::Date) -> CalendarDay {
        CalendarDay::from(d)
    }

    fn assert_invariants(range: &RangeState) {
        assert!(range.end() >= range.start(), "{range:?}");
        assert_eq!(
            i64::from(range.duration()),
            i64::from(days_between(range.start(), range.end())),
            "{range:?}"
        );
    }

    #[test]
    fn test_new_collapses_inverted_range() {
        let range = RangeState::new(day(date!(2024 - 06 - 10)), day(date!(2024 - 06 - 01)));
        assert_eq!(range.start(), day(date!(2024 - 06 - 10)));
        assert_eq!(range.end(), day(date!(2024 - 06 - 10)));
        assert_eq!(range.duration(), 0);
    }

    #[test]
    fn test_set_end() {
        let mut range = RangeState::collapsed(day(date!(2024 - 06 - 01)));
        range.set_end(day(date!(2024 - 06 - 10)));
        assert_eq!(range.end(), day(date!(2024 - 06 - 10)));
        assert_eq!(range.duration(), 9);
        assert_invariants(&range);
    }

    #[test]
    fn test_set_end_before_start() {
        let mut range = RangeState::new(day(date!(2024 - 06 - 05)), day(date!(2024 - 06 - 10)));
        range.set_end(day(date!(2024 - 06 - 01)));
        assert_eq!(range.start(), day(date!(2024 - 06 - 05)));
        assert_eq!(range.end(), day(date!(2024 - 06 - 05)));
        assert_eq!(range.duration(), 0);
    }

    #[test]
    fn test_set_start_after_end_collapses() {
        let mut range = RangeState::new(day(date!(2024 - 06 - 01)), day(date!(2024 - 06 - 10)));
        range.set_start(day(date!(2024 - 07 - 04)));
        assert_eq!(range.start(), day(date!(2024 - 07 - 04)));
        assert_eq!(range.end(), day(date!(2024 - 07 - 04)));
        assert_eq!(range.duration(), 0);
    }

    #[test]
    fn test_set_start_keeps_later_end() {
        let mut range = RangeState::new(day(date!(2024 - 06 - 01)), day(date!(2024 - 06 - 10)));
        range.set_start(day(date!(2024 - 05 - 31)));
        assert_eq!(range.end(), day(date!(2024 - 06 - 10)));
        assert_eq!(range.duration(), 10);
    }

    #[test]
    fn test_set_year_clamps_leap_day() {
        let mut range = RangeState::new(day(date!(2024 - 02 - 29)), day(date!(2024 - 03 - 10)));
        range
            .set_year(Side::Start, 2023, &DateConstraints::new())
            .unwrap();
        assert_eq!(range.start(), day(date!(2023 - 02 - 28)));
        assert_eq!(range.end(), day(date!(2024 - 03 - 10)));
        assert_invariants(&range);
    }

    #[test]
    fn test_set_start_year_pushes_end() {
        let mut range = RangeState::new(day(date!(2024 - 02 - 29)), day(date!(2024 - 03 - 10)));
        range
            .set_year(Side::Start, 2025, &DateConstraints::new())
            .unwrap();
        assert_eq!(range.start(), day(date!(2025 - 02 - 28)));
        assert_eq!(range.end(), day(date!(2025 - 02 - 28)));
        assert_eq!(range.duration(), 0);
    }

    #[test]
    fn test_set_end_year_before_start() {
        let mut range = RangeState::new(day(date!(2024 - 02 - 10)), day(date!(2024 - 03 - 10)));
        range
            .set_year(Side::End, 2020, &DateConstraints::new())
            .unwrap();
        assert_eq!(range.end(), day(date!(2024 - 02 - 10)));
        assert_eq!(range.duration(), 0);
    }

    #[test]
    fn test_set_year_clamps_into_bounds() {
        let mut constraints = DateConstraints::new();
        constraints
            .set_max_date(Some(day(date!(2025 - 01 - 15))))
            .unwrap();
        let mut range = RangeState::new(day(date!(2024 - 02 - 10)), day(date!(2024 - 03 - 10)));
        range.set_year(Side::End, 2025, &constraints).unwrap();
        assert_eq!(range.end(), day(date!(2025 - 01 - 15)));
        assert_invariants(&range);
    }

    #[test]
    fn test_set_year_out_of_calendar() {
        let mut range = RangeState::collapsed(day(date!(2024 - 02 - 10)));
        let before = range;
        assert_eq!(
            range.set_year(Side::Start, 10000, &DateConstraints::new()),
            Err(DayError::InvalidYear(10000))
        );
        assert_eq!(range, before);
    }

    #[test]
    fn test_set_duration() {
        let mut range = RangeState::collapsed(day(date!(2024 - 06 - 10)));
        range.set_duration(Side::Start, 15);
        assert_eq!(range.start(), day(date!(2024 - 05 - 26)));
        assert_eq!(range.end(), day(date!(2024 - 06 - 10)));
        assert_eq!(range.duration(), 15);
        range.set_duration(Side::End, 3);
        assert_eq!(range.start(), day(date!(2024 - 05 - 26)));
        assert_eq!(range.end(), day(date!(2024 - 05 - 29)));
        assert_eq!(range.duration(), 3);
    }

    #[test]
    fn test_invariants_hold_over_mixed_edits() {
        let mut range = RangeState::collapsed(day(date!(2024 - 01 - 31)));
        let constraints = DateConstraints::new();
        range.set_end(day(date!(2024 - 03 - 01)));
        assert_invariants(&range);
        range.set_duration(Side::Start, 400);
        assert_invariants(&range);
        range.set_start(day(date!(2024 - 12 - 25)));
        assert_invariants(&range);
        range.set_end(day(date!(2000 - 01 - 01)));
        assert_invariants(&range);
        range.set_year(Side::End, 1999, &constraints).unwrap();
        assert_invariants(&range);
        range.set_duration(Side::End, 0);
        assert_invariants(&range);
        range.set_year(Side::Start, 2028, &constraints).unwrap();
        assert_invariants(&range);
    }

    #[test]
    fn test_display() {
        let range = RangeState::new(day(date!(2024 - 06 - 01)), day(date!(2024 - 06 - 10)));
        assert_eq!(range.to_string(), "2024-06-01 2024-06-10 9");
    }
}
