use crate::day::{days_in_month, month_from_index0, CalendarDay, DayError};
use time::{Month, Weekday};

pub const DAYS_IN_WEEK: u8 = 7;

const MONTHS_IN_YEAR: usize = 12;

/// Layout of one month as rows of weeks, with the first column being the
/// configured first day of the week
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    first: CalendarDay,
    week_start: Weekday,
    days: u8,
    offset: u8,
}

impl MonthGrid {
    pub fn new(year: i32, month: Month, week_start: Weekday) -> Result<MonthGrid, DayError> {
        let first = CalendarDay::new(year, u8::from(month) - 1, 1)?;
        Ok(MonthGrid::containing(first, week_start))
    }

    /// The grid for the month containing `day`
    pub fn containing(day: CalendarDay, week_start: Weekday) -> MonthGrid {
        let first = day.first_of_month();
        let offset = (first.weekday().number_days_from_sunday() + DAYS_IN_WEEK
            - week_start.number_days_from_sunday())
            % DAYS_IN_WEEK;
        MonthGrid {
            first,
            week_start,
            days: days_in_month(first.year(), first.month()),
            offset,
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.first.month()
    }

    /// Number of blank cells before the first of the month
    pub fn offset(&self) -> u8 {
        self.offset
    }

    pub fn rows(&self) -> u8 {
        (self.offset + self.days).div_ceil(DAYS_IN_WEEK)
    }

    /// Weekdays in column order
    pub fn weekdays(&self) -> impl Iterator<Item = (u8, Weekday)> {
        let mut wd = self.week_start;
        (0..DAYS_IN_WEEK).map(move |col| {
            let this = wd;
            wd = wd.next();
            (col, this)
        })
    }

    pub fn day_at(&self, row: u8, col: u8) -> Option<CalendarDay> {
        if col >= DAYS_IN_WEEK {
            return None;
        }
        let index = u16::from(row) * u16::from(DAYS_IN_WEEK) + u16::from(col);
        let day = index.checked_sub(u16::from(self.offset))?;
        (day < u16::from(self.days)).then(|| self.first.add_days(i32::from(day)))
    }

    /// `(row, column)` of a day in this month
    pub fn cell_of(&self, day: CalendarDay) -> Option<(u8, u8)> {
        if day.year() != self.year() || day.month() != self.month() {
            return None;
        }
        let index = day.day() - 1 + self.offset;
        Some((index / DAYS_IN_WEEK, index % DAYS_IN_WEEK))
    }

    /// Every day of the month along with its `(row, column)`
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8, CalendarDay)> + '_ {
        (0..self.days).map(move |i| {
            let index = i + self.offset;
            (
                index / DAYS_IN_WEEK,
                index % DAYS_IN_WEEK,
                self.first.add_days(i32::from(i)),
            )
        })
    }
}

/// Position of a month in a month list that begins with January of
/// `first_year`
pub fn month_position(day: CalendarDay, first_year: i32) -> Option<usize> {
    let years = usize::try_from(day.year().checked_sub(first_year)?).ok()?;
    years
        .checked_mul(MONTHS_IN_YEAR)?
        .checked_add(usize::from(day.month0()))
}

/// Inverse of [`month_position`]: the year and month shown at `position`
pub fn month_at_position(position: usize, first_year: i32) -> Option<(i32, Month)> {
    let year = first_year.checked_add(i32::try_from(position / MONTHS_IN_YEAR).ok()?)?;
    let month0 = u8::try_from(position % MONTHS_IN_YEAR).ok()?;
    Some((year, month_from_index0(month0).ok()?))
}

/// Position of a year in a year list that begins with `first_year`
pub fn year_position(year: i32, first_year: i32) -> Option<usize> {
    usize::try_from(year.checked_sub(first_year)?).ok()
}

/// How a single day cell should be presented
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DayCell {
    /// Tapping the day would select it
    pub selectable: bool,
    /// The day lies within the picked range
    pub in_range: bool,
    /// The day is the start or the end of the picked range
    pub endpoint: bool,
    /// The day is the date being edited by the active view
    pub selected: bool,
    /// The day is in the configured highlighted-days set
    pub highlighted: bool,
}

/// Something that can draw a month grid.  The picker decides what each cell
/// means; implementors only decide what it looks like.
pub trait MonthPainter {
    fn draw_month_title(&mut self, year: i32, month: Month);

    fn draw_weekday(&mut self, col: u8, weekday: Weekday);

    fn draw_day_cell(&mut self, row: u8, col: u8, day: CalendarDay, cell: DayCell);
}
