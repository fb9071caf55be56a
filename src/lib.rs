//! Core of a date-range picker.
//!
//! A [`DateRangePicker`] holds an inclusive range of calendar days that the
//! user edits through five views: a day grid and a year list for each end of
//! the range, plus a numeric pad for typing the length of the range in days.
//! Rendering is left to the caller; the picker decides what each view shows
//! and how each tap or key press changes the range.
mod constraints;
mod coordinator;
mod day;
mod duration;
mod grid;
mod highlight;
mod observer;
mod range;
mod scroll;
pub use crate::constraints::{week_start_from_number, ConfigError, DateConstraints};
pub use crate::coordinator::{Outcome, ViewEvent, ViewMode};
pub use crate::day::{
    days_between, days_in_month, CalendarDay, DayError, CEILING_DAY, DEFAULT_MAX_YEAR,
    DEFAULT_MIN_YEAR, FLOOR_DAY,
};
pub use crate::duration::{DurationPad, PadInput};
pub use crate::grid::{
    month_at_position, month_position, year_position, DayCell, MonthGrid, MonthPainter,
    DAYS_IN_WEEK,
};
pub use crate::highlight::HighlightSet;
pub use crate::observer::ListenerId;
pub use crate::range::{RangeState, Side};
use crate::coordinator::ViewCoordinator;
use crate::observer::Observers;
use crate::scroll::ScrollMemory;
use std::ops::RangeInclusive;
use time::Weekday;
use tracing::{debug, info};

/// One date-range picking session.
///
/// Owns the picked range, the constraints on it, the view state machine,
/// and everything derived from them.  All input goes through the `on_*` and
/// `open_view` methods, each of which finishes updating the range, the
/// highlight set, and the scroll memory before any listener is called.
#[derive(Clone, Debug)]
pub struct DateRangePicker {
    range: RangeState,
    constraints: DateConstraints,
    coordinator: ViewCoordinator,
    highlight: HighlightSet,
    scroll: ScrollMemory,
    observers: Observers,
}

impl DateRangePicker {
    pub fn new(range: RangeState, constraints: DateConstraints) -> DateRangePicker {
        DateRangePicker {
            highlight: HighlightSet::from_range(&range),
            range,
            constraints,
            coordinator: ViewCoordinator::new(),
            scroll: ScrollMemory::default(),
            observers: Observers::default(),
        }
    }

    // ---- Event entry points ----

    pub fn open_view(&mut self, mode: ViewMode) -> Outcome {
        self.dispatch(ViewEvent::Open(mode))
    }

    /// A day cell was tapped.  `month0` is zero-based.  Constructing an
    /// impossible date is an error; tapping a day that cannot be picked is
    /// merely ignored.
    pub fn on_day_selected(
        &mut self,
        year: i32,
        month0: u8,
        day: u8,
    ) -> Result<Outcome, DayError> {
        let day = CalendarDay::new(year, month0, day)?;
        Ok(self.dispatch(ViewEvent::DaySelected(day)))
    }

    pub fn on_year_selected(&mut self, year: i32) -> Outcome {
        self.dispatch(ViewEvent::YearSelected(year))
    }

    pub fn on_duration_digit(&mut self, digit: u8) -> Outcome {
        self.dispatch(ViewEvent::Duration(PadInput::Digit(digit)))
    }

    pub fn on_duration_backspace(&mut self) -> Outcome {
        self.dispatch(ViewEvent::Duration(PadInput::Backspace))
    }

    pub fn on_duration_clear(&mut self) -> Outcome {
        self.dispatch(ViewEvent::Duration(PadInput::Clear))
    }

    pub fn dispatch(&mut self, event: ViewEvent) -> Outcome {
        let before = self.range;
        let outcome = self
            .coordinator
            .dispatch(event, &mut self.range, &self.constraints);
        if outcome == Outcome::DateChanged {
            if self.range.start() != before.start() {
                self.scroll.forget(Side::Start);
            }
            // End-side lists are numbered from the start year
            if self.range.end() != before.end()
                || self.range.start().year() != before.start().year()
            {
                self.scroll.forget(Side::End);
            }
            self.highlight = HighlightSet::from_range(&self.range);
            self.notify();
        }
        outcome
    }

    // ---- Queries ----

    /// A copy of the current range
    pub fn range(&self) -> RangeState {
        self.range
    }

    pub fn view_mode(&self) -> ViewMode {
        self.coordinator.mode()
    }

    pub fn constraints(&self) -> &DateConstraints {
        &self.constraints
    }

    pub fn highlight(&self) -> &HighlightSet {
        &self.highlight
    }

    pub fn pad(&self) -> DurationPad {
        self.coordinator.pad()
    }

    /// The side that typing into the duration pad recomputes
    pub fn duration_side(&self) -> Side {
        self.coordinator.duration_side()
    }

    /// The side being edited by the current view
    pub fn active_side(&self) -> Side {
        self.coordinator.active_side()
    }

    /// The date that should have focus in the current view
    pub fn focus_day(&self) -> CalendarDay {
        self.range.get(self.active_side())
    }

    /// Whether tapping `day` in the current view would pick it
    pub fn is_selectable(&self, day: CalendarDay) -> bool {
        self.coordinator
            .accepts_day(day, &self.range, &self.constraints)
    }

    pub fn is_highlighted(&self, day: CalendarDay) -> bool {
        self.constraints.is_highlighted(day)
    }

    pub fn effective_min_year(&self) -> i32 {
        self.constraints.effective_min_year()
    }

    pub fn effective_max_year(&self) -> i32 {
        self.constraints.effective_max_year()
    }

    /// Years offered by the current side's year list
    pub fn year_range(&self) -> RangeInclusive<i32> {
        self.coordinator.year_range(&self.range, &self.constraints)
    }

    /// Where the current view's list should be scrolled to: the position
    /// last reported for this view, or else the position of the focused
    /// date.  Month grids count months from January of the first listed
    /// year; year lists count years.  `None` for the duration pad.
    pub fn scroll_target(&self) -> Option<usize> {
        let mode = self.view_mode();
        if let Some(pos) = self.scroll.get(mode) {
            return Some(pos);
        }
        let first_year = *self.year_range().start();
        let focus = self.focus_day();
        match mode {
            ViewMode::StartDayGrid | ViewMode::EndDayGrid => {
                Some(month_position(focus, first_year).unwrap_or_default())
            }
            ViewMode::StartYearList | ViewMode::EndYearList => {
                Some(year_position(focus.year(), first_year).unwrap_or_default())
            }
            ViewMode::DurationPad => None,
        }
    }

    /// Record the position a renderer has scrolled the current view to
    pub fn remember_position(&mut self, position: usize) {
        self.scroll.remember(self.view_mode(), position);
    }

    /// Walk one month of the grid, telling `painter` how to draw each part
    pub fn paint_month<P: MonthPainter>(&self, grid: &MonthGrid, painter: &mut P) {
        painter.draw_month_title(grid.year(), grid.month());
        for (col, weekday) in grid.weekdays() {
            painter.draw_weekday(col, weekday);
        }
        let focus = self.focus_day();
        for (row, col, day) in grid.cells() {
            let cell = DayCell {
                selectable: self.is_selectable(day),
                in_range: self.highlight.contains(day),
                endpoint: day == self.range.start() || day == self.range.end(),
                selected: day == focus,
                highlighted: self.is_highlighted(day),
            };
            painter.draw_day_cell(row, col, day, cell);
        }
    }

    // ---- Configuration ----

    pub fn set_min_date(&mut self, date: Option<CalendarDay>) -> Result<(), ConfigError> {
        self.constraints.set_min_date(date)?;
        info!(min_date = ?date, "set minimum date");
        self.reconfigured();
        Ok(())
    }

    pub fn set_max_date(&mut self, date: Option<CalendarDay>) -> Result<(), ConfigError> {
        self.constraints.set_max_date(date)?;
        info!(max_date = ?date, "set maximum date");
        self.reconfigured();
        Ok(())
    }

    pub fn set_selectable_days<I>(&mut self, days: I)
    where
        I: IntoIterator<Item = CalendarDay>,
    {
        self.constraints.set_selectable_days(days);
        info!("set selectable days");
        self.reconfigured();
    }

    pub fn set_highlighted_days<I>(&mut self, days: I)
    where
        I: IntoIterator<Item = CalendarDay>,
    {
        self.constraints.set_highlighted_days(days);
        info!("set highlighted days");
        self.reconfigured();
    }

    pub fn set_year_range(&mut self, start: i32, end: i32) -> Result<(), ConfigError> {
        self.constraints.set_year_range(start, end)?;
        info!(start, end, "set year range");
        self.reconfigured();
        Ok(())
    }

    pub fn set_week_start(&mut self, weekday: Weekday) {
        self.constraints.set_week_start(weekday);
        info!(%weekday, "set first day of week");
        self.reconfigured();
    }

    // ---- Listeners ----

    /// Register a callback to run after every change to the range or the
    /// configuration
    pub fn register_listener<F>(&mut self, callback: F) -> ListenerId
    where
        F: Fn(&RangeState) + 'static,
    {
        self.observers.register(callback)
    }

    pub fn unregister_listener(&mut self, id: ListenerId) -> bool {
        self.observers.unregister(id)
    }

    fn reconfigured(&mut self) {
        self.highlight = HighlightSet::from_range(&self.range);
        self.scroll.clear();
        self.notify();
    }

    fn notify(&self) {
        debug!(
            range = %self.range,
            listeners = self.observers.len(),
            "notifying date listeners"
        );
        for listener in self.observers.snapshot() {
            listener(&self.range);
        }
    }
}
