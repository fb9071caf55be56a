use crate::constraints::DateConstraints;
use crate::day::CalendarDay;
use crate::duration::{duration_limit, DurationPad, PadInput, PadOutput};
use crate::range::{RangeState, Side};
use std::ops::RangeInclusive;
use tracing::{debug, trace, warn};

/// The five interchangeable views of the picker.  Exactly one is shown at a
/// time.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ViewMode {
    StartDayGrid,
    StartYearList,
    EndDayGrid,
    EndYearList,
    DurationPad,
}

impl ViewMode {
    /// The side whose date this view edits, or `None` for the duration pad
    pub fn side(self) -> Option<Side> {
        match self {
            ViewMode::StartDayGrid | ViewMode::StartYearList => Some(Side::Start),
            ViewMode::EndDayGrid | ViewMode::EndYearList => Some(Side::End),
            ViewMode::DurationPad => None,
        }
    }
}

/// A single user action, as delivered by whatever is handling input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewEvent {
    Open(ViewMode),
    DaySelected(CalendarDay),
    YearSelected(i32),
    Duration(PadInput),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The event does not apply to the current view or targets a day or
    /// year that cannot be picked; nothing changed
    Ignored,
    /// Only the visible view changed
    Navigated,
    /// The range changed (and possibly the view as well)
    DateChanged,
}

/// State machine deciding which view is visible and how each event edits
/// the range.
///
/// | View            | Event         | Next view     |
/// |-----------------|---------------|---------------|
/// | any             | open *view*   | *view*        |
/// | start year list | year selected | start grid    |
/// | end year list   | year selected | end grid      |
/// | start grid      | day selected  | end grid      |
/// | end grid        | day selected  | end grid      |
/// | duration pad    | pad input     | duration pad  |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ViewCoordinator {
    mode: ViewMode,
    duration_side: Side,
    pad: DurationPad,
}

impl ViewCoordinator {
    pub(crate) fn new() -> ViewCoordinator {
        ViewCoordinator {
            mode: ViewMode::StartDayGrid,
            duration_side: Side::Start,
            pad: DurationPad::default(),
        }
    }

    pub(crate) fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The side that duration edits recompute; the other side stays put
    pub(crate) fn duration_side(&self) -> Side {
        self.duration_side
    }

    pub(crate) fn pad(&self) -> DurationPad {
        self.pad
    }

    /// The side whose date is being edited by the current view
    pub(crate) fn active_side(&self) -> Side {
        self.mode.side().unwrap_or(self.duration_side)
    }

    /// Whether a day-grid tap on `day` would be accepted.  While an end
    /// view is showing, the start date is the earliest pickable day.
    pub(crate) fn accepts_day(
        &self,
        day: CalendarDay,
        range: &RangeState,
        constraints: &DateConstraints,
    ) -> bool {
        constraints.is_selectable(day)
            && (self.mode.side() != Some(Side::End) || day >= range.start())
    }

    /// Years offered by the year list of the current side
    pub(crate) fn year_range(
        &self,
        range: &RangeState,
        constraints: &DateConstraints,
    ) -> RangeInclusive<i32> {
        let mut low = constraints.effective_min_year();
        if self.mode.side() == Some(Side::End) {
            low = low.max(range.start().year());
        }
        low..=constraints.effective_max_year()
    }

    pub(crate) fn dispatch(
        &mut self,
        event: ViewEvent,
        range: &mut RangeState,
        constraints: &DateConstraints,
    ) -> Outcome {
        let before = self.mode;
        let outcome = match (self.mode, event) {
            (_, ViewEvent::Open(target)) => {
                self.open(target, range);
                Outcome::Navigated
            }
            (ViewMode::StartDayGrid, ViewEvent::DaySelected(day))
                if self.accepts_day(day, range, constraints) =>
            {
                range.set_start(day);
                self.mode = ViewMode::EndDayGrid;
                Outcome::DateChanged
            }
            (ViewMode::EndDayGrid, ViewEvent::DaySelected(day))
                if self.accepts_day(day, range, constraints) =>
            {
                range.set_end(day);
                Outcome::DateChanged
            }
            (ViewMode::StartYearList, ViewEvent::YearSelected(year)) => {
                self.commit_year(Side::Start, year, range, constraints)
            }
            (ViewMode::EndYearList, ViewEvent::YearSelected(year)) => {
                self.commit_year(Side::End, year, range, constraints)
            }
            (ViewMode::DurationPad, ViewEvent::Duration(input)) => {
                let side = self.duration_side;
                match self.pad.handle_input(input, duration_limit(side, range)) {
                    PadOutput::Ok => {
                        range.set_duration(side, self.pad.value());
                        Outcome::DateChanged
                    }
                    PadOutput::Invalid => Outcome::Ignored,
                }
            }
            _ => Outcome::Ignored,
        };
        if outcome == Outcome::Ignored {
            trace!(?event, view = ?before, "ignoring view event");
        } else {
            debug!(?event, from = ?before, to = ?self.mode, ?outcome, "handled view event");
        }
        outcome
    }

    fn open(&mut self, target: ViewMode, range: &RangeState) {
        if target == ViewMode::DurationPad {
            // Reopening the pad from itself moves the anchor to the other end
            self.duration_side = match self.mode.side() {
                Some(side) => side,
                None => self.duration_side.other(),
            };
            self.pad = DurationPad::begin(range.duration());
        }
        self.mode = target;
    }

    fn commit_year(
        &mut self,
        side: Side,
        year: i32,
        range: &mut RangeState,
        constraints: &DateConstraints,
    ) -> Outcome {
        if !self.year_range(range, constraints).contains(&year) {
            return Outcome::Ignored;
        }
        if let Err(e) = range.set_year(side, year, constraints) {
            warn!(%side, year, error = %e, "could not move date to selected year");
            return Outcome::Ignored;
        }
        self.mode = match side {
            Side::Start => ViewMode::StartDayGrid,
            Side::End => ViewMode::EndDayGrid,
        };
        Outcome::DateChanged
    }
}

impl Default for ViewCoordinator {
    fn default() -> ViewCoordinator {
        ViewCoordinator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn day(d: time::Date) -> CalendarDay {
        CalendarDay::from(d)
    }

    struct Harness {
        coordinator: ViewCoordinator,
        range: RangeState,
        constraints: DateConstraints,
    }

    impl Harness {
        fn new(start: time::Date, end: time::Date) -> Harness {
            Harness {
                coordinator: ViewCoordinator::new(),
                range: RangeState::new(day(start), day(end)),
                constraints: DateConstraints::new(),
            }
        }

        fn send(&mut self, event: ViewEvent) -> Outcome {
            self.coordinator
                .dispatch(event, &mut self.range, &self.constraints)
        }
    }

    #[test]
    fn test_initial_view() {
        let coordinator = ViewCoordinator::new();
        assert_eq!(coordinator.mode(), ViewMode::StartDayGrid);
        assert_eq!(coordinator.active_side(), Side::Start);
    }

    #[test]
    fn test_open_any_view() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 01));
        for target in [
            ViewMode::EndYearList,
            ViewMode::StartYearList,
            ViewMode::DurationPad,
            ViewMode::EndDayGrid,
            ViewMode::StartDayGrid,
        ] {
            assert_eq!(h.send(ViewEvent::Open(target)), Outcome::Navigated);
            assert_eq!(h.coordinator.mode(), target);
        }
    }

    #[test]
    fn test_start_day_advances_to_end_grid() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 05));
        let outcome = h.send(ViewEvent::DaySelected(day(date!(2024 - 06 - 03))));
        assert_eq!(outcome, Outcome::DateChanged);
        assert_eq!(h.coordinator.mode(), ViewMode::EndDayGrid);
        assert_eq!(h.range.start(), day(date!(2024 - 06 - 03)));
        assert_eq!(h.range.end(), day(date!(2024 - 06 - 05)));
    }

    #[test]
    fn test_start_day_after_end_collapses() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 05));
        h.send(ViewEvent::DaySelected(day(date!(2024 - 06 - 20))));
        assert_eq!(h.range.end(), day(date!(2024 - 06 - 20)));
        assert_eq!(h.range.duration(), 0);
    }

    #[test]
    fn test_end_day_stays_on_end_grid() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 01));
        h.send(ViewEvent::Open(ViewMode::EndDayGrid));
        let outcome = h.send(ViewEvent::DaySelected(day(date!(2024 - 06 - 10))));
        assert_eq!(outcome, Outcome::DateChanged);
        assert_eq!(h.coordinator.mode(), ViewMode::EndDayGrid);
        assert_eq!(h.range.duration(), 9);
    }

    #[test]
    fn test_end_grid_blocks_days_before_start() {
        let mut h = Harness::new(date!(2024 - 06 - 05), date!(2024 - 06 - 10));
        h.send(ViewEvent::Open(ViewMode::EndDayGrid));
        let before = h.range;
        let outcome = h.send(ViewEvent::DaySelected(day(date!(2024 - 06 - 04))));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(h.range, before);
    }

    #[test]
    fn test_non_selectable_day_is_ignored() {
        let mut h = Harness::new(date!(2024 - 06 - 05), date!(2024 - 06 - 10));
        h.constraints
            .set_max_date(Some(day(date!(2024 - 06 - 30))))
            .unwrap();
        let outcome = h.send(ViewEvent::DaySelected(day(date!(2024 - 07 - 01))));
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(h.coordinator.mode(), ViewMode::StartDayGrid);
        assert_eq!(h.range.start(), day(date!(2024 - 06 - 05)));
    }

    #[test]
    fn test_events_for_other_views_are_ignored() {
        let mut h = Harness::new(date!(2024 - 06 - 05), date!(2024 - 06 - 10));
        assert_eq!(h.send(ViewEvent::YearSelected(2025)), Outcome::Ignored);
        assert_eq!(
            h.send(ViewEvent::Duration(PadInput::Digit(1))),
            Outcome::Ignored
        );
        h.send(ViewEvent::Open(ViewMode::StartYearList));
        assert_eq!(
            h.send(ViewEvent::DaySelected(day(date!(2024 - 06 - 06)))),
            Outcome::Ignored
        );
        assert_eq!(h.range.start(), day(date!(2024 - 06 - 05)));
    }

    #[test]
    fn test_start_year_selected() {
        let mut h = Harness::new(date!(2024 - 02 - 29), date!(2024 - 03 - 10));
        h.send(ViewEvent::Open(ViewMode::StartYearList));
        assert_eq!(h.send(ViewEvent::YearSelected(2023)), Outcome::DateChanged);
        assert_eq!(h.coordinator.mode(), ViewMode::StartDayGrid);
        assert_eq!(h.range.start(), day(date!(2023 - 02 - 28)));
        assert_eq!(h.range.end(), day(date!(2024 - 03 - 10)));
    }

    #[test]
    fn test_end_year_selected() {
        let mut h = Harness::new(date!(2024 - 02 - 10), date!(2024 - 03 - 10));
        h.send(ViewEvent::Open(ViewMode::EndYearList));
        assert_eq!(h.send(ViewEvent::YearSelected(2026)), Outcome::DateChanged);
        assert_eq!(h.coordinator.mode(), ViewMode::EndDayGrid);
        assert_eq!(h.range.end(), day(date!(2026 - 03 - 10)));
    }

    #[test]
    fn test_year_outside_bounds_is_ignored() {
        let mut h = Harness::new(date!(2024 - 02 - 10), date!(2024 - 03 - 10));
        h.send(ViewEvent::Open(ViewMode::StartYearList));
        assert_eq!(h.send(ViewEvent::YearSelected(1899)), Outcome::Ignored);
        assert_eq!(h.send(ViewEvent::YearSelected(2101)), Outcome::Ignored);
        assert_eq!(h.coordinator.mode(), ViewMode::StartYearList);
        h.send(ViewEvent::Open(ViewMode::EndYearList));
        assert_eq!(
            h.coordinator.year_range(&h.range, &h.constraints),
            2024..=2100
        );
        assert_eq!(h.send(ViewEvent::YearSelected(2023)), Outcome::Ignored);
    }

    #[test]
    fn test_year_list_with_allow_list() {
        let mut h = Harness::new(date!(2030 - 05 - 05), date!(2030 - 05 - 05));
        h.constraints.set_selectable_days([day(date!(2030 - 05 - 05))]);
        assert_eq!(
            h.coordinator.year_range(&h.range, &h.constraints),
            2030..=2030
        );
    }

    #[test]
    fn test_duration_adjusts_start_when_entered_from_start() {
        let mut h = Harness::new(date!(2024 - 06 - 10), date!(2024 - 06 - 10));
        h.send(ViewEvent::Open(ViewMode::DurationPad));
        assert_eq!(h.coordinator.duration_side(), Side::Start);
        h.send(ViewEvent::Duration(PadInput::Digit(1)));
        h.send(ViewEvent::Duration(PadInput::Digit(5)));
        assert_eq!(h.range.duration(), 15);
        assert_eq!(h.range.end(), day(date!(2024 - 06 - 10)));
        assert_eq!(h.range.start(), day(date!(2024 - 05 - 26)));
        h.send(ViewEvent::Duration(PadInput::Backspace));
        assert_eq!(h.range.duration(), 1);
        assert_eq!(h.range.start(), day(date!(2024 - 06 - 09)));
        h.send(ViewEvent::Duration(PadInput::Clear));
        assert_eq!(h.range.duration(), 0);
        assert_eq!(h.range.start(), day(date!(2024 - 06 - 10)));
    }

    #[test]
    fn test_duration_adjusts_end_when_entered_from_end() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 03));
        h.send(ViewEvent::Open(ViewMode::EndYearList));
        h.send(ViewEvent::Open(ViewMode::DurationPad));
        assert_eq!(h.coordinator.duration_side(), Side::End);
        assert_eq!(h.coordinator.pad().value(), 2);
        h.send(ViewEvent::Duration(PadInput::Digit(3)));
        h.send(ViewEvent::Duration(PadInput::Digit(0)));
        assert_eq!(h.range.start(), day(date!(2024 - 06 - 01)));
        assert_eq!(h.range.end(), day(date!(2024 - 07 - 01)));
        assert_eq!(h.range.duration(), 30);
    }

    #[test]
    fn test_reopening_pad_switches_side() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 03));
        h.send(ViewEvent::Open(ViewMode::DurationPad));
        assert_eq!(h.coordinator.duration_side(), Side::Start);
        h.send(ViewEvent::Duration(PadInput::Digit(5)));
        assert_eq!(h.send(ViewEvent::Open(ViewMode::DurationPad)), Outcome::Navigated);
        assert_eq!(h.coordinator.duration_side(), Side::End);
        assert_eq!(h.coordinator.pad().value(), 5);
        assert!(h.coordinator.pad().all_selected());
        h.send(ViewEvent::Duration(PadInput::Digit(7)));
        assert_eq!(h.range.start(), day(date!(2024 - 05 - 29)));
        assert_eq!(h.range.end(), day(date!(2024 - 06 - 05)));
        h.send(ViewEvent::Open(ViewMode::DurationPad));
        assert_eq!(h.coordinator.duration_side(), Side::Start);
    }

    #[test]
    fn test_duration_clamped_at_ceiling() {
        let mut h = Harness::new(date!(2100 - 12 - 25), date!(2100 - 12 - 25));
        h.send(ViewEvent::Open(ViewMode::EndDayGrid));
        h.send(ViewEvent::Open(ViewMode::DurationPad));
        h.send(ViewEvent::Duration(PadInput::Digit(9)));
        assert_eq!(h.range.duration(), 6);
        assert_eq!(h.range.end(), day(date!(2100 - 12 - 31)));
    }

    #[test]
    fn test_invalid_digit_is_ignored() {
        let mut h = Harness::new(date!(2024 - 06 - 01), date!(2024 - 06 - 03));
        h.send(ViewEvent::Open(ViewMode::DurationPad));
        assert_eq!(
            h.send(ViewEvent::Duration(PadInput::Digit(12))),
            Outcome::Ignored
        );
        assert_eq!(h.range.duration(), 2);
    }
}
