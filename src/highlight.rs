use crate::day::CalendarDay;
use crate::range::RangeState;
use std::iter::successors;

/// Every day from the range's start through its end, inclusive, in order.
/// Rebuilt from scratch whenever the range changes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HighlightSet(Vec<CalendarDay>);

impl HighlightSet {
    pub fn from_range(range: &RangeState) -> HighlightSet {
        let end = range.end();
        HighlightSet(
            successors(Some(range.start()), |&d| (d < end).then(|| d.add_days(1))).collect(),
        )
    }

    pub fn contains(&self, day: CalendarDay) -> bool {
        self.0.binary_search(&day).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Only the default set is empty; any range covers at least one day
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<CalendarDay> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<CalendarDay> {
        self.0.last().copied()
    }
}
