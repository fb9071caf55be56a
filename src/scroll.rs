use crate::coordinator::ViewMode;
use crate::range::Side;

/// Last list position reported for each scrollable view, so that coming
/// back to a view shows what was on screen when it was left
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScrollMemory {
    start_grid: Option<usize>,
    start_years: Option<usize>,
    end_grid: Option<usize>,
    end_years: Option<usize>,
}

impl ScrollMemory {
    pub(crate) fn get(&self, mode: ViewMode) -> Option<usize> {
        match mode {
            ViewMode::StartDayGrid => self.start_grid,
            ViewMode::StartYearList => self.start_years,
            ViewMode::EndDayGrid => self.end_grid,
            ViewMode::EndYearList => self.end_years,
            ViewMode::DurationPad => None,
        }
    }

    pub(crate) fn remember(&mut self, mode: ViewMode, position: usize) {
        let slot = match mode {
            ViewMode::StartDayGrid => &mut self.start_grid,
            ViewMode::StartYearList => &mut self.start_years,
            ViewMode::EndDayGrid => &mut self.end_grid,
            ViewMode::EndYearList => &mut self.end_years,
            ViewMode::DurationPad => return,
        };
        *slot = Some(position);
    }

    /// Drop the remembered positions of one side's views, typically
    /// because that side's date moved
    pub(crate) fn forget(&mut self, side: Side) {
        match side {
            Side::Start => {
                self.start_grid = None;
                self.start_years = None;
            }
            Side::End => {
                self.end_grid = None;
                self.end_years = None;
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = ScrollMemory::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remember_and_forget() {
        let mut memory = ScrollMemory::default();
        memory.remember(ViewMode::StartDayGrid, 5);
        memory.remember(ViewMode::EndYearList, 7);
        memory.remember(ViewMode::DurationPad, 9);
        assert_eq!(memory.get(ViewMode::StartDayGrid), Some(5));
        assert_eq!(memory.get(ViewMode::EndYearList), Some(7));
        assert_eq!(memory.get(ViewMode::DurationPad), None);
        memory.forget(Side::Start);
        assert_eq!(memory.get(ViewMode::StartDayGrid), None);
        assert_eq!(memory.get(ViewMode::EndYearList), Some(7));
        memory.clear();
        assert_eq!(memory, ScrollMemory::default());
    }
}
