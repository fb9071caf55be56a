use super::util::{BufferCanvas, ACS_HLINE};
use crate::theme::{grid::SELECTED_STYLE, BASE_STYLE, TITLE_STYLE};
use rangepick::{DateRangePicker, Side};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::Widget,
};
use std::ops::RangeInclusive;

const LIST_WIDTH: u16 = 12;

/// Number of lines taken up by the title and its rule
const HEADER_LINES: u16 = 2;

/// Scrolling list of the years the active side's date may be moved to
#[derive(Clone, Copy, Debug)]
pub(crate) struct YearList<'a> {
    picker: &'a DateRangePicker,
    cursor: i32,
}

impl<'a> YearList<'a> {
    pub(crate) fn new(picker: &'a DateRangePicker, cursor: i32) -> Self {
        YearList { picker, cursor }
    }
}

impl Widget for YearList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([LIST_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        let title = match self.picker.active_side() {
            Side::Start => "Start year",
            Side::End => "End year",
        };
        canvas.print_centered(0, title, Some(TITLE_STYLE));
        canvas.hline(1, 0, ACS_HLINE, LIST_WIDTH);
        let rows = canvas.height().saturating_sub(HEADER_LINES);
        let years = self.picker.year_range();
        let top = first_visible(&years, self.cursor, rows);
        let current = self.picker.focus_day().year();
        for (line, year) in (HEADER_LINES..canvas.height()).zip(top..=*years.end()) {
            let text = if year == self.cursor {
                format!("[{year}]")
            } else {
                format!(" {year} ")
            };
            let style = if year == current {
                SELECTED_STYLE
            } else {
                BASE_STYLE
            };
            canvas.print_centered(line, text, Some(style));
        }
    }
}

/// The topmost year to show so that `cursor` sits mid-list where possible
fn first_visible(years: &RangeInclusive<i32>, cursor: i32, rows: u16) -> i32 {
    let last_top = years
        .end()
        .saturating_sub(i32::from(rows))
        .saturating_add(1);
    cursor
        .saturating_sub(i32::from(rows / 2))
        .min(last_top)
        .max(*years.start())
}
