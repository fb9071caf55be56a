use super::util::{show_day, BufferCanvas, WeekdayExt, ACS_HLINE};
use crate::theme::{
    grid::{DISABLED_STYLE, ENDPOINT_STYLE, HIGHLIGHTED_PATCH, IN_RANGE_STYLE, SELECTED_STYLE},
    BASE_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use rangepick::{CalendarDay, DateRangePicker, DayCell, MonthGrid, MonthPainter};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    widgets::Widget,
};
use time::{Month, Weekday};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

const GRID_WIDTH: u16 = 7 * DAY_WIDTH;

const TITLE_LINE: u16 = 0;

const WEEKDAY_LINE: u16 = 1;

const RULE_LINE: u16 = 2;

const FIRST_WEEK_LINE: u16 = 3;

/// One month of the day grid, showing the month containing the cursor
#[derive(Clone, Copy, Debug)]
pub(crate) struct MonthView<'a> {
    picker: &'a DateRangePicker,
    cursor: CalendarDay,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(picker: &'a DateRangePicker, cursor: CalendarDay) -> Self {
        MonthView { picker, cursor }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([GRID_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let grid = MonthGrid::containing(self.cursor, self.picker.constraints().week_start());
        let mut painter = GridPainter {
            canvas: BufferCanvas::new(area, buf),
            cursor: self.cursor,
        };
        self.picker.paint_month(&grid, &mut painter);
        painter.canvas.hline(RULE_LINE, 0, ACS_HLINE, GRID_WIDTH);
    }
}

#[derive(Debug)]
struct GridPainter<'a> {
    canvas: BufferCanvas<'a>,
    cursor: CalendarDay,
}

impl MonthPainter for GridPainter<'_> {
    fn draw_month_title(&mut self, year: i32, month: Month) {
        self.canvas
            .print_centered(TITLE_LINE, format!("{month} {year}"), Some(TITLE_STYLE));
    }

    fn draw_weekday(&mut self, col: u8, weekday: Weekday) {
        self.canvas.mvprint(
            WEEKDAY_LINE,
            u16::from(col) * DAY_WIDTH,
            format!(" {} ", weekday.abbrev()),
            Some(WEEKDAY_STYLE),
        );
    }

    fn draw_day_cell(&mut self, row: u8, col: u8, day: CalendarDay, cell: DayCell) {
        self.canvas.mvprint(
            FIRST_WEEK_LINE + u16::from(row),
            u16::from(col) * DAY_WIDTH,
            show_day(day.day(), day == self.cursor),
            Some(day_style(cell)),
        );
    }
}

fn day_style(cell: DayCell) -> Style {
    let style = if cell.selected {
        SELECTED_STYLE
    } else if cell.endpoint {
        ENDPOINT_STYLE
    } else if cell.in_range {
        IN_RANGE_STYLE
    } else if cell.selectable {
        BASE_STYLE
    } else {
        DISABLED_STYLE
    };
    if cell.highlighted {
        style.patch(HIGHLIGHTED_PATCH)
    } else {
        style
    }
}
