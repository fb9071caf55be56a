use crate::calendar::{BufferCanvas, DurationPopup, MonthView, RangeHeader, YearList, ACS_HLINE};
use crate::help::Help;
use crate::theme::{BASE_STYLE, FOOTER_STYLE};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rangepick::{
    month_at_position, month_position, year_position, CalendarDay, DateRangePicker, Outcome,
    RangeState, ViewMode,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};
use tracing::{debug, warn};

static FOOTER: &str = "s/S start   e/E end   d duration   o accept   q cancel   ? help";

/// Number of years moved by PAGE UP/PAGE DOWN in a year list
const YEAR_PAGE: i32 = 10;

#[derive(Clone, Debug)]
pub(crate) struct App {
    picker: DateRangePicker,
    /// Day under the cursor in the day grids
    cursor: CalendarDay,
    /// Year under the cursor in the year lists
    year_cursor: i32,
    state: AppState,
}

impl App {
    pub(crate) fn new(picker: DateRangePicker) -> App {
        let focus = picker.focus_day();
        let mut app = App {
            picker,
            cursor: focus,
            year_cursor: focus.year(),
            state: AppState::Picking,
        };
        app.sync_cursor();
        app
    }

    /// Run until the user accepts or cancels.  Returns the range if it was
    /// accepted.
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<RangeState>> {
        while self.running() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok((self.state == AppState::Accepted).then(|| self.picker.range()))
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Cancelled;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                debug!(?code, ?modifiers, "rejected key press");
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key does nothing in the current view
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('s') => self.open(ViewMode::StartDayGrid),
                KeyCode::Char('S') => self.open(ViewMode::StartYearList),
                KeyCode::Char('e') => self.open(ViewMode::EndDayGrid),
                KeyCode::Char('E') => self.open(ViewMode::EndYearList),
                KeyCode::Char('d') => self.open(ViewMode::DurationPad),
                KeyCode::Char('o') => {
                    self.state = AppState::Accepted;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Cancelled;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => match self.picker.view_mode() {
                    ViewMode::StartDayGrid | ViewMode::EndDayGrid => self.handle_grid_key(key),
                    ViewMode::StartYearList | ViewMode::EndYearList => self.handle_year_key(key),
                    ViewMode::DurationPad => self.handle_pad_key(key),
                },
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Accepted | AppState::Cancelled => false,
        }
    }

    fn handle_grid_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
            KeyCode::PageUp => self.move_month(-1),
            KeyCode::PageDown => self.move_month(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_day(),
            _ => false,
        }
    }

    fn handle_year_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('k') | KeyCode::Up => self.move_year(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_year(1),
            KeyCode::PageUp => self.move_year(-YEAR_PAGE),
            KeyCode::PageDown => self.move_year(YEAR_PAGE),
            KeyCode::Enter | KeyCode::Char(' ') => self.select_year(),
            _ => false,
        }
    }

    fn handle_pad_key(&mut self, key: KeyCode) -> bool {
        let outcome = match key {
            KeyCode::Char(c @ '0'..='9') => match u8::try_from(c) {
                Ok(b) => self.picker.on_duration_digit(b - b'0'),
                Err(_) => Outcome::Ignored,
            },
            KeyCode::Backspace => self.picker.on_duration_backspace(),
            KeyCode::Delete => self.picker.on_duration_clear(),
            KeyCode::Tab => self.picker.open_view(ViewMode::DurationPad),
            _ => Outcome::Ignored,
        };
        outcome != Outcome::Ignored
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn running(&self) -> bool {
        matches!(self.state, AppState::Picking | AppState::Helping)
    }

    fn open(&mut self, mode: ViewMode) -> bool {
        self.picker.open_view(mode);
        self.sync_cursor();
        true
    }

    fn select_day(&mut self) -> bool {
        let day = self.cursor;
        match self
            .picker
            .on_day_selected(day.year(), day.month0(), day.day())
        {
            Ok(Outcome::Ignored) => false,
            Ok(_) => {
                self.sync_cursor();
                true
            }
            Err(e) => {
                warn!(%day, error = %e, "cursor is on an impossible date");
                false
            }
        }
    }

    fn select_year(&mut self) -> bool {
        if self.picker.on_year_selected(self.year_cursor) == Outcome::Ignored {
            false
        } else {
            self.sync_cursor();
            true
        }
    }

    fn move_cursor(&mut self, days: i32) -> bool {
        self.set_cursor(self.cursor.add_days(days))
    }

    fn move_month(&mut self, months: i32) -> bool {
        self.cursor
            .add_months(months)
            .is_some_and(|day| self.set_cursor(day))
    }

    fn set_cursor(&mut self, day: CalendarDay) -> bool {
        let years = self.picker.year_range();
        if !years.contains(&day.year()) {
            return false;
        }
        self.cursor = day;
        if let Some(pos) = month_position(day, *years.start()) {
            self.picker.remember_position(pos);
        }
        true
    }

    fn move_year(&mut self, delta: i32) -> bool {
        let years = self.picker.year_range();
        let year = self
            .year_cursor
            .saturating_add(delta)
            .min(*years.end())
            .max(*years.start());
        if year == self.year_cursor {
            return false;
        }
        self.year_cursor = year;
        if let Some(pos) = year_position(year, *years.start()) {
            self.picker.remember_position(pos);
        }
        true
    }

    /// Point the cursor of the view now showing at wherever the picker says
    /// that view should be scrolled to
    fn sync_cursor(&mut self) {
        let Some(position) = self.picker.scroll_target() else {
            return;
        };
        let first_year = *self.picker.year_range().start();
        let focus = self.picker.focus_day();
        match self.picker.view_mode() {
            ViewMode::StartDayGrid | ViewMode::EndDayGrid => {
                let day = self.cursor.day();
                self.cursor = month_at_position(position, first_year)
                    .filter(|&ym| ym != (focus.year(), focus.month()))
                    .and_then(|(year, month)| {
                        CalendarDay::clamped(year, u8::from(month) - 1, day).ok()
                    })
                    .unwrap_or(focus);
            }
            ViewMode::StartYearList | ViewMode::EndYearList => {
                self.year_cursor = i32::try_from(position)
                    .ok()
                    .and_then(|p| first_year.checked_add(p))
                    .unwrap_or_else(|| focus.year());
            }
            ViewMode::DurationPad => (),
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [header_area, rule_area, _, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        RangeHeader(&self.picker).render(header_area, buf);
        BufferCanvas::new(rule_area, buf).hline(0, 0, ACS_HLINE, rule_area.width);
        match self.picker.view_mode() {
            ViewMode::StartDayGrid | ViewMode::EndDayGrid => {
                MonthView::new(&self.picker, self.cursor).render(body_area, buf);
            }
            ViewMode::StartYearList | ViewMode::EndYearList => {
                YearList::new(&self.picker, self.year_cursor).render(body_area, buf);
            }
            ViewMode::DurationPad => {
                MonthView::new(&self.picker, self.picker.focus_day()).render(body_area, buf);
                DurationPopup(&self.picker).render(body_area, buf);
            }
        }
        Line::styled(FOOTER, FOOTER_STYLE)
            .centered()
            .render(footer_area, buf);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Accepted,
    Cancelled,
}
