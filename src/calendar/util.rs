use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};
use time::Weekday;

pub(crate) const ACS_HLINE: char = '─';

pub(super) trait WeekdayExt {
    /// Two-letter name used for column headers
    fn abbrev(&self) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Su",
            Weekday::Monday => "Mo",
            Weekday::Tuesday => "Tu",
            Weekday::Wednesday => "We",
            Weekday::Thursday => "Th",
            Weekday::Friday => "Fr",
            Weekday::Saturday => "Sa",
        }
    }
}

/// A day of the month as a four-column cell, bracketed if it's under the
/// cursor
pub(super) fn show_day(day: u8, is_cursor: bool) -> String {
    if is_cursor {
        format!("[{day:2}]")
    } else {
        format!(" {day:2} ")
    }
}

/// Line-and-column drawing within a fixed area of a buffer.  Anything that
/// would land outside the area is clipped.
#[derive(Debug)]
pub(crate) struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    pub(crate) fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    pub(super) fn height(&self) -> u16 {
        self.area.height
    }

    pub(super) fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect given to the Paragraph must lie entirely within the
            // buffer, so trim it to what's left of the area.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    /// Print `s` horizontally centered on line `y`
    pub(super) fn print_centered<S: AsRef<str>>(&mut self, y: u16, s: S, style: Option<Style>) {
        let width = u16::try_from(Text::raw(s.as_ref()).width()).unwrap_or(u16::MAX);
        let x = self.area.width.saturating_sub(width) / 2;
        self.mvprint(y, x, s, style);
    }

    pub(crate) fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
