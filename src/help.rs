use crate::theme::{BASE_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static KEYS: &[(&str, &str)] = &[
    ("s / S", "Start date: day grid / year list"),
    ("e / E", "End date: day grid / year list"),
    ("d", "Type the duration in days"),
    ("ARROWS, hjkl", "Move the cursor"),
    ("PAGE UP/DOWN", "Change month (year list: 10 years)"),
    ("ENTER, SPACE", "Pick the day or year under the cursor"),
    ("0-9, BACKSPACE", "Edit the duration"),
    ("DELETE", "Clear the duration"),
    ("TAB, d", "Duration: switch which date moves"),
    ("o", "Accept the range and exit"),
    ("q, ESC", "Cancel"),
    ("?", "Show this help"),
];

/// Width of the key column, including the gap after it
const KEY_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Help {
    fn text() -> Text<'static> {
        let mut lines = KEYS
            .iter()
            .map(|(key, what)| Line::raw(format!("{key:KEY_WIDTH$}{what}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // Leave a one-column gutter on either side so the popup doesn't butt
        // up against the grid beneath it
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(Line::styled(" Keys ", TITLE_STYLE).centered())
                    .style(BASE_STYLE),
            )
            .render(help_area, buf);
    }
}
