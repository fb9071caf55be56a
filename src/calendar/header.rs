use crate::theme::{ACTIVE_FIELD_STYLE, BASE_STYLE};
use rangepick::{DateRangePicker, Side, ViewMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

/// One-line summary of the picked range, with the field that the current
/// view edits picked out
#[derive(Clone, Copy, Debug)]
pub(crate) struct RangeHeader<'a>(pub(crate) &'a DateRangePicker);

impl Widget for RangeHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let range = self.0.range();
        let mode = self.0.view_mode();
        let field = |active: bool| if active { ACTIVE_FIELD_STYLE } else { BASE_STYLE };
        let days = range.duration();
        let spans: [(String, Style); 6] = [
            ("Start ".into(), BASE_STYLE),
            (range.start().to_string(), field(mode.side() == Some(Side::Start))),
            ("   End ".into(), BASE_STYLE),
            (range.end().to_string(), field(mode.side() == Some(Side::End))),
            ("   Duration ".into(), BASE_STYLE),
            (
                format!("{days} day{}", if days == 1 { "" } else { "s" }),
                field(mode == ViewMode::DurationPad),
            ),
        ];
        Line::from_iter(spans.map(|(s, style)| Span::styled(s, style)))
            .centered()
            .render(area, buf);
    }
}
