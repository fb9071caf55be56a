use crate::theme::{
    pad::{ALL_SELECTED_STYLE, HINT_STYLE},
    BASE_STYLE,
};
use rangepick::{DateRangePicker, Side};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
};

const OUTER_WIDTH: u16 = 23;
const OUTER_HEIGHT: u16 = 9;

/// Popup for typing the length of the range in days
#[derive(Clone, Copy, Debug)]
pub(crate) struct DurationPopup<'a>(pub(crate) &'a DateRangePicker);

impl Widget for DurationPopup<'_> {
    /*
     * .......................
     * .┌──── Duration ─────┐.
     * .│                   │.
     * .│        15         │.
     * .│       days        │.
     * .│                   │.
     * .│ Moves start date  │.
     * .└───────────────────┘.
     * .......................
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Duration ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        self.to_text().render(text_area, buf);
    }
}

impl DurationPopup<'_> {
    fn to_text(self) -> Text<'static> {
        let pad = self.0.pad();
        let value = pad.value();
        let hint = match self.0.duration_side() {
            Side::Start => "Moves start date",
            Side::End => "Moves end date",
        };
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            // Style a span rather than the line so that the centering padding
            // isn't reversed along with the number
            Line::from(Span::styled(
                value.to_string(),
                if pad.all_selected() {
                    ALL_SELECTED_STYLE
                } else {
                    BASE_STYLE
                },
            )),
            Line::styled(if value == 1 { "day" } else { "days" }, BASE_STYLE),
            Line::styled("", BASE_STYLE),
            Line::styled(hint, HINT_STYLE),
        ])
        .centered()
    }
}
