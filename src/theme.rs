use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const FOOTER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// The date or duration in the header that the current view is editing
pub(crate) const ACTIVE_FIELD_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

pub(crate) mod grid {
    use super::*;

    /// Days that cannot be picked from the current view
    pub(crate) const DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const IN_RANGE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

    pub(crate) const ENDPOINT_STYLE: Style = Style::new()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);

    /// The date being edited by the current view
    pub(crate) const SELECTED_STYLE: Style = Style::new()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD);

    /// Patched on top of the other styles for configured highlighted days
    pub(crate) const HIGHLIGHTED_PATCH: Style = Style::new()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::UNDERLINED);
}

pub(crate) mod pad {
    use super::*;

    /// The pad's value while a typed digit would replace all of it
    pub(crate) const ALL_SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
