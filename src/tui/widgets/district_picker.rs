use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::geo::table::DIVISIONS;
use crate::tui::state::PickerFocus;
use crate::tui::theme::ThemeStyle;

/// Division list on the left, its districts on the right.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    division_cursor: usize,
    district_cursor: usize,
    focus: PickerFocus,
    style: &ThemeStyle,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let border = |focused: bool| if focused { style.accent() } else { style.border() };

    let divisions: Vec<ListItem> = DIVISIONS
        .iter()
        .map(|d| ListItem::new(Line::from(format!("{} {}", d.icon, d.name))))
        .collect();
    let mut division_state = ListState::default();
    division_state.select(Some(division_cursor));
    let division_list = List::new(divisions)
        .block(
            Block::default()
                .title(Span::styled(" বিভাগ ", style.accent()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border(focus == PickerFocus::Division))
                .style(style.surface()),
        )
        .highlight_style(style.highlight().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(division_list, columns[0], &mut division_state);

    let districts: Vec<ListItem> = DIVISIONS
        .get(division_cursor)
        .map(|d| d.districts)
        .unwrap_or(&[])
        .iter()
        .map(|e| ListItem::new(Line::from(e.name)))
        .collect();
    let mut district_state = ListState::default();
    if focus == PickerFocus::District {
        district_state.select(Some(district_cursor));
    }
    let district_list = List::new(districts)
        .block(
            Block::default()
                .title(Span::styled(" জেলা [Enter] ", style.accent()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border(focus == PickerFocus::District))
                .style(style.surface()),
        )
        .highlight_style(style.highlight().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(district_list, columns[1], &mut district_state);
}
