use ratatui::{
    layout::{Constraint, Rect},
    style::Modifier,
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::models::District;
use crate::prayer_times::calculator::{compute_day_times_with, FIRST_DAY, LAST_DAY};
use crate::tui::theme::ThemeStyle;
use crate::utils::numerals::NumeralSystem;

/// Sehri and iftar for all thirty days, today highlighted.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    district: &District,
    today: u32,
    numerals: NumeralSystem,
    style: &ThemeStyle,
) {
    let header = Row::new(vec![
        Cell::from("রমজান"),
        Cell::from("সেহরি শেষ"),
        Cell::from("ইফতার"),
    ])
    .style(style.accent().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = (FIRST_DAY..=LAST_DAY)
        .map(|day| {
            let times = compute_day_times_with(day, district.minute_offset, numerals);
            let row = Row::new(vec![
                Cell::from(numerals.localize(&day.to_string())),
                Cell::from(times.sehri_end),
                Cell::from(times.maghrib),
            ]);
            if day == today {
                row.style(style.highlight().add_modifier(Modifier::BOLD))
            } else {
                row.style(style.base())
            }
        })
        .collect();

    let mut table_state = TableState::default();
    table_state.select(Some(today.saturating_sub(FIRST_DAY) as usize));

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(Span::styled(format!(" {} · ৩০ দিনের সময়সূচী ", district.name), style.accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style.border())
            .style(style.surface()),
    );

    frame.render_stateful_widget(table, area, &mut table_state);
}
