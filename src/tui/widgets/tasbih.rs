use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::ThemeStyle;
use crate::utils::numerals::NumeralSystem;

pub fn render(frame: &mut Frame, area: Rect, count: u32, numerals: NumeralSystem, style: &ThemeStyle) {
    let block = Block::default()
        .title(Span::styled(" ডিজিটাল তাসবিহ ", style.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border())
        .style(style.surface());

    let content = vec![
        Line::from(Span::styled(
            numerals.localize(&count.to_string()),
            style.highlight().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("[space] চাপুন", style.dim())),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
