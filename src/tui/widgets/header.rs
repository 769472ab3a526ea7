use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::state::Tab;
use crate::tui::theme::ThemeStyle;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    ramadan_day: &str,
    district: &str,
    hijri_str: &str,
    active: Tab,
    style: &ThemeStyle,
) {
    let title_line = Line::from(vec![
        Span::styled(format!("আজ {} রমজান", ramadan_day), style.bold()),
        Span::styled("  LIVE  ", style.accent().add_modifier(Modifier::BOLD)),
        Span::styled(format!("● {}", district), style.dim()),
    ]);

    let date_line = Line::from(Span::styled(hijri_str, style.highlight()));

    let mut tabs = Vec::new();
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let label = format!(" [{}] {} ", i + 1, tab.title());
        let s = if *tab == active {
            style.accent().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style.dim()
        };
        tabs.push(Span::styled(label, s));
        tabs.push(Span::raw(" "));
    }

    let text = vec![title_line, date_line, Line::from(tabs)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.accent().add_modifier(Modifier::BOLD))
        .style(style.base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
