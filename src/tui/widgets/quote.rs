use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::IslamicQuote;
use crate::tui::theme::ThemeStyle;

pub fn render(frame: &mut Frame, area: Rect, quote: Option<&IslamicQuote>, style: &ThemeStyle) {
    let block = Block::default()
        .title(Span::styled(" 📖 দিনের অনুপ্রেরণা ", style.warn()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border())
        .style(style.surface());

    let content = match quote {
        Some(q) => vec![
            Line::from(Span::styled(format!("\"{}\"", q.text), style.bold())),
            Line::from(""),
            Line::from(Span::styled(format!("— {}", q.reference), style.warn())),
        ],
        None => vec![Line::from(Span::styled("লোড হচ্ছে...", style.dim()))],
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
