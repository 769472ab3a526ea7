use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::status::{DisplayMode, LiveStatus};
use crate::tui::theme::ThemeStyle;

pub fn render(frame: &mut Frame, area: Rect, status: &LiveStatus, style: &ThemeStyle) {
    let block = Block::default()
        .title(Span::styled(" লাইভ স্ট্যাটাস ", style.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border())
        .style(style.surface());

    let content = match status.mode {
        DisplayMode::Countdown => vec![
            Line::from(Span::styled("ইফতারের বাকি", style.warn())),
            Line::from(Span::styled(
                status.iftar_countdown.clone(),
                style.highlight().add_modifier(Modifier::BOLD),
            )),
        ],
        DisplayMode::Adhan => vec![
            Line::from(Span::styled(
                "🕌 আজান চলছে...",
                style.accent().add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )),
            Line::from(Span::styled("[a] বন্ধ করুন", style.dim())),
        ],
        DisplayMode::PrayerTimes => match &status.next_prayer {
            Some(next) => vec![
                Line::from(Span::styled(
                    next.time.clone(),
                    style.highlight().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(next.label.clone(), style.bold())),
            ],
            None => vec![Line::from(Span::styled("--:--", style.dim()))],
        },
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
