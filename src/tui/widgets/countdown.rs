use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::prayer_times::DayTimes;
use crate::status::engine::Countdown;
use crate::tui::theme::ThemeStyle;
use crate::utils::format::pad2;
use crate::utils::numerals::NumeralSystem;

/// Time left until Ramadan, or today's sehri and iftar once it has started.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    countdown: Option<&Countdown>,
    today: &DayTimes,
    numerals: NumeralSystem,
    style: &ThemeStyle,
) {
    let content = match countdown {
        Some(c) => {
            let value = |v: i64| Span::styled(pad2(v, numerals), style.bold().add_modifier(Modifier::BOLD));
            let label = |l: &'static str| Span::styled(format!(" {}  ", l), style.dim());
            vec![
                Line::from(Span::styled("রমজান শুরু হতে বাকি", style.accent())),
                Line::from(""),
                Line::from(vec![
                    value(c.days),
                    label("দিন"),
                    value(c.hours),
                    label("ঘণ্টা"),
                    value(c.minutes),
                    label("মিনিট"),
                    Span::styled(pad2(c.seconds, numerals), style.highlight().add_modifier(Modifier::BOLD)),
                    label("সেকেন্ড"),
                ]),
            ]
        }
        None => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("সেহরি শেষ  ", style.dim()),
                Span::styled(today.sehri_end.clone(), style.bold()),
                Span::styled("     ইফতার  ", style.dim()),
                Span::styled(today.maghrib.clone(), style.highlight().add_modifier(Modifier::BOLD)),
            ]),
        ],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border())
        .style(style.surface());

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
