use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::DonationRecord;
use crate::share::card::donation_card;
use crate::tui::theme::ThemeStyle;
use crate::utils::numerals::NumeralSystem;

fn block<'a>(title: &'a str, style: &ThemeStyle) -> Block<'a> {
    Block::default()
        .title(Span::styled(title, style.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border())
        .style(style.surface())
}

/// Home screen carousel: one donor at a time.
pub fn render_carousel(
    frame: &mut Frame,
    area: Rect,
    donations: &[DonationRecord],
    current: usize,
    numerals: NumeralSystem,
    style: &ThemeStyle,
) {
    let content = match donations.get(current) {
        Some(d) => vec![
            Line::from(vec![
                Span::styled("❤ ", style.error()),
                Span::styled(d.name.clone(), style.bold()),
            ]),
            Line::from(Span::styled(
                format!("৳ {}", numerals.localize(&d.amount)),
                style.highlight().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(d.message.clone(), style.dim())),
        ],
        None => vec![Line::from(Span::styled("এখনও কোনো অনুদান নেই", style.dim()))],
    };

    let paragraph = Paragraph::new(content)
        .block(block(" সাম্প্রতিক অনুদান ", style))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    donations: &[DonationRecord],
    cursor: usize,
    numerals: NumeralSystem,
    style: &ThemeStyle,
) {
    let items: Vec<ListItem> = donations
        .iter()
        .map(|d| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {}", d.name), style.bold()),
                Span::styled(format!("  ৳ {}", numerals.localize(&d.amount)), style.highlight()),
                Span::styled(format!("  {}", d.message), style.dim()),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(cursor));

    let list = List::new(items)
        .block(block(" অনুদান তালিকা ", style))
        .highlight_style(style.accent().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// The thank-you card for one donation.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    donation: &DonationRecord,
    numerals: NumeralSystem,
    style: &ThemeStyle,
) {
    let card = donation_card(donation, Local::now().date_naive(), numerals);
    let lines: Vec<Line> = card
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), style.accent())))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block(" অনুদান সারসংক্ষেপ ", style))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
