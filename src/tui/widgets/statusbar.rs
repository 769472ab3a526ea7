use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::state::Tab;
use crate::tui::theme::ThemeStyle;

pub fn render(frame: &mut Frame, area: Rect, tab: Tab, flash: Option<&str>, style: &ThemeStyle) {
    if let Some(message) = flash {
        let paragraph = Paragraph::new(Line::from(Span::styled(message, style.warn())))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut hints = vec![("[1-3]", " tabs  "), ("[t]", " theme  ")];
    match tab {
        Tab::Home => {
            hints.push(("[space]", " tasbih  "));
            hints.push(("[p]", " pause  "));
        }
        Tab::Prayer => {
            hints.push(("[←→↑↓]", " pick  "));
            hints.push(("[Enter]", " select  "));
        }
        Tab::Donations => {
            hints.push(("[Enter]", " card  "));
            hints.push(("[e]", " export  "));
        }
    }
    hints.push(("[?]", " help  "));
    hints.push(("[Esc]", " quit"));

    let mut spans = Vec::new();
    for (key, label) in &hints {
        spans.push(Span::styled(*key, style.accent()));
        spans.push(Span::styled(*label, style.dim()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
