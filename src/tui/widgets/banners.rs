use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme::ThemeStyle;

pub struct Banner {
    pub title: &'static str,
    pub link: &'static str,
}

impl Banner {
    pub fn is_video(&self) -> bool {
        self.link.contains("youtube.com")
    }
}

pub const BANNERS: &[Banner] = &[
    Banner {
        title: "রমজানের প্রস্তুতি",
        link: "https://www.youtube.com/watch?v=xvFZjo5PgG0",
    },
    Banner {
        title: "শীঘ্রই আসছে",
        link: "#",
    },
    Banner {
        title: "রমজানের ফজিলত",
        link: "https://www.youtube.com/watch?v=68-45pQ0p8U",
    },
];

pub fn render(frame: &mut Frame, area: Rect, current: usize, paused: bool, style: &ThemeStyle) {
    let banner = &BANNERS[current % BANNERS.len()];

    let dots: Vec<Span> = (0..BANNERS.len())
        .map(|i| {
            if i == current % BANNERS.len() {
                Span::styled("━━ ", style.accent())
            } else {
                Span::styled("─ ", style.dim())
            }
        })
        .collect();

    let link = if banner.is_video() {
        Span::styled(format!("▶ {}", banner.link), style.highlight())
    } else {
        Span::styled(" ", style.dim())
    };

    let title = if paused { " ব্যানার (থামানো) " } else { " ব্যানার " };
    let block = Block::default()
        .title(Span::styled(title, style.accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style.border())
        .style(style.surface());

    let content = vec![
        Line::from(Span::styled(banner.title, style.bold())),
        Line::from(link),
        Line::from(dots),
    ];
    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
