use ratatui::style::{Color, Modifier, Style};

use crate::models::AppTheme;

/// Colours for one app theme. Looked up, never built at runtime.
#[derive(Debug, PartialEq, Eq)]
pub struct ThemeStyle {
    pub name: &'static str,
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
    pub text_dim: Color,
    pub warn: Color,
    pub error: Color,
}

static EMERALD: ThemeStyle = ThemeStyle {
    name: "Emerald Grace",
    bg: Color::Rgb(2, 6, 23),
    surface: Color::Rgb(9, 24, 28),
    border: Color::Rgb(22, 78, 62),
    accent: Color::Rgb(16, 185, 129),
    highlight: Color::Rgb(251, 191, 36),
    text: Color::Rgb(226, 232, 240),
    text_dim: Color::Rgb(100, 116, 139),
    warn: Color::Rgb(245, 158, 11),
    error: Color::Rgb(239, 68, 68),
};

static GOLDEN: ThemeStyle = ThemeStyle {
    name: "Midnight Gold",
    bg: Color::Rgb(18, 16, 14),
    surface: Color::Rgb(28, 25, 20),
    border: Color::Rgb(55, 48, 36),
    accent: Color::Rgb(196, 160, 68),
    highlight: Color::Rgb(210, 138, 60),
    text: Color::Rgb(230, 218, 196),
    text_dim: Color::Rgb(130, 118, 96),
    warn: Color::Rgb(210, 138, 60),
    error: Color::Rgb(180, 82, 62),
};

static INDIGO: ThemeStyle = ThemeStyle {
    name: "Indigo Peace",
    bg: Color::Rgb(10, 10, 35),
    surface: Color::Rgb(20, 22, 58),
    border: Color::Rgb(55, 60, 130),
    accent: Color::Rgb(99, 102, 241),
    highlight: Color::Rgb(96, 165, 250),
    text: Color::Rgb(224, 231, 255),
    text_dim: Color::Rgb(129, 140, 178),
    warn: Color::Rgb(251, 191, 36),
    error: Color::Rgb(244, 63, 94),
};

pub fn style_for(theme: AppTheme) -> &'static ThemeStyle {
    match theme {
        AppTheme::Emerald => &EMERALD,
        AppTheme::Golden => &GOLDEN,
        AppTheme::Indigo => &INDIGO,
    }
}

impl ThemeStyle {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    pub fn surface(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn highlight(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    pub fn warn(&self) -> Style {
        Style::default().fg(self.warn)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_a_distinct_style() {
        let names: Vec<&str> = AppTheme::ALL.iter().map(|t| style_for(*t).name).collect();
        assert_eq!(names, vec!["Emerald Grace", "Midnight Gold", "Indigo Peace"]);
        assert_ne!(style_for(AppTheme::Emerald).accent, style_for(AppTheme::Indigo).accent);
    }

    #[test]
    fn lookup_returns_the_same_table_entry() {
        assert!(std::ptr::eq(style_for(AppTheme::Golden), style_for(AppTheme::Golden)));
    }
}
