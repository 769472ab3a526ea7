use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::PrefsRepo;
use crate::models::District;
use crate::prayer_times::calculator::compute_day_times_with;
use crate::tui::events::{Event, EventHandler};
use crate::tui::state::AppState;
use crate::tui::theme::{style_for, ThemeStyle};
use crate::tui::widgets::district_picker;
use crate::utils::numerals::NumeralSystem;

// ─── Wizard steps ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Welcome,
    Pick,
    Confirm,
}

// ─── Wizard state ────────────────────────────────────────────────────────────

struct SetupWizard {
    step: Step,
    picker: AppState,
    chosen: Option<District>,
    error: Option<&'static str>,
    numerals: NumeralSystem,
    should_quit: bool,
    confirmed: bool,
}

impl SetupWizard {
    fn new(picker: AppState, numerals: NumeralSystem) -> Self {
        Self {
            step: Step::Welcome,
            picker,
            chosen: None,
            error: None,
            numerals,
            should_quit: false,
            confirmed: false,
        }
    }

    fn step_number(&self) -> usize {
        match self.step {
            Step::Welcome => 0,
            Step::Pick => 1,
            Step::Confirm => 2,
        }
    }

    const TOTAL_STEPS: usize = 2;

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.error = None;

        match self.step {
            Step::Welcome => {
                if key.code == KeyCode::Esc {
                    self.should_quit = true;
                } else {
                    self.step = Step::Pick;
                }
            }

            Step::Pick => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.picker.picker_move(false),
                KeyCode::Down | KeyCode::Char('j') => self.picker.picker_move(true),
                KeyCode::Left | KeyCode::Char('h') => self.picker.picker_left(),
                KeyCode::Right | KeyCode::Char('l') => self.picker.picker_right(),
                KeyCode::Enter => match self.picker.picker_choice() {
                    Some(district) => {
                        self.chosen = Some(district);
                        self.step = Step::Confirm;
                    }
                    None => {
                        self.picker.picker_right();
                        self.error = Some("ডান দিকের তালিকা থেকে জেলা বেছে নিন");
                    }
                },
                KeyCode::Esc => self.step = Step::Welcome,
                _ => {}
            },

            Step::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => self.confirmed = true,
                KeyCode::Esc | KeyCode::Char('n') => self.step = Step::Pick,
                _ => {}
            },
        }
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

fn draw(frame: &mut Frame, wizard: &SetupWizard, style: &ThemeStyle) {
    let area = frame.area();
    frame.render_widget(Block::default().style(style.base()), area);

    let vchunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(22), Constraint::Min(0)])
        .split(area);
    let hchunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(64), Constraint::Min(0)])
        .split(vchunks[1]);

    let box_area = hchunks[1];
    frame.render_widget(Clear, box_area);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style.accent())
            .style(style.surface())
            .title(Span::styled("  রোজা · roza · জেলা নির্বাচন  ", style.accent().add_modifier(Modifier::BOLD)))
            .title_alignment(Alignment::Center),
        box_area,
    );

    let inner = Rect {
        x: box_area.x + 2,
        y: box_area.y + 1,
        width: box_area.width.saturating_sub(4),
        height: box_area.height.saturating_sub(2),
    };

    draw_progress(frame, inner, wizard.step_number(), SetupWizard::TOTAL_STEPS, style);

    let content = Rect {
        x: inner.x,
        y: inner.y + 2,
        width: inner.width,
        height: inner.height.saturating_sub(2),
    };
    match wizard.step {
        Step::Welcome => draw_welcome(frame, content, style),
        Step::Pick => draw_pick(frame, content, wizard, style),
        Step::Confirm => draw_confirm(frame, content, wizard, style),
    }
}

fn draw_progress(frame: &mut Frame, area: Rect, current: usize, total: usize, style: &ThemeStyle) {
    let mut spans = vec![Span::styled("  ", style.dim())];
    for i in 1..=total {
        if i < current {
            spans.push(Span::styled("● ", style.highlight()));
        } else if i == current {
            spans.push(Span::styled("◉ ", style.accent()));
        } else {
            spans.push(Span::styled("○ ", style.dim()));
        }
    }
    let progress_area = Rect { height: 1, ..area };
    frame.render_widget(Paragraph::new(Line::from(spans)), progress_area);
}

fn draw_welcome(frame: &mut Frame, area: Rect, style: &ThemeStyle) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("আসসালামু আলাইকুম", style.accent().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("সেহরি ও ইফতারের সঠিক সময় দেখাতে", style.base())),
        Line::from(Span::styled("আপনার জেলা বেছে নিন।", style.base())),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("যেকোনো কী  শুরু   ·   Esc  বাতিল", style.dim())),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_pick(frame: &mut Frame, area: Rect, wizard: &SetupWizard, style: &ThemeStyle) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    district_picker::render(
        frame,
        chunks[0],
        wizard.picker.division_cursor(),
        wizard.picker.district_cursor(),
        wizard.picker.picker_focus(),
        style,
    );

    let hint = match wizard.error {
        Some(message) => Span::styled(message, style.error()),
        None => Span::styled("←→ তালিকা   ↑↓ সরান   Enter বেছে নিন", style.dim()),
    };
    frame.render_widget(Paragraph::new(Line::from(hint)).alignment(Alignment::Center), chunks[1]);
}

fn draw_confirm(frame: &mut Frame, area: Rect, wizard: &SetupWizard, style: &ThemeStyle) {
    let Some(district) = &wizard.chosen else {
        return;
    };
    let first_day = compute_day_times_with(1, district.minute_offset, wizard.numerals);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("নিশ্চিত করুন", style.accent().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  জেলা        ", style.dim()),
            Span::styled(district.name.as_str(), style.bold()),
        ]),
        Line::from(vec![
            Span::styled("  ১ম সেহরি    ", style.dim()),
            Span::styled(first_day.sehri_end, style.bold()),
        ]),
        Line::from(vec![
            Span::styled("  ১ম ইফতার    ", style.dim()),
            Span::styled(first_day.maghrib, style.bold()),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("Enter  সংরক্ষণ   ·   Esc  ফিরে যান", style.dim())),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

// ─── Public entry point ──────────────────────────────────────────────────────

/// Full-screen division and district picker. Returns the saved district,
/// or `None` when the user backs out.
pub fn run_district_picker(conn: &Connection, config: &AppConfig, current: District) -> Result<Option<District>> {
    let theme = PrefsRepo::theme(conn)?;
    let style = style_for(theme);
    let mut wizard = SetupWizard::new(AppState::new(theme, current), config.ramadan.numerals);

    let mut terminal = ratatui::init();
    let tick = config.ui.tick();
    let events = EventHandler::new(tick, tick);

    let result = (|| -> Result<Option<District>> {
        loop {
            terminal.draw(|frame| draw(frame, &wizard, style))?;

            if let Event::Key(key) = events.next()? {
                wizard.handle_key(key);
                if wizard.should_quit {
                    return Ok(None);
                }
                if wizard.confirmed {
                    if let Some(district) = wizard.chosen.take() {
                        PrefsRepo::set_district(conn, &district)?;
                        log::info!("District set to {}", district.name);
                        return Ok(Some(district));
                    }
                }
            }
        }
    })();

    drop(events);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::table::default_district;
    use crate::models::AppTheme;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn wizard() -> SetupWizard {
        SetupWizard::new(AppState::new(AppTheme::Emerald, default_district()), NumeralSystem::Bengali)
    }

    #[test]
    fn walks_to_confirm_and_saves_choice() {
        let mut w = wizard();
        w.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(w.step, Step::Pick);

        w.handle_key(press(KeyCode::Right));
        w.handle_key(press(KeyCode::Enter));
        assert_eq!(w.step, Step::Confirm);
        assert_eq!(w.chosen.as_ref().map(|d| d.name.as_str()), Some("ঢাকা"));

        w.handle_key(press(KeyCode::Enter));
        assert!(w.confirmed);
    }

    #[test]
    fn enter_on_division_list_asks_for_district() {
        let mut w = wizard();
        w.handle_key(press(KeyCode::Enter));
        w.handle_key(press(KeyCode::Enter));
        assert_eq!(w.step, Step::Pick);
        assert!(w.error.is_some());
        assert!(w.chosen.is_none());
    }

    #[test]
    fn esc_on_welcome_quits() {
        let mut w = wizard();
        w.handle_key(press(KeyCode::Esc));
        assert!(w.should_quit);
    }

    #[test]
    fn esc_on_confirm_goes_back() {
        let mut w = wizard();
        w.handle_key(press(KeyCode::Enter));
        w.handle_key(press(KeyCode::Right));
        w.handle_key(press(KeyCode::Enter));
        w.handle_key(press(KeyCode::Esc));
        assert_eq!(w.step, Step::Pick);
        assert!(!w.confirmed);
    }
}
