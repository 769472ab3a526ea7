use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::sync::mpsc;

use crate::assistant::quotes::fallback_quote;
use crate::assistant::{daily_quote, Gateway};
use crate::config::AppConfig;
use crate::db::repository::PrefsRepo;
use crate::ledger::DonationLedger;
use crate::models::{District, IslamicQuote};
use crate::prayer_times::compute_day_times_with;
use crate::share::card::{donation_card, donation_file_name, export_card, EXPORT_FAILED};
use crate::status::{player_from_config, DisplayMode, StatusEngine};
use crate::tui::events::{Event, EventHandler};
use crate::tui::state::{AppState, Tab};
use crate::tui::theme::{style_for, ThemeStyle};
use crate::tui::widgets::{
    banners, calendar, countdown, district_picker, donations, header, quote, status_banner,
    statusbar, tasbih,
};
use crate::utils::hijri::hijri_string;

pub struct App {
    pub state: AppState,
    pub config: AppConfig,
    pub should_quit: bool,
    engine: StatusEngine,
    ledger: DonationLedger,
    quote: Option<IslamicQuote>,
    quote_rx: Option<mpsc::Receiver<IslamicQuote>>,
    hijri_date: NaiveDate,
    hijri_str: String,
}

impl App {
    pub fn new(conn: &Connection, config: AppConfig, district: District) -> Result<Self> {
        let theme = PrefsRepo::theme(conn)?;
        let ledger = DonationLedger::load(conn)?;
        let engine = StatusEngine::new(
            config.ramadan.start,
            config.ramadan.adhan_window_minutes,
            config.ramadan.numerals,
            district.minute_offset,
            player_from_config(&config.adhan),
        );
        let today = Local::now().date_naive();
        let hijri_str = hijri_string(today, config.ramadan.hijri_offset, config.ramadan.numerals);
        let quote_rx = Some(spawn_quote_fetch(&config, today));

        Ok(App {
            state: AppState::new(theme, district),
            config,
            should_quit: false,
            engine,
            ledger,
            quote: None,
            quote_rx,
            hijri_date: today,
            hijri_str,
        })
    }

    fn style(&self) -> &'static ThemeStyle {
        style_for(self.state.theme())
    }

    pub fn tick(&mut self) {
        let now = Local::now().naive_local();
        self.engine.tick(now);

        if now.date() != self.hijri_date {
            self.hijri_date = now.date();
            self.hijri_str = hijri_string(
                self.hijri_date,
                self.config.ramadan.hijri_offset,
                self.config.ramadan.numerals,
            );
        }

        if let Some(rx) = &self.quote_rx {
            match rx.try_recv() {
                Ok(q) => {
                    self.quote = Some(q);
                    self.quote_rx = None;
                }
                Err(mpsc::TryRecvError::Empty) => {}
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.quote = Some(fallback_quote(self.hijri_date));
                    self.quote_rx = None;
                }
            }
        }
    }

    pub fn rotate(&mut self) {
        self.state.rotate(banners::BANNERS.len(), self.ledger.len());
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Some terminals also report release and repeat events.
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.engine.on_user_interaction();

        if self.state.show_help() {
            self.state.toggle_help();
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.state.donation_detail() {
                    self.state.close_donation_detail();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('1') => self.state.set_tab(Tab::Home),
            KeyCode::Char('2') => self.state.set_tab(Tab::Prayer),
            KeyCode::Char('3') => self.state.set_tab(Tab::Donations),
            KeyCode::Tab => self.state.next_tab(),
            KeyCode::Char('?') => self.state.toggle_help(),
            KeyCode::Char('t') => {
                let theme = self.state.cycle_theme();
                if let Err(e) = PrefsRepo::set_theme(conn, theme) {
                    log::warn!("Could not save theme: {}", e);
                }
            }
            KeyCode::Char('a') if self.engine.status().mode == DisplayMode::Adhan => {
                self.engine.complete_adhan();
            }
            _ => match self.state.tab() {
                Tab::Home => self.handle_home_key(key),
                Tab::Prayer => self.handle_prayer_key(key, conn),
                Tab::Donations => self.handle_donations_key(key),
            },
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') => self.state.increment_tasbih(),
            KeyCode::Char('p') => self.state.toggle_rotation(),
            _ => {}
        }
    }

    fn handle_prayer_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Left => self.state.picker_left(),
            KeyCode::Right => self.state.picker_right(),
            KeyCode::Up => self.state.picker_move(false),
            KeyCode::Down => self.state.picker_move(true),
            KeyCode::Enter => {
                if let Some(district) = self.state.picker_choice() {
                    self.select_district(district, conn);
                } else {
                    self.state.picker_right();
                }
            }
            _ => {}
        }
    }

    fn select_district(&mut self, district: District, conn: &Connection) {
        if let Err(e) = PrefsRepo::set_district(conn, &district) {
            log::warn!("Could not save district: {}", e);
        }
        log::info!("District changed to {}", district);
        self.engine.set_offset(district.minute_offset);
        self.state.set_flash(format!("জেলা নির্বাচিত: {}", district.name));
        self.state.set_district(district);
        self.tick();
    }

    fn handle_donations_key(&mut self, key: KeyEvent) {
        let len = self.ledger.len();
        match key.code {
            KeyCode::Up => self.state.donation_move(false, len),
            KeyCode::Down => self.state.donation_move(true, len),
            KeyCode::Enter => self.state.open_donation_detail(),
            KeyCode::Char('e') => self.export_selected(),
            _ => {}
        }
    }

    fn export_selected(&mut self) {
        let Some(record) = self.ledger.get(self.state.donation_cursor()) else {
            return;
        };
        let card = donation_card(record, Local::now().date_naive(), self.config.ramadan.numerals);
        let result = AppConfig::data_dir()
            .and_then(|dir| export_card(&dir.join("cards"), &donation_file_name(record), &card));
        match result {
            Ok(path) => self.state.set_flash(format!("সংরক্ষিত: {}", path.display())),
            Err(e) => {
                log::warn!("Card export failed: {:#}", e);
                self.state.set_flash(EXPORT_FAILED);
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let style = self.style();
        let area = frame.area();

        // Clear background
        frame.render_widget(Block::default().style(style.base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let status = self.engine.status();
        let numerals = self.config.ramadan.numerals;
        header::render(
            frame,
            outer_chunks[0],
            &numerals.localize(&status.ramadan_day.to_string()),
            &self.state.district().name,
            &self.hijri_str,
            self.state.tab(),
            style,
        );
        statusbar::render(frame, outer_chunks[2], self.state.tab(), self.state.flash(), style);

        match self.state.tab() {
            Tab::Home => self.draw_home(frame, outer_chunks[1], style),
            Tab::Prayer => self.draw_prayer(frame, outer_chunks[1], style),
            Tab::Donations => self.draw_donations(frame, outer_chunks[1], style),
        }

        if self.state.show_help() {
            self.draw_help_overlay(frame, style);
        }
    }

    fn draw_home(&self, frame: &mut Frame, body: Rect, style: &ThemeStyle) {
        let status = self.engine.status();
        let numerals = self.config.ramadan.numerals;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // live status
                Constraint::Length(5), // countdown / today
                Constraint::Length(5), // banners
                Constraint::Min(0),
            ])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // donations
                Constraint::Length(4), // tasbih
                Constraint::Min(0),    // quote
            ])
            .split(columns[1]);

        status_banner::render(frame, left[0], status, style);
        let today = compute_day_times_with(
            status.ramadan_day,
            self.state.district().minute_offset,
            numerals,
        );
        countdown::render(
            frame,
            left[1],
            status.ramadan_countdown.as_ref(),
            &today,
            numerals,
            style,
        );
        banners::render(
            frame,
            left[2],
            self.state.banner_idx(),
            self.state.rotation_paused(),
            style,
        );

        donations::render_carousel(
            frame,
            right[0],
            self.ledger.list(),
            self.state.donation_idx(),
            numerals,
            style,
        );
        tasbih::render(frame, right[1], self.state.tasbih(), numerals, style);
        quote::render(frame, right[2], self.quote.as_ref(), style);
    }

    fn draw_prayer(&self, frame: &mut Frame, body: Rect, style: &ThemeStyle) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);

        district_picker::render(
            frame,
            columns[0],
            self.state.division_cursor(),
            self.state.district_cursor(),
            self.state.picker_focus(),
            style,
        );
        calendar::render(
            frame,
            columns[1],
            self.state.district(),
            self.engine.status().ramadan_day,
            self.config.ramadan.numerals,
            style,
        );
    }

    fn draw_donations(&self, frame: &mut Frame, body: Rect, style: &ThemeStyle) {
        let numerals = self.config.ramadan.numerals;
        let selected = self.ledger.get(self.state.donation_cursor());
        match selected {
            Some(record) if self.state.donation_detail() => {
                donations::render_detail(frame, body, record, numerals, style);
            }
            _ => donations::render_list(
                frame,
                body,
                self.ledger.list(),
                self.state.donation_cursor(),
                numerals,
                style,
            ),
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame, style: &ThemeStyle) {
        let area = frame.area();

        // Center a help box
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[1] [2] [3]  ", "হোম / সময়সূচী / অনুদান"),
            ("[Tab]        ", "পরের ট্যাব"),
            ("[t]          ", "থিম পরিবর্তন"),
            ("[space]      ", "তাসবিহ গণনা"),
            ("[p]          ", "ব্যানার থামান / চালান"),
            ("[a]          ", "আজান বন্ধ করুন"),
            ("[← → ↑ ↓]    ", "বিভাগ ও জেলা বাছাই"),
            ("[Enter]      ", "নির্বাচন / কার্ড দেখুন"),
            ("[e]          ", "কার্ড সংরক্ষণ"),
            ("[?]          ", "সাহায্য"),
            ("[Esc]        ", "ফিরে যান / বের হন"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                format!("  Keybindings · {}", style.name),
                style.accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        help_text.extend(bindings.iter().map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("  {}", key), style.accent()),
                Span::styled(*label, style.dim()),
            ])
        }));

        let block = Block::default()
            .title(Span::styled(" Help ", style.accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style.accent())
            .style(style.surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Fetch today's quote off the UI thread. The worker opens its own
/// connection; the receiver yields exactly one quote.
fn spawn_quote_fetch(config: &AppConfig, today: NaiveDate) -> mpsc::Receiver<IslamicQuote> {
    let (tx, rx) = mpsc::channel();
    let assistant = config.assistant.clone();
    std::thread::spawn(move || {
        let quote = AppConfig::db_path()
            .and_then(|path| Connection::open(path).map_err(anyhow::Error::from))
            .and_then(|conn| daily_quote(&conn, &Gateway::from_config(&assistant), today))
            .unwrap_or_else(|e| {
                log::warn!("Quote lookup failed: {:#}", e);
                fallback_quote(today)
            });
        let _ = tx.send(quote);
    });
    rx
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig, district: District) -> Result<()> {
    let mut app = App::new(&conn, config, district)?;
    app.tick();

    let mut terminal = ratatui::init();
    let events = EventHandler::new(app.config.ui.tick(), app.config.ui.rotation());

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key, &conn);
                    if app.should_quit {
                        break;
                    }
                }
                Event::Tick => app.tick(),
                Event::Rotate => app.rotate(),
            }
        }
        Ok(())
    })();

    drop(events);
    ratatui::restore();
    result
}
