use anyhow::{anyhow, Context, Result};
use chrono::{Local, Timelike};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::assistant::{daily_quote, ChatMode, ChatSession, Gateway};
use crate::cli::args::{CardCommands, DistrictCommands};
use crate::config::AppConfig;
use crate::db::repository::PrefsRepo;
use crate::geo::locate::ReverseGeocoder;
use crate::geo::table::{find_district, match_city, DIVISIONS};
use crate::ledger::form::{image_data_uri, FormErrors};
use crate::ledger::{Cause, DonationForm, DonationLedger, PaymentMethod};
use crate::models::{AppTheme, District, PrayerType, Sender};
use crate::prayer_times::calculator::{compute_day_times_with, DayMinutes, FIRST_DAY, LAST_DAY};
use crate::share::card::{
    day_card, day_file_name, donation_card, donation_file_name, export_card, share_text,
    EXPORT_FAILED, SHARE_UNSUPPORTED,
};
use crate::status::adhan::{AdhanPlayer, PlaybackError};
use crate::status::engine::{ramadan_day, DisplayMode};
use crate::status::StatusEngine;
use crate::utils::format::{format_duration_secs, MINUTES_PER_DAY};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Setup / district ────────────────────────────────────────────────────────

pub fn handle_setup(conn: &Connection, config: &AppConfig, current: District) -> Result<()> {
    let config_path = AppConfig::config_path()?;
    if !config_path.exists() {
        config.save()?;
        println_colored!(DIM, "  Wrote default config to {}", config_path.display());
    }
    match crate::cli::district_picker::run_district_picker(conn, config, current)? {
        Some(district) => println_colored!(GREEN, "  ✓ জেলা সংরক্ষিত: {}", district.name),
        None => println_colored!(DIM, "  কোনো পরিবর্তন হয়নি"),
    }
    Ok(())
}

pub fn handle_district(conn: &Connection, config: &AppConfig, action: &DistrictCommands) -> Result<()> {
    match action {
        DistrictCommands::List => {
            println!();
            for division in DIVISIONS {
                println_colored!(GOLD, "  {} {}", division.icon, division.name);
                let names: Vec<&str> = division.districts.iter().map(|d| d.name).collect();
                println!("    {}", names.join(", "));
            }
            println!();
        }
        DistrictCommands::Set { name } => {
            let district = resolve_district(name)?;
            PrefsRepo::set_district(conn, &district)?;
            println_colored!(GREEN, "  ✓ জেলা সংরক্ষিত: {}", district.name);
        }
        DistrictCommands::Locate { lat, lon } => {
            let geocoder = ReverseGeocoder::new(
                &config.location.reverse_geocode_url,
                Duration::from_secs(config.location.timeout_secs),
            );
            match geocoder.locate(*lat, *lon) {
                Ok(district) => {
                    PrefsRepo::set_district(conn, &district)?;
                    println_colored!(GREEN, "  ✓ অবস্থান অনুযায়ী জেলা: {}", district.name);
                }
                Err(e) => {
                    log::warn!("Locate failed: {}", e);
                    println_colored!(AMBER, "  অবস্থান থেকে জেলা খুঁজে পাওয়া যায়নি; আগের জেলা বহাল আছে");
                }
            }
        }
    }
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    conn: &Connection,
    config: &AppConfig,
    day: Option<u32>,
    district: Option<&str>,
) -> Result<()> {
    let district = district_or_saved(conn, district)?;
    let day = match day {
        Some(d) if (FIRST_DAY..=LAST_DAY).contains(&d) => d,
        Some(d) => return Err(anyhow!("Ramadan day must be between 1 and 30, got {}", d)),
        None => ramadan_day(config.ramadan.start, Local::now().naive_local()).0,
    };
    let numerals = config.ramadan.numerals;
    let times = compute_day_times_with(day, district.minute_offset, numerals);

    println!();
    println_colored!(GOLD, "  রমজান {} · {}", numerals.localize(&day.to_string()), district.name);
    println!();
    println_colored!(BOLD, "  {:<10}  {}", "সেহরি শেষ", times.sehri_end);
    println_colored!(BOLD, "  {:<10}  {}", "ইফতার", times.maghrib);
    println!();
    for prayer in PrayerType::ALL {
        println_colored!(DIM, "  {:<10}  {}", prayer.display_name(), times.time_of(prayer));
    }
    println!();
    Ok(())
}

pub fn handle_calendar(conn: &Connection, config: &AppConfig, district: Option<&str>) -> Result<()> {
    let district = district_or_saved(conn, district)?;
    let numerals = config.ramadan.numerals;
    let today = ramadan_day(config.ramadan.start, Local::now().naive_local());

    println!();
    println_colored!(GOLD, "  {} · ৩০ দিনের সময়সূচী", district.name);
    println!();
    println_colored!(DIM, "  {:>5}  {:>10}  {:>8}", "রমজান", "সেহরি শেষ", "ইফতার");
    for day in FIRST_DAY..=LAST_DAY {
        let times = compute_day_times_with(day, district.minute_offset, numerals);
        let row = format!(
            "  {:>5}  {:>10}  {:>8}",
            numerals.localize(&day.to_string()),
            times.sehri_end,
            times.maghrib
        );
        if today.1.is_none() && day == today.0 {
            println_colored!(AMBER, "{}", row);
        } else {
            println!("{}", row);
        }
    }
    println!();
    Ok(())
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// One-shot status never plays the adhan.
struct Muted;

impl AdhanPlayer for Muted {
    fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }
}

pub fn handle_status(config: &AppConfig, district: &District) -> Result<()> {
    let numerals = config.ramadan.numerals;
    let mut engine = StatusEngine::new(
        config.ramadan.start,
        config.ramadan.adhan_window_minutes,
        numerals,
        district.minute_offset,
        Box::new(Muted),
    );
    let status = engine.tick(Local::now().naive_local());

    println!();
    println_colored!(GOLD, "  {} · রমজান {}", district.name, numerals.localize(&status.ramadan_day.to_string()));
    println!();
    if let Some(c) = &status.ramadan_countdown {
        println_colored!(
            AMBER,
            "  রমজান শুরু হতে বাকি: {} দিন {} ঘণ্টা {} মিনিট {} সেকেন্ড",
            numerals.localize(&c.days.to_string()),
            numerals.localize(&c.hours.to_string()),
            numerals.localize(&c.minutes.to_string()),
            numerals.localize(&c.seconds.to_string())
        );
    }
    match status.mode {
        DisplayMode::Countdown => {
            println_colored!(BOLD, "  ইফতারের বাকি  {}", status.iftar_countdown);
        }
        DisplayMode::Adhan => {
            println_colored!(GREEN, "  🕌 মাগরিবের আজান হচ্ছে");
        }
        DisplayMode::PrayerTimes => {
            if let Some(next) = &status.next_prayer {
                println_colored!(BOLD, "  পরবর্তী নামাজ  {}  {}", next.label, next.time);
                let at = DayMinutes::compute(status.ramadan_day, district.minute_offset).minute_of(next.prayer);
                let now = Local::now().time();
                let now_secs = (now.hour() * 3600 + now.minute() * 60 + now.second()) as i64;
                let until = (at as i64 * 60 - now_secs).rem_euclid(MINUTES_PER_DAY as i64 * 60);
                println_colored!(AMBER, "  বাকি {}", format_duration_secs(until, numerals));
            }
        }
    }
    println!();
    Ok(())
}

// ─── Donations ───────────────────────────────────────────────────────────────

pub fn handle_donate(
    conn: &Connection,
    name: &str,
    amount: &str,
    cause: Option<&str>,
    payment: Option<&str>,
    image: Option<&Path>,
) -> Result<()> {
    // Fields whose problem has already been printed with more detail.
    let mut reported = FormErrors::default();

    let cause = match cause.map(Cause::from_str).transpose() {
        Ok(c) => c,
        Err(_) => {
            println_colored!(RED, "  ✗ অজানা খাত। বেছে নিন: {}", id_list(Cause::ALL.iter().map(|c| c.id())));
            reported.cause = true;
            None
        }
    };
    let payment = match payment.map(PaymentMethod::from_str).transpose() {
        Ok(p) => p,
        Err(_) => {
            println_colored!(RED, "  ✗ অজানা পেমেন্ট মাধ্যম। বেছে নিন: {}", id_list(PaymentMethod::ALL.iter().map(|p| p.id())));
            reported.payment = true;
            None
        }
    };
    let image = match image {
        Some(path) => match image_data_uri(path) {
            Ok(uri) => Some(uri),
            Err(e) => {
                println_colored!(RED, "  ✗ ছবিটি পড়া যায়নি: {} ({:#})", path.display(), e);
                reported.image = true;
                None
            }
        },
        None => None,
    };

    let form = DonationForm {
        name: name.to_string(),
        amount: amount.to_string(),
        cause,
        payment,
        image,
    };

    match form.validate() {
        Ok(record) => {
            let mut ledger = DonationLedger::load(conn)?;
            ledger.append(record.clone());
            ledger.save(conn)?;
            println_colored!(GREEN, "  ✓ জাযাকাল্লাহু খাইরান, {}! ৳{} · {}", record.name, record.amount, record.message);
            Ok(())
        }
        Err(errors) => {
            let remaining = FormErrors {
                name: errors.name && !reported.name,
                amount: errors.amount && !reported.amount,
                cause: errors.cause && !reported.cause,
                payment: errors.payment && !reported.payment,
                image: errors.image && !reported.image,
            };
            for message in remaining.messages() {
                println_colored!(RED, "  ✗ {}", message);
            }
            Err(anyhow::Error::new(errors).context("Donation not recorded"))
        }
    }
}

pub fn handle_donations(conn: &Connection, config: &AppConfig) -> Result<()> {
    let ledger = DonationLedger::load(conn)?;
    let numerals = config.ramadan.numerals;

    println!();
    println_colored!(GOLD, "  সাম্প্রতিক অনুদান");
    println!();
    if ledger.is_empty() {
        println_colored!(DIM, "  এখনো কোনো অনুদান নেই");
    }
    for (i, record) in ledger.list().iter().enumerate() {
        print_colored!(DIM, "  {:>2}. ", i + 1);
        print_colored!(BOLD, "{:<20}", record.name);
        println!("  ৳{}  {}", numerals.localize(&record.amount), record.message);
    }
    println!();
    Ok(())
}

// ─── Cards ───────────────────────────────────────────────────────────────────

pub fn handle_card(conn: &Connection, config: &AppConfig, district: &District, kind: &CardCommands) -> Result<()> {
    let numerals = config.ramadan.numerals;
    match kind {
        CardCommands::Donation { index, out, share } => {
            let ledger = DonationLedger::load(conn)?;
            let record = index
                .checked_sub(1)
                .and_then(|i| ledger.get(i))
                .ok_or_else(|| anyhow!("No donation #{} (there are {})", index, ledger.len()))?;

            let card = donation_card(record, Local::now().date_naive(), numerals);
            println!("{}", card);
            if let Some(dir) = out {
                report_export(dir, &donation_file_name(record), &card);
            }
            if *share {
                println!();
                println!("  {}", share_text(record));
                println_colored!(DIM, "  {}", SHARE_UNSUPPORTED);
            }
        }
        CardCommands::Day { day, out } => {
            if !(FIRST_DAY..=LAST_DAY).contains(day) {
                return Err(anyhow!("Ramadan day must be between 1 and 30, got {}", day));
            }
            let card = day_card(*day, district, numerals);
            println!("{}", card);
            if let Some(dir) = out {
                report_export(dir, &day_file_name(*day, district), &card);
            }
        }
    }
    Ok(())
}

fn report_export(dir: &Path, file_name: &str, contents: &str) {
    match export_card(dir, file_name, contents) {
        Ok(path) => println_colored!(GREEN, "  ✓ সংরক্ষিত: {}", path.display()),
        Err(e) => {
            log::error!("Card export failed: {:#}", e);
            println_colored!(RED, "  {}", EXPORT_FAILED);
        }
    }
}

// ─── Assistant ───────────────────────────────────────────────────────────────

pub fn handle_quote(conn: &Connection, config: &AppConfig) -> Result<()> {
    let gateway = Gateway::from_config(&config.assistant);
    let quote = daily_quote(conn, &gateway, Local::now().date_naive())?;
    println!();
    println_colored!(GOLD, "  \"{}\"", quote.text);
    println_colored!(DIM, "  — {}", quote.reference);
    println!();
    Ok(())
}

pub fn handle_ask(config: &AppConfig, question: &str) -> Result<()> {
    let gateway = Gateway::from_config(&config.assistant);
    println!();
    println!("  {}", gateway.ask(question));
    println!();
    Ok(())
}

/// Line-oriented chat. `/ai` and `/admin` switch threads, `/quit` or EOF ends.
pub fn handle_chat(config: &AppConfig, admin: bool) -> Result<()> {
    let gateway = Gateway::from_config(&config.assistant);
    let mode = if admin { ChatMode::Admin } else { ChatMode::Ai };
    let mut session = ChatSession::new(mode, Local::now().time());

    println!();
    for message in session.messages() {
        print_message(message.sender, &message.time, &message.text);
    }
    println_colored!(DIM, "  /ai  /admin  /quit");

    while let Some(line) = prompt("> ")? {
        match line.trim() {
            "/quit" => break,
            "/ai" | "/admin" => {
                let mode = if line.trim() == "/ai" { ChatMode::Ai } else { ChatMode::Admin };
                session.set_mode(mode);
                if let Some(last) = session.messages().last() {
                    print_message(last.sender, &last.time, &last.text);
                }
            }
            input => {
                if let Some(reply) = session.send(input, &gateway, Local::now().time()) {
                    print_message(reply.sender, &reply.time, &reply.text);
                }
            }
        }
    }
    Ok(())
}

fn print_message(sender: Sender, time: &str, text: &str) {
    let (color, who) = match sender {
        Sender::User => (BOLD, "আপনি"),
        Sender::Assistant => (GREEN, "সহকারী"),
        Sender::Admin => (GOLD, "অ্যাডমিন"),
    };
    print_colored!(DIM, "  [{}] ", time);
    println_colored!(color, "{}: {}", who, text);
}

// ─── Theme ───────────────────────────────────────────────────────────────────

pub fn handle_theme(conn: &Connection, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let theme = AppTheme::from_str(name)
                .map_err(|_| anyhow!("Unknown theme '{}'. Use: {}", name, id_list(AppTheme::ALL.iter().map(|t| t.as_str()))))?;
            PrefsRepo::set_theme(conn, theme)?;
            println_colored!(GREEN, "  ✓ থিম: {}", theme.as_str());
        }
        None => {
            let current = PrefsRepo::theme(conn)?;
            for theme in AppTheme::ALL {
                if theme == current {
                    println_colored!(GREEN, "  ● {}", theme.as_str());
                } else {
                    println_colored!(DIM, "  ○ {}", theme.as_str());
                }
            }
        }
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Exact district name first, then the loose city match.
fn resolve_district(name: &str) -> Result<District> {
    find_district(name)
        .or_else(|| match_city(name))
        .ok_or_else(|| anyhow!("Unknown district '{}'. See `roza district list`", name))
}

fn district_or_saved(conn: &Connection, name: Option<&str>) -> Result<District> {
    match name {
        Some(name) => resolve_district(name),
        None => Ok(PrefsRepo::district(conn)?.unwrap_or_else(crate::geo::table::default_district)),
    }
}

fn id_list<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    ids.collect::<Vec<_>>().join(", ")
}

/// Read one line from stdin. `None` at end of input.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    let read = io::stdin().lock().read_line(&mut buf).context("Reading stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn resolves_exact_and_loose_names() {
        assert_eq!(resolve_district("রাজশাহী").unwrap().name, "রাজশাহী");
        assert_eq!(resolve_district("রাজশাহী জেলা").unwrap().name, "রাজশাহী");
        assert!(resolve_district("Atlantis").is_err());
    }

    #[test]
    fn saved_district_is_used_when_none_given() {
        let conn = mem_db();
        assert_eq!(district_or_saved(&conn, None).unwrap().name, "ঢাকা");
        PrefsRepo::set_district(&conn, &resolve_district("সিলেট").unwrap()).unwrap();
        assert_eq!(district_or_saved(&conn, None).unwrap().name, "সিলেট");
    }

    #[test]
    fn invalid_donation_is_not_saved() {
        let conn = mem_db();
        let before = DonationLedger::load(&conn).unwrap().len();
        assert!(handle_donate(&conn, "", "5", Some("masjid"), None, None).is_err());
        assert_eq!(DonationLedger::load(&conn).unwrap().len(), before);
    }

    #[test]
    fn unreadable_image_rejects_donation() {
        let conn = mem_db();
        let before = DonationLedger::load(&conn).unwrap().len();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("photo.png");

        let err = handle_donate(&conn, "করিম", "500", Some("iftar"), Some("bkash"), Some(&missing)).unwrap_err();
        let form = err.downcast_ref::<FormErrors>().unwrap();
        assert!(form.image);
        assert!(!form.amount);
        assert_eq!(DonationLedger::load(&conn).unwrap().len(), before);
    }

    #[test]
    fn unknown_cause_is_an_error() {
        let conn = mem_db();
        let err = handle_donate(&conn, "করিম", "500", Some("casino"), Some("bkash"), None).unwrap_err();
        let form = err.downcast_ref::<FormErrors>().unwrap();
        assert!(form.cause);
        assert!(form.image);
        assert!(!form.payment);
    }

    #[test]
    fn valid_donation_is_prepended() {
        let conn = mem_db();
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("me.png");
        std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

        handle_donate(&conn, "রাফি", "২৫০", Some("iftar"), Some("bkash"), Some(&image)).unwrap();
        let ledger = DonationLedger::load(&conn).unwrap();
        let first = ledger.get(0).unwrap();
        assert_eq!(first.name, "রাফি");
        assert_eq!(first.amount, "250");
        assert!(first.image.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn export_to_unwritable_dir_does_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        report_export(&blocker.join("sub"), "card.txt", "hello");
    }

    #[test]
    fn theme_command_persists() {
        let conn = mem_db();
        handle_theme(&conn, Some("indigo")).unwrap();
        assert_eq!(PrefsRepo::theme(&conn).unwrap(), AppTheme::Indigo);
        assert!(handle_theme(&conn, Some("neon")).is_err());
    }
}
