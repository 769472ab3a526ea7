use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use unicode_width::UnicodeWidthStr;

use crate::models::{DonationRecord, District, PrayerType};
use crate::prayer_times::calculator::compute_day_times_with;
use crate::utils::numerals::NumeralSystem;

pub const CARD_TITLE: &str = "রমজান ২০২৬ অনুদান কার্ড";
pub const SHARE_UNSUPPORTED: &str =
    "আপনার ব্রাউজার সরাসরি শেয়ার সাপোর্ট করছে না। অনুগ্রহ করে কার্ডটি ডাউনলোড করে শেয়ার করুন।";
pub const EXPORT_FAILED: &str = "দুঃখিত, কার্ডটি সংরক্ষণ করা যায়নি।";

const MONTHS_BN: [&str; 12] = [
    "জানুয়ারি",
    "ফেব্রুয়ারি",
    "মার্চ",
    "এপ্রিল",
    "মে",
    "জুন",
    "জুলাই",
    "আগস্ট",
    "সেপ্টেম্বর",
    "অক্টোবর",
    "নভেম্বর",
    "ডিসেম্বর",
];

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Draw `lines` centred inside a rounded box. `None` is a separator rule.
fn boxed(lines: &[Option<String>]) -> String {
    let inner = lines
        .iter()
        .flatten()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0)
        + 4;

    let mut out = String::new();
    out.push_str(&format!("╭{}╮\n", "─".repeat(inner)));
    for line in lines {
        match line {
            Some(text) => {
                let width = UnicodeWidthStr::width(text.as_str());
                let left = (inner - width) / 2;
                let right = inner - width - left;
                out.push_str(&format!("│{}{}{}│\n", " ".repeat(left), text, " ".repeat(right)));
            }
            None => out.push_str(&format!("├{}┤\n", "─".repeat(inner))),
        }
    }
    out.push_str(&format!("╰{}╯\n", "─".repeat(inner)));
    out
}

fn card_date(date: NaiveDate, numerals: NumeralSystem) -> String {
    let month = MONTHS_BN[date.month0() as usize];
    numerals.localize(&format!("{} {}, {}", date.day(), month, date.year()))
}

// ─── Cards ───────────────────────────────────────────────────────────────────

pub fn donation_card(record: &DonationRecord, date: NaiveDate, numerals: NumeralSystem) -> String {
    let lines = vec![
        Some(CARD_TITLE.to_string()),
        None,
        Some("সম্মানিত দাতা".to_string()),
        Some(record.name.clone()),
        Some(format!("৳ {}", numerals.localize(&record.amount))),
        None,
        Some("\"জাযাকাল্লাহু খাইরান!\"".to_string()),
        Some("আপনার এই মহৎ দান কোনো এক অসহায় মানুষের".to_string()),
        Some("মুখে হাসি ফোটাবে ইনশাআল্লাহ।".to_string()),
        None,
        Some(format!("প্রকল্প: {}", record.message)),
        Some(format!("তারিখ: {}", card_date(date, numerals))),
        None,
        Some("🕌 রমজান ২০২৬ ডিজিটাল".to_string()),
    ];
    boxed(&lines)
}

/// Sehri and iftar for one day, followed by the five prayers.
pub fn day_card(day: u32, district: &District, numerals: NumeralSystem) -> String {
    let times = compute_day_times_with(day, district.minute_offset, numerals);
    let mut lines = vec![
        Some(format!("রমজান {}", numerals.localize(&day.to_string()))),
        Some(district.name.clone()),
        None,
        Some(format!("সেহরি শেষ  {}", times.sehri_end)),
        Some(format!("ইফতার  {}", times.maghrib)),
        None,
    ];
    lines.extend(
        PrayerType::ALL
            .iter()
            .map(|p| Some(format!("{}  {}", p.display_name(), times.time_of(*p)))),
    );
    boxed(&lines)
}

pub fn share_text(record: &DonationRecord) -> String {
    format!("{} এর পক্ষ থেকে একটি অনুদান। জাযাকাল্লাহু খাইরান!", record.name)
}

// ─── Export ──────────────────────────────────────────────────────────────────

/// Make a display name safe to use inside a file name.
fn file_safe(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

pub fn donation_file_name(record: &DonationRecord) -> String {
    format!("Thank_You_{}.txt", file_safe(&record.name))
}

pub fn day_file_name(day: u32, district: &District) -> String {
    format!("Ramadan_Day_{}_{}.txt", day, file_safe(&district.name))
}

/// Write `contents` to `dir/file_name`, creating `dir` if needed.
pub fn export_card(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("Creating {:?}", dir))?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).with_context(|| format!("Writing {:?}", path))?;
    log::info!("Exported card to {:?}", path);
    Ok(path)
}
