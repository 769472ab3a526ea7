use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

use crate::utils::numerals::NumeralSystem;

/// Islamic month names in Bengali (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "মুহাররম",
    "সফর",
    "রবিউল আউয়াল",
    "রবিউস সানি",
    "জমাদিউল আউয়াল",
    "জমাদিউস সানি",
    "রজব",
    "শাবান",
    "রমজান",
    "শাওয়াল",
    "জিলকদ",
    "জিলহজ",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "?"
    }
}

/// Hijri date for `date` shifted by `offset_days` (local moon sighting),
/// e.g. "১ রমজান ১৪৪৭". Falls back to the unshifted date if the shifted one
/// is outside the converter's range, and to an empty string after that.
pub fn hijri_string(date: NaiveDate, offset_days: i32, numerals: NumeralSystem) -> String {
    let adjusted = date + Duration::days(offset_days as i64);

    let converted = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .or_else(|_| {
        HijriDate::from_gr(date.year() as usize, date.month() as usize, date.day() as usize)
    });

    match converted {
        Ok(hd) => numerals.localize(&format!(
            "{} {} {}",
            hd.day(),
            hijri_month_name(hd.month()),
            hd.year()
        )),
        Err(e) => {
            log::debug!("Hijri conversion failed for {}: {}", date, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(hijri_month_name(9), "রমজান");
        assert_eq!(hijri_month_name(13), "?");
    }

    #[test]
    fn formats_ramadan_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let s = hijri_string(date, 0, NumeralSystem::Ascii);
        assert!(s.contains("রমজান"), "{}", s);
        assert!(s.ends_with("1447"), "{}", s);
    }
}
