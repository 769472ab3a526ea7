use crate::models::{NextPrayer, PrayerType};
use crate::utils::format::format_clock;
use crate::utils::numerals::NumeralSystem;

pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 30;

const BASE_SEHRI_END: i32 = 295;
const BASE_MAGHRIB: i32 = 1092;
const FAJR_AFTER_SEHRI: i32 = -10;
const BASE_DHUHR: i32 = 725;
const BASE_ASR: i32 = 985;
const ISHA_AFTER_MAGHRIB: i32 = 75;

/// Minute-of-day values for one Ramadan day in one district, offset applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMinutes {
    pub sehri_end: i32,
    pub fajr: i32,
    pub dhuhr: i32,
    pub asr: i32,
    pub maghrib: i32,
    pub isha: i32,
}

impl DayMinutes {
    /// Sehri ends a little earlier every six days and maghrib moves later
    /// every four; dhuhr and asr are fixed. `day` is not range checked.
    pub fn compute(day: u32, offset_minutes: i32) -> Self {
        let day = day as i32;
        let base_sehri = BASE_SEHRI_END - day / 6;
        let base_maghrib = BASE_MAGHRIB + day / 4;

        Self {
            sehri_end: base_sehri + offset_minutes,
            fajr: base_sehri + FAJR_AFTER_SEHRI + offset_minutes,
            dhuhr: BASE_DHUHR + offset_minutes,
            asr: BASE_ASR + offset_minutes,
            maghrib: base_maghrib + offset_minutes,
            isha: base_maghrib + ISHA_AFTER_MAGHRIB + offset_minutes,
        }
    }

    pub fn minute_of(&self, prayer: PrayerType) -> i32 {
        match prayer {
            PrayerType::Fajr => self.fajr,
            PrayerType::Dhuhr => self.dhuhr,
            PrayerType::Asr => self.asr,
            PrayerType::Maghrib => self.maghrib,
            PrayerType::Isha => self.isha,
        }
    }

    pub fn schedule(&self) -> [(PrayerType, i32); 5] {
        PrayerType::ALL.map(|p| (p, self.minute_of(p)))
    }
}

/// Display strings for a day's timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTimes {
    pub sehri_end: String,
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl DayTimes {
    pub fn from_minutes(m: &DayMinutes, numerals: NumeralSystem) -> Self {
        Self {
            sehri_end: format_clock(m.sehri_end, numerals),
            fajr: format_clock(m.fajr, numerals),
            dhuhr: format_clock(m.dhuhr, numerals),
            asr: format_clock(m.asr, numerals),
            maghrib: format_clock(m.maghrib, numerals),
            isha: format_clock(m.isha, numerals),
        }
    }

    pub fn time_of(&self, prayer: PrayerType) -> &str {
        match prayer {
            PrayerType::Fajr => &self.fajr,
            PrayerType::Dhuhr => &self.dhuhr,
            PrayerType::Asr => &self.asr,
            PrayerType::Maghrib => &self.maghrib,
            PrayerType::Isha => &self.isha,
        }
    }
}

/// Timetable for `day` in a district `offset_minutes` from Dhaka, Bengali digits.
pub fn compute_day_times(day: u32, offset_minutes: i32) -> DayTimes {
    compute_day_times_with(day, offset_minutes, NumeralSystem::Bengali)
}

pub fn compute_day_times_with(day: u32, offset_minutes: i32, numerals: NumeralSystem) -> DayTimes {
    DayTimes::from_minutes(&DayMinutes::compute(day, offset_minutes), numerals)
}

/// First prayer strictly after `minute_of_day`. Once isha has passed this
/// wraps to fajr so there is always something to show.
pub fn next_prayer(
    day: u32,
    offset_minutes: i32,
    minute_of_day: i32,
    numerals: NumeralSystem,
) -> NextPrayer {
    let minutes = DayMinutes::compute(day, offset_minutes);
    let schedule = minutes.schedule();
    let (prayer, mins) = schedule
        .iter()
        .copied()
        .find(|(_, m)| *m > minute_of_day)
        .unwrap_or(schedule[0]);

    NextPrayer {
        prayer,
        label: prayer.label(),
        time: format_clock(mins, numerals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prayers_are_ordered_for_every_day_and_offset() {
        for day in FIRST_DAY..=LAST_DAY {
            for offset in -9..=9 {
                let m = DayMinutes::compute(day, offset);
                assert!(m.fajr < m.dhuhr, "day {} offset {}", day, offset);
                assert!(m.dhuhr < m.asr, "day {} offset {}", day, offset);
                assert!(m.asr < m.maghrib, "day {} offset {}", day, offset);
                assert!(m.maghrib < m.isha, "day {} offset {}", day, offset);
                assert!(m.fajr < m.sehri_end);
            }
        }
    }

    #[test]
    fn same_inputs_same_output() {
        assert_eq!(compute_day_times(12, -4), compute_day_times(12, -4));
    }

    #[test]
    fn rajshahi_day_fifteen() {
        let m = DayMinutes::compute(15, 6);
        assert_eq!(m.sehri_end, 299);
        assert_eq!(m.maghrib, 1101);

        let times = compute_day_times(15, 6);
        assert_eq!(times.sehri_end, "৪:৫৯");
        assert_eq!(times.maghrib, "৬:২১");
    }

    #[test]
    fn fixed_and_derived_prayers() {
        let t = compute_day_times_with(1, 0, NumeralSystem::Ascii);
        assert_eq!(t.sehri_end, "4:55");
        assert_eq!(t.fajr, "4:45");
        assert_eq!(t.dhuhr, "12:05");
        assert_eq!(t.asr, "4:25");
        assert_eq!(t.maghrib, "6:12");
        assert_eq!(t.isha, "7:27");
    }

    #[test]
    fn next_prayer_picks_first_upcoming() {
        // 13:00 in Dhaka on day 1: asr is next
        let next = next_prayer(1, 0, 13 * 60, NumeralSystem::Ascii);
        assert_eq!(next.prayer, PrayerType::Asr);
        assert_eq!(next.label, "আসর নামাজ");
        assert_eq!(next.time, "4:25");

        // exactly at dhuhr: dhuhr is no longer "next"
        let next = next_prayer(1, 0, 725, NumeralSystem::Ascii);
        assert_eq!(next.prayer, PrayerType::Asr);
    }

    #[test]
    fn next_prayer_wraps_to_fajr_after_isha() {
        let next = next_prayer(10, 2, 23 * 60, NumeralSystem::Ascii);
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert_eq!(next.label, PrayerType::Fajr.label());
    }
}
