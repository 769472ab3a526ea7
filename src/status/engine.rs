use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

use crate::models::NextPrayer;
use crate::prayer_times::calculator::{next_prayer, DayMinutes, LAST_DAY};
use crate::status::adhan::AdhanPlayer;
use crate::utils::format::format_mm_ss;
use crate::utils::numerals::NumeralSystem;

const MS_PER_DAY: i64 = 86_400_000;
/// Hours after midnight during which the banner is forced back to the countdown.
const RESET_UNTIL_HOUR: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Countdown,
    Adhan,
    PrayerTimes,
}

/// Time left until the first day of Ramadan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    fn from_millis(ms: i64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms % MS_PER_DAY) / 3_600_000,
            minutes: (ms % 3_600_000) / 60_000,
            seconds: (ms % 60_000) / 1000,
        }
    }
}

/// What the home screen banner shows right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStatus {
    pub mode: DisplayMode,
    pub ramadan_day: u32,
    pub ramadan_countdown: Option<Countdown>,
    pub iftar_countdown: String,
    pub next_prayer: Option<NextPrayer>,
}

impl LiveStatus {
    fn initial(numerals: NumeralSystem) -> Self {
        Self {
            mode: DisplayMode::Countdown,
            ramadan_day: 1,
            ramadan_countdown: None,
            iftar_countdown: format_mm_ss(0, numerals),
            next_prayer: None,
        }
    }
}

/// Ramadan day for `now`, or the remaining countdown if Ramadan has not
/// started. Day 1 begins at `start` and the count stops at 30.
pub fn ramadan_day(start: NaiveDateTime, now: NaiveDateTime) -> (u32, Option<Countdown>) {
    let elapsed_ms = (now - start).num_milliseconds();
    if elapsed_ms < 0 {
        return (1, Some(Countdown::from_millis(-elapsed_ms)));
    }
    let day = (elapsed_ms / MS_PER_DAY + 1).min(LAST_DAY as i64);
    (day as u32, None)
}

/// Drives the countdown / adhan / next-prayer banner from the wall clock.
pub struct StatusEngine {
    start: NaiveDateTime,
    adhan_window: Duration,
    numerals: NumeralSystem,
    offset_minutes: i32,
    status: LiveStatus,
    adhan_done: bool,
    retry_pending: bool,
    player: Box<dyn AdhanPlayer>,
}

impl StatusEngine {
    pub fn new(
        start: NaiveDateTime,
        adhan_window_minutes: i64,
        numerals: NumeralSystem,
        offset_minutes: i32,
        player: Box<dyn AdhanPlayer>,
    ) -> Self {
        Self {
            start,
            adhan_window: Duration::minutes(adhan_window_minutes),
            numerals,
            offset_minutes,
            status: LiveStatus::initial(numerals),
            adhan_done: false,
            retry_pending: false,
            player,
        }
    }

    pub fn status(&self) -> &LiveStatus {
        &self.status
    }

    /// Switching district takes effect on the next tick.
    pub fn set_offset(&mut self, offset_minutes: i32) {
        self.offset_minutes = offset_minutes;
    }

    pub fn tick(&mut self, now: NaiveDateTime) -> &LiveStatus {
        let (day, countdown) = ramadan_day(self.start, now);
        self.status.ramadan_day = day;
        self.status.ramadan_countdown = countdown;

        if now.hour() < RESET_UNTIL_HOUR && self.status.mode != DisplayMode::Countdown {
            log::debug!("Early morning reset to countdown");
            self.status.mode = DisplayMode::Countdown;
        }

        let maghrib_min = DayMinutes::compute(day, self.offset_minutes).maghrib;
        let maghrib = now.date().and_time(NaiveTime::MIN) + Duration::minutes(maghrib_min as i64);
        let until = maghrib - now;

        if self.status.ramadan_countdown.is_some() {
            self.status.mode = DisplayMode::Countdown;
            self.status.iftar_countdown = format_mm_ss(until.num_seconds(), self.numerals);
            self.status.next_prayer = None;
            return &self.status;
        }

        if until > Duration::zero() {
            self.status.mode = DisplayMode::Countdown;
            self.status.iftar_countdown = format_mm_ss(until.num_seconds(), self.numerals);
            self.adhan_done = false;
        } else {
            self.status.iftar_countdown = format_mm_ss(0, self.numerals);
            let passed = now - maghrib;
            if self.status.mode == DisplayMode::Adhan && self.player.finished() {
                self.complete_adhan();
            }
            if passed < self.adhan_window && !self.adhan_done {
                if self.status.mode != DisplayMode::Adhan {
                    self.status.mode = DisplayMode::Adhan;
                    self.status.next_prayer = None;
                    log::info!("Maghrib reached, showing adhan");
                    self.play();
                }
            } else {
                self.status.mode = DisplayMode::PrayerTimes;
            }
        }

        if self.status.mode == DisplayMode::PrayerTimes {
            let minute_of_day = (now.hour() * 60 + now.minute()) as i32;
            self.status.next_prayer = Some(next_prayer(
                day,
                self.offset_minutes,
                minute_of_day,
                self.numerals,
            ));
        }

        &self.status
    }

    /// The adhan finished playing (or was dismissed).
    pub fn complete_adhan(&mut self) {
        if self.status.mode == DisplayMode::Adhan {
            self.status.mode = DisplayMode::PrayerTimes;
        }
        self.adhan_done = true;
        self.retry_pending = false;
    }

    /// Any key press. Retries playback once if the last attempt failed.
    pub fn on_user_interaction(&mut self) {
        if !self.retry_pending {
            return;
        }
        self.retry_pending = false;
        if self.status.mode != DisplayMode::Adhan {
            return;
        }
        if let Err(e) = self.player.play() {
            log::debug!("Adhan retry failed: {}", e);
        }
    }

    fn play(&mut self) {
        if let Err(e) = self.player.play() {
            log::debug!("Adhan playback failed, will retry on interaction: {}", e);
            self.retry_pending = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerType;
    use crate::status::adhan::PlaybackError;
    use chrono::NaiveDate;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Probe {
        plays: Rc<Cell<u32>>,
        fail: Rc<Cell<bool>>,
        done: Rc<Cell<bool>>,
    }

    struct FakePlayer(Probe);

    impl AdhanPlayer for FakePlayer {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.0.plays.set(self.0.plays.get() + 1);
            if self.0.fail.get() {
                Err(PlaybackError::NoPlayer)
            } else {
                Ok(())
            }
        }

        fn finished(&mut self) -> bool {
            self.0.done.get()
        }
    }

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 18)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn engine(probe: &Probe) -> StatusEngine {
        StatusEngine::new(
            start(),
            4,
            NumeralSystem::Bengali,
            0,
            Box::new(FakePlayer(probe.clone())),
        )
    }

    /// Day 10 of Ramadan in Dhaka: maghrib at 1092 + 10/4 = 1094 (18:14).
    fn day10(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 27)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn day_derivation() {
        assert_eq!(ramadan_day(start(), start()), (1, None));
        let late = start() + Duration::days(29) + Duration::milliseconds(1);
        assert_eq!(ramadan_day(start(), late).0, 30);
        assert_eq!(ramadan_day(start(), start() + Duration::days(45)).0, 30);
        assert_eq!(ramadan_day(start(), day10(12, 0, 0)).0, 10);
    }

    #[test]
    fn counts_down_to_ramadan() {
        let now = start() - Duration::days(2) - Duration::hours(3) - Duration::seconds(5);
        let (day, countdown) = ramadan_day(start(), now);
        assert_eq!(day, 1);
        assert_eq!(
            countdown,
            Some(Countdown { days: 2, hours: 3, minutes: 0, seconds: 5 })
        );
    }

    #[test]
    fn before_ramadan_stays_on_countdown_past_maghrib() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        let eve = NaiveDate::from_ymd_opt(2026, 2, 10)
            .unwrap()
            .and_hms_opt(18, 13, 0)
            .unwrap();
        let status = engine.tick(eve);
        assert_eq!(status.mode, DisplayMode::Countdown);
        assert!(status.ramadan_countdown.is_some());
        assert_eq!(probe.plays.get(), 0);
    }

    #[test]
    fn five_minutes_before_iftar() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        let status = engine.tick(day10(18, 9, 0));
        assert_eq!(status.mode, DisplayMode::Countdown);
        assert_eq!(status.iftar_countdown, "০৫:০০");
        assert_eq!(status.ramadan_day, 10);
    }

    #[test]
    fn long_waits_keep_counting_minutes() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        let status = engine.tick(day10(8, 0, 30));
        assert_eq!(status.iftar_countdown, "৬১৩:৩০");
    }

    #[test]
    fn adhan_at_maghrib_plays_once() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        engine.tick(day10(18, 13, 59));
        assert_eq!(engine.tick(day10(18, 14, 0)).mode, DisplayMode::Adhan);
        assert_eq!(engine.status().iftar_countdown, "০০:০০");
        engine.tick(day10(18, 15, 0));
        engine.tick(day10(18, 16, 0));
        assert_eq!(probe.plays.get(), 1);
    }

    #[test]
    fn prayer_times_after_window() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        engine.tick(day10(18, 14, 0));
        let status = engine.tick(day10(18, 19, 0));
        assert_eq!(status.mode, DisplayMode::PrayerTimes);
        let next = status.next_prayer.clone().unwrap();
        assert_eq!(next.prayer, PrayerType::Isha);
        assert_eq!(next.time, "৭:২৯");
    }

    #[test]
    fn next_prayer_wraps_after_isha() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        let status = engine.tick(day10(22, 0, 0));
        assert_eq!(status.mode, DisplayMode::PrayerTimes);
        assert_eq!(status.next_prayer.as_ref().map(|n| n.prayer), Some(PrayerType::Fajr));
    }

    #[test]
    fn completion_ends_adhan_for_the_evening() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        engine.tick(day10(18, 14, 0));
        engine.complete_adhan();
        assert_eq!(engine.status().mode, DisplayMode::PrayerTimes);
        assert_eq!(engine.tick(day10(18, 15, 0)).mode, DisplayMode::PrayerTimes);
        assert_eq!(probe.plays.get(), 1);
    }

    #[test]
    fn finished_player_completes_adhan() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        engine.tick(day10(18, 14, 0));
        probe.done.set(true);
        assert_eq!(engine.tick(day10(18, 15, 0)).mode, DisplayMode::PrayerTimes);
    }

    #[test]
    fn failed_playback_retries_once_on_interaction() {
        let probe = Probe::default();
        probe.fail.set(true);
        let mut engine = engine(&probe);
        engine.tick(day10(18, 14, 0));
        assert_eq!(engine.status().mode, DisplayMode::Adhan);
        engine.on_user_interaction();
        engine.on_user_interaction();
        assert_eq!(probe.plays.get(), 2);
    }

    #[test]
    fn early_morning_resets_to_countdown() {
        let probe = Probe::default();
        let mut engine = engine(&probe);
        engine.tick(day10(23, 0, 0));
        assert_eq!(engine.status().mode, DisplayMode::PrayerTimes);
        let status = engine.tick(day10(23, 0, 0) + Duration::hours(2));
        assert_eq!(status.mode, DisplayMode::Countdown);
        assert_eq!(status.ramadan_day, 11);
    }
}
