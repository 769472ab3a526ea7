use crate::utils::numerals::NumeralSystem;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Format a minute-of-day as 12-hour `H:MM` with no meridiem marker.
/// Hour 0 and hour 12 both render as `12`.
pub fn format_clock(minute_of_day: i32, numerals: NumeralSystem) -> String {
    let min = minute_of_day.rem_euclid(MINUTES_PER_DAY);
    let h = match (min / 60) % 12 {
        0 => 12,
        h => h,
    };
    let m = min % 60;
    numerals.localize(&format!("{}:{:02}", h, m))
}

/// Format remaining seconds as `MM:SS`. Minutes are not wrapped into hours,
/// so long waits read e.g. `620:15`.
pub fn format_mm_ss(total_secs: i64, numerals: NumeralSystem) -> String {
    let total = total_secs.max(0);
    numerals.localize(&format!("{:02}:{:02}", total / 60, total % 60))
}

/// Zero-padded two digit value, localized.
pub fn pad2(value: i64, numerals: NumeralSystem) -> String {
    numerals.localize(&format!("{:02}", value))
}

/// Format a duration in seconds to "X ঘণ্টা Y মিনিট" or "Y মিনিট"
pub fn format_duration_secs(secs: i64, numerals: NumeralSystem) -> String {
    if secs <= 0 {
        return "এখনই".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let text = if hours > 0 {
        format!("{} ঘণ্টা {} মিনিট", hours, minutes)
    } else {
        format!("{} মিনিট", minutes)
    };
    numerals.localize(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_hour_clock_without_meridiem() {
        assert_eq!(format_clock(299, NumeralSystem::Ascii), "4:59");
        assert_eq!(format_clock(1101, NumeralSystem::Ascii), "6:21");
        assert_eq!(format_clock(725, NumeralSystem::Ascii), "12:05");
        assert_eq!(format_clock(5, NumeralSystem::Ascii), "12:05");
    }

    #[test]
    fn clock_is_localized() {
        assert_eq!(format_clock(299, NumeralSystem::Bengali), "৪:৫৯");
    }

    #[test]
    fn countdown_keeps_total_minutes() {
        assert_eq!(format_mm_ss(300, NumeralSystem::Ascii), "05:00");
        assert_eq!(format_mm_ss(0, NumeralSystem::Ascii), "00:00");
        assert_eq!(format_mm_ss(37215, NumeralSystem::Ascii), "620:15");
        assert_eq!(format_mm_ss(-3, NumeralSystem::Bengali), "০০:০০");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration_secs(0, NumeralSystem::Ascii), "এখনই");
        assert_eq!(format_duration_secs(3900, NumeralSystem::Ascii), "1 ঘণ্টা 5 মিনিট");
        assert_eq!(format_duration_secs(600, NumeralSystem::Bengali), "১০ মিনিট");
    }
}
