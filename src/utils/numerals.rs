use serde::{Deserialize, Serialize};

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

/// Digit glyphs used when rendering numbers for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumeralSystem {
    #[default]
    Bengali,
    Ascii,
}

impl NumeralSystem {
    /// Map every ASCII digit in `s` to this system's glyph. Everything else
    /// (separators, letters, already-localized digits) passes through.
    pub fn localize(&self, s: &str) -> String {
        match self {
            NumeralSystem::Ascii => s.to_string(),
            NumeralSystem::Bengali => s
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => BENGALI_DIGITS[d as usize],
                    None => c,
                })
                .collect(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumeralSystem::Bengali => "bengali",
            NumeralSystem::Ascii => "ascii",
        }
    }
}

impl std::str::FromStr for NumeralSystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bengali" | "bn" => Ok(NumeralSystem::Bengali),
            "ascii" | "latin" | "en" => Ok(NumeralSystem::Ascii),
            _ => Err(anyhow::anyhow!("Unknown numeral system: {}", s)),
        }
    }
}

/// Render any number (or pre-formatted string) with Bengali digits.
pub fn to_localized_digits(value: impl std::fmt::Display) -> String {
    NumeralSystem::Bengali.localize(&value.to_string())
}

/// Inverse of [`to_localized_digits`]: Bengali digits become ASCII.
pub fn to_ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match BENGALI_DIGITS.iter().position(|b| *b == c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_digit() {
        assert_eq!(to_localized_digits(1027), "১০২৭");
        assert_eq!(to_localized_digits("0123456789"), "০১২৩৪৫৬৭৮৯");
    }

    #[test]
    fn non_digits_pass_through() {
        assert_eq!(to_localized_digits("4:59"), "৪:৫৯");
        assert_eq!(to_localized_digits("day ৩"), "day ৩");
    }

    #[test]
    fn ascii_system_is_identity() {
        assert_eq!(NumeralSystem::Ascii.localize("18:21"), "18:21");
    }

    #[test]
    fn ascii_round_trip() {
        assert_eq!(to_ascii_digits("৫০০"), "500");
        assert_eq!(to_ascii_digits(&to_localized_digits("12:05")), "12:05");
    }
}
