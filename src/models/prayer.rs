use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerType {
    /// The five daily prayers in the order they occur.
    pub const ALL: [PrayerType; 5] = [
        PrayerType::Fajr,
        PrayerType::Dhuhr,
        PrayerType::Asr,
        PrayerType::Maghrib,
        PrayerType::Isha,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Fajr => "ফজর",
            PrayerType::Dhuhr => "জোহর",
            PrayerType::Asr => "আসর",
            PrayerType::Maghrib => "মাগরিব",
            PrayerType::Isha => "এশা",
        }
    }

    /// Banner label, e.g. "ফজর নামাজ".
    pub fn label(&self) -> String {
        format!("{} নামাজ", self.display_name())
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fajr" => Ok(PrayerType::Fajr),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(PrayerType::Dhuhr),
            "asr" => Ok(PrayerType::Asr),
            "maghrib" => Ok(PrayerType::Maghrib),
            "isha" => Ok(PrayerType::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer type: {}", s)),
        }
    }
}

/// The upcoming prayer shown once iftar has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub prayer: PrayerType,
    pub label: String,
    pub time: String,
}
