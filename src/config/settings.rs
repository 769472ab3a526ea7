use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::numerals::NumeralSystem;

fn default_ramadan_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 18)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}
fn default_adhan_window_minutes() -> i64 {
    4
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_true() -> bool {
    true
}
fn default_reverse_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}
fn default_geocode_timeout_secs() -> u64 {
    8
}
fn default_adhan_url() -> String {
    "https://www.islamcan.com/audio/adhan/azan1.mp3".to_string()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_quote_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_answer_model() -> String {
    "gemini-3-pro-preview".to_string()
}
fn default_max_attempts() -> u32 {
    2
}
fn default_base_delay_ms() -> u64 {
    2000
}
fn default_backoff_multiplier() -> u32 {
    2
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_tick_ms() -> u64 {
    1000
}
fn default_rotation_secs() -> u64 {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamadanConfig {
    /// Local midnight that starts day 1.
    #[serde(default = "default_ramadan_start")]
    pub start: NaiveDateTime,
    /// How long after maghrib the banner shows the adhan before falling
    /// back to the next-prayer display.
    #[serde(default = "default_adhan_window_minutes")]
    pub adhan_window_minutes: i64,
    #[serde(default)]
    pub numerals: NumeralSystem,
    /// Days to add/subtract from the Hijri date shown in the header.
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for RamadanConfig {
    fn default() -> Self {
        Self {
            start: default_ramadan_start(),
            adhan_window_minutes: default_adhan_window_minutes(),
            numerals: NumeralSystem::default(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Look up the district from coordinates when none has been chosen yet.
    #[serde(default = "default_true")]
    pub auto_locate: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_reverse_geocode_url")]
    pub reverse_geocode_url: String,
    #[serde(default = "default_geocode_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            auto_locate: true,
            latitude: None,
            longitude: None,
            reverse_geocode_url: default_reverse_geocode_url(),
            timeout_secs: default_geocode_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdhanConfig {
    #[serde(default = "default_adhan_url")]
    pub url: String,
    /// Player command; the url is appended as the last argument.
    /// Empty means ring the terminal bell instead, e.g. `["mpv", "--no-video"]`.
    #[serde(default)]
    pub player: Vec<String>,
}

impl Default for AdhanConfig {
    fn default() -> Self {
        Self {
            url: default_adhan_url(),
            player: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Falls back to the GEMINI_API_KEY / API_KEY environment variables.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_quote_model")]
    pub quote_model: String,
    #[serde(default = "default_answer_model")]
    pub answer_model: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            quote_model: default_quote_model(),
            answer_model: default_answer_model(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AssistantConfig {
    /// A usable credential, if any. The literal placeholder "API_KEY" does
    /// not count.
    pub fn resolved_api_key(&self) -> Option<String> {
        let from_env = || {
            std::env::var("GEMINI_API_KEY")
                .ok()
                .or_else(|| std::env::var("API_KEY").ok())
        };
        self.api_key
            .clone()
            .or_else(from_env)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty() && k != "API_KEY")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Banner and donation carousel period.
    #[serde(default = "default_rotation_secs")]
    pub rotation_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            rotation_secs: default_rotation_secs(),
        }
    }
}

impl UiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(100))
    }

    pub fn rotation(&self) -> Duration {
        Duration::from_secs(self.rotation_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ramadan: RamadanConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub adhan: AdhanConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "roza").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("roza.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ramadan.start.to_string(), "2026-02-18 00:00:00");
        assert_eq!(config.ramadan.adhan_window_minutes, 4);
        assert_eq!(config.ramadan.numerals, NumeralSystem::Bengali);
        assert_eq!(config.assistant.max_attempts, 2);
        assert_eq!(config.assistant.base_delay_ms, 2000);
        assert_eq!(config.ui.rotation_secs, 6);
        assert!(config.adhan.player.is_empty());
    }

    #[test]
    fn partial_sections_fill_in() {
        let config = AppConfig::from_toml(
            r#"
            [ramadan]
            start = "2027-02-08T00:00:00"
            numerals = "ascii"

            [location]
            latitude = 24.37
            longitude = 88.6
            "#,
        )
        .unwrap();
        assert_eq!(config.ramadan.start.to_string(), "2027-02-08 00:00:00");
        assert_eq!(config.ramadan.numerals, NumeralSystem::Ascii);
        assert_eq!(config.ramadan.adhan_window_minutes, 4);
        assert_eq!(config.location.latitude, Some(24.37));
        assert!(config.location.auto_locate);
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back.ramadan.start, config.ramadan.start);
        assert_eq!(back.assistant.quote_model, config.assistant.quote_model);
    }

    #[test]
    fn placeholder_key_is_not_a_credential() {
        let config = AssistantConfig {
            api_key: Some("API_KEY".to_string()),
            ..AssistantConfig::default()
        };
        assert_eq!(config.resolved_api_key(), None);

        let config = AssistantConfig {
            api_key: Some(" abc123 ".to_string()),
            ..AssistantConfig::default()
        };
        assert_eq!(config.resolved_api_key().as_deref(), Some("abc123"));
    }
}
