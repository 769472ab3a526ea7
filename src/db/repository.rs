use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{AppTheme, District};

// ─── Keys ────────────────────────────────────────────────────────────────────

pub const SELECTED_DISTRICT_KEY: &str = "selected_district";
pub const DONATIONS_KEY: &str = "app_donations";
pub const THEME_KEY: &str = "app_theme";
const QUOTE_KEY_PREFIX: &str = "islamic_inspiration_";

/// Per-day cache key for the inspirational quote, e.g. `islamic_inspiration_2026-02-18`.
pub fn quote_cache_key(date: chrono::NaiveDate) -> String {
    format!("{}{}", QUOTE_KEY_PREFIX, date.format("%Y-%m-%d"))
}

// ─── Local storage ───────────────────────────────────────────────────────────

/// String key/value store. Writes are last-write-wins.
pub struct StorageRepo;

impl StorageRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Read and decode a JSON value. An entry that no longer parses is
    /// dropped and reported as absent.
    pub fn get_json<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
        let Some(raw) = Self::get(conn, key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Discarding malformed '{}' entry: {}", key, e);
                Self::remove(conn, key)?;
                Ok(None)
            }
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Serializing '{}'", key))?;
        Self::set(conn, key, &raw)
    }
}

// ─── Preferences ─────────────────────────────────────────────────────────────

/// Selected district and theme.
pub struct PrefsRepo;

impl PrefsRepo {
    pub fn district(conn: &Connection) -> Result<Option<District>> {
        StorageRepo::get_json(conn, SELECTED_DISTRICT_KEY)
    }

    pub fn set_district(conn: &Connection, district: &District) -> Result<()> {
        StorageRepo::set_json(conn, SELECTED_DISTRICT_KEY, district)
    }

    /// Stored as the bare theme name. Unknown names read as the default.
    pub fn theme(conn: &Connection) -> Result<AppTheme> {
        let theme = StorageRepo::get(conn, THEME_KEY)?
            .and_then(|raw| raw.parse::<AppTheme>().ok())
            .unwrap_or_default();
        Ok(theme)
    }

    pub fn set_theme(conn: &Connection, theme: AppTheme) -> Result<()> {
        StorageRepo::set(conn, THEME_KEY, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use chrono::NaiveDate;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn set_get_overwrite_remove() {
        let conn = conn();
        assert_eq!(StorageRepo::get(&conn, THEME_KEY).unwrap(), None);

        StorageRepo::set(&conn, THEME_KEY, "golden").unwrap();
        StorageRepo::set(&conn, THEME_KEY, "indigo").unwrap();
        assert_eq!(
            StorageRepo::get(&conn, THEME_KEY).unwrap().as_deref(),
            Some("indigo")
        );

        StorageRepo::remove(&conn, THEME_KEY).unwrap();
        assert_eq!(StorageRepo::get(&conn, THEME_KEY).unwrap(), None);
    }

    #[test]
    fn json_values_round_trip() {
        let conn = conn();
        let khulna = District::new("খুলনা", 5);
        StorageRepo::set_json(&conn, SELECTED_DISTRICT_KEY, &khulna).unwrap();

        let raw = StorageRepo::get(&conn, SELECTED_DISTRICT_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"name":"খুলনা","offset":5}"#);

        let back: Option<District> = StorageRepo::get_json(&conn, SELECTED_DISTRICT_KEY).unwrap();
        assert_eq!(back, Some(khulna));
    }

    #[test]
    fn malformed_json_is_dropped() {
        let conn = conn();
        StorageRepo::set(&conn, SELECTED_DISTRICT_KEY, "{not json").unwrap();

        let value: Option<District> = StorageRepo::get_json(&conn, SELECTED_DISTRICT_KEY).unwrap();
        assert_eq!(value, None);
        assert_eq!(StorageRepo::get(&conn, SELECTED_DISTRICT_KEY).unwrap(), None);
    }

    #[test]
    fn theme_is_stored_raw() {
        let conn = conn();
        assert_eq!(PrefsRepo::theme(&conn).unwrap(), AppTheme::Emerald);
        PrefsRepo::set_theme(&conn, AppTheme::Indigo).unwrap();
        assert_eq!(StorageRepo::get(&conn, THEME_KEY).unwrap().as_deref(), Some("indigo"));
        assert_eq!(PrefsRepo::theme(&conn).unwrap(), AppTheme::Indigo);

        StorageRepo::set(&conn, THEME_KEY, "neon").unwrap();
        assert_eq!(PrefsRepo::theme(&conn).unwrap(), AppTheme::Emerald);
    }

    #[test]
    fn quote_keys_are_dated() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        assert_eq!(quote_cache_key(date), "islamic_inspiration_2026-02-18");
    }
}
