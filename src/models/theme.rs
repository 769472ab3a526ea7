use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppTheme {
    #[default]
    Emerald,
    Golden,
    Indigo,
}

impl AppTheme {
    pub const ALL: [AppTheme; 3] = [AppTheme::Emerald, AppTheme::Golden, AppTheme::Indigo];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppTheme::Emerald => "emerald",
            AppTheme::Golden => "golden",
            AppTheme::Indigo => "indigo",
        }
    }

    pub fn next(&self) -> AppTheme {
        match self {
            AppTheme::Emerald => AppTheme::Golden,
            AppTheme::Golden => AppTheme::Indigo,
            AppTheme::Indigo => AppTheme::Emerald,
        }
    }
}

impl FromStr for AppTheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emerald" => Ok(AppTheme::Emerald),
            "golden" | "gold" => Ok(AppTheme::Golden),
            "indigo" => Ok(AppTheme::Indigo),
            _ => Err(anyhow::anyhow!("Unknown theme: {}", s)),
        }
    }
}
