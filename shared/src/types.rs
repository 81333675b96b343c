//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "es", alias = "spanish")]
    Spanish,
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "es" | "spanish" => Ok(Language::Spanish),
            "en" | "english" => Ok(Language::English),
            _ => Err("Unsupported language"),
        }
    }
}

/// Light period a reading or target applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Day,
    Night,
}

impl DayPeriod {
    pub fn from_daytime(is_daytime: bool) -> Self {
        if is_daytime {
            DayPeriod::Day
        } else {
            DayPeriod::Night
        }
    }
}
