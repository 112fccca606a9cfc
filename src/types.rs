/// Core type definitions for market hour checks
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::time::HolidayDef;

/// Trading status of a market at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketStatus {
    Closed,
    Open,
    Premarket,
    Postmarket,
    Overnight,
}

impl MarketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            MarketStatus::Closed => "closed",
            MarketStatus::Open => "open",
            MarketStatus::Premarket => "premarket",
            MarketStatus::Postmarket => "postmarket",
            MarketStatus::Overnight => "overnight",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "closed" => Some(MarketStatus::Closed),
            "open" => Some(MarketStatus::Open),
            "premarket" => Some(MarketStatus::Premarket),
            "postmarket" => Some(MarketStatus::Postmarket),
            "overnight" => Some(MarketStatus::Overnight),
            _ => None,
        }
    }

    /// Only regular trading counts as open; extended sessions do not.
    pub fn is_open(&self) -> bool {
        *self == MarketStatus::Open
    }
}

impl fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in markets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketKind {
    Nasdaq,
    Hkex,
    ChinaAShare,
}

impl MarketKind {
    pub const ALL: [MarketKind; 3] = [MarketKind::Nasdaq, MarketKind::Hkex, MarketKind::ChinaAShare];

    /// Registry id
    pub fn as_str(&self) -> &str {
        match self {
            MarketKind::Nasdaq => "NASDAQ",
            MarketKind::Hkex => "HKEX",
            MarketKind::ChinaAShare => "ChinaAShare",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "NASDAQ" => Some(MarketKind::Nasdaq),
            "HKEX" => Some(MarketKind::Hkex),
            "ChinaAShare" => Some(MarketKind::ChinaAShare),
            _ => None,
        }
    }
}

/// Status of one market at one instant, as reported to callers
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub market: String,
    pub status: MarketStatus,
    pub is_open: bool,
    pub local_time: DateTime<FixedOffset>,
}

/// Configuration file contents
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub markets: Vec<MarketConfig>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A custom market declared in configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    pub id: String,
    pub name: Option<String>,
    pub zone: String,
    pub fallback_utc_offset_hours: Option<i32>,

    pub sessions: Vec<SessionConfig>,

    // Holidays: either static dates (inline and/or CSV file) or rules
    #[serde(default)]
    pub holiday_dates: Vec<NaiveDate>,
    /// `date,name` CSV; relative paths are resolved against the config file's directory
    pub holidays_file: Option<PathBuf>,
    #[serde(default)]
    pub holiday_rules: Vec<HolidayDef>,
}

impl MarketConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// One session window, times as `HH:MM` or `HH:MM:SS` local wall clock
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub start: String,
    pub end: String,
    #[serde(default = "default_session_status")]
    pub status: MarketStatus,
}

fn default_session_status() -> MarketStatus {
    MarketStatus::Open
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        for status in [
            MarketStatus::Closed,
            MarketStatus::Open,
            MarketStatus::Premarket,
            MarketStatus::Postmarket,
            MarketStatus::Overnight,
        ] {
            assert_eq!(MarketStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(MarketStatus::from_str("halted"), None);
    }

    #[test]
    fn test_only_open_is_open() {
        assert!(MarketStatus::Open.is_open());
        assert!(!MarketStatus::Premarket.is_open());
        assert!(!MarketStatus::Postmarket.is_open());
        assert!(!MarketStatus::Overnight.is_open());
        assert!(!MarketStatus::Closed.is_open());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&MarketStatus::Overnight).unwrap();
        assert_eq!(json, "\"overnight\"");
    }

    #[test]
    fn test_market_kind_ids() {
        for kind in MarketKind::ALL {
            assert_eq!(MarketKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(MarketKind::from_str("LSE"), None);
    }
}
