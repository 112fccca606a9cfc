/// Configuration loading from TOML file
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{MarketError, Result};
use crate::markets::SessionMarket;
use crate::time::{DynamicHolidays, HolidayProvider, MarketZone, SessionWindow, StaticHolidays};
use crate::types::{Config, MarketConfig, MarketKind};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| MarketError::ConfigError(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&content)?;
    if let Some(base) = path.parent() {
        resolve_holiday_files(&mut config, base);
    }
    info!("Loaded {} market(s) from {}", config.markets.len(), path.display());

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)
        .map_err(|e| MarketError::ConfigError(format!("Failed to parse config: {}", e)))?;

    validate_config(&config)?;

    Ok(config)
}

/// Anchor relative `holidays_file` paths at `base`
fn resolve_holiday_files(config: &mut Config, base: &Path) {
    for market in &mut config.markets {
        if let Some(file) = market.holidays_file.as_mut() {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();

    for market in &config.markets {
        if market.id.trim().is_empty() {
            return Err(MarketError::ConfigError("market id is empty".to_string()));
        }

        if MarketKind::from_str(&market.id).is_some() {
            return Err(MarketError::ConfigError(format!(
                "market id {} is reserved for a built-in market",
                market.id
            )));
        }

        if !seen.insert(market.id.as_str()) {
            return Err(MarketError::ConfigError(format!("duplicate market id {}", market.id)));
        }

        if market.sessions.is_empty() {
            return Err(MarketError::ConfigError(format!("{}: no sessions configured", market.id)));
        }

        for session in &market.sessions {
            SessionWindow::parse(&session.start, &session.end)
                .map_err(|e| MarketError::ConfigError(format!("{}: {}", market.id, e)))?;
        }

        let has_static = !market.holiday_dates.is_empty() || market.holidays_file.is_some();
        if has_static && !market.holiday_rules.is_empty() {
            return Err(MarketError::ConfigError(format!(
                "{}: use either holiday dates or holiday rules, not both",
                market.id
            )));
        }

        if let Some(hours) = market.fallback_utc_offset_hours {
            if !(-14..=14).contains(&hours) {
                return Err(MarketError::ConfigError(format!(
                    "{}: fallback offset {}h is outside ±14h",
                    market.id, hours
                )));
            }
        }
    }

    Ok(())
}

/// Build a session market from its configuration entry
pub fn build_market(config: &MarketConfig) -> Result<SessionMarket> {
    let zone = MarketZone::resolve_with_fallback(&config.zone, config.fallback_utc_offset_hours)?;

    let sessions = config
        .sessions
        .iter()
        .map(|s| SessionWindow::parse(&s.start, &s.end).map(|window| (window, s.status)))
        .collect::<Result<Vec<_>>>()?;

    let holidays: Box<dyn HolidayProvider> = if config.holiday_rules.is_empty() {
        let mut table = match &config.holidays_file {
            Some(path) => StaticHolidays::from_csv_path(path)?,
            None => StaticHolidays::default(),
        };
        table.extend(config.holiday_dates.iter().map(|date| (*date, String::new())));
        Box::new(table)
    } else {
        Box::new(DynamicHolidays::try_new(zone.clone(), config.holiday_rules.clone())?)
    };

    Ok(SessionMarket::new(config.display_name(), zone, sessions, holidays))
}
