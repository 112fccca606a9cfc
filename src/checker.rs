/// Market registry: look up markets by id and query their status
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::build_market;
use crate::error::{MarketError, Result};
use crate::markets::{Market, Nasdaq, SessionMarket};
use crate::types::{Config, MarketKind, MarketStatus, StatusReport};

pub struct MarketChecker {
    markets: HashMap<String, Arc<dyn Market>>,
}

impl MarketChecker {
    /// Registry holding the built-in markets
    pub fn new() -> Result<Self> {
        let mut checker = Self::empty();
        for kind in MarketKind::ALL {
            checker.add_market(kind.as_str(), builtin_market(kind)?);
        }
        Ok(checker)
    }

    /// Built-in markets plus every market declared in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut checker = Self::new()?;
        for market in &config.markets {
            checker.add_market(&market.id, Arc::new(build_market(market)?));
        }
        Ok(checker)
    }

    pub fn empty() -> Self {
        MarketChecker {
            markets: HashMap::new(),
        }
    }

    /// Register a market, replacing any market already under `id`
    pub fn add_market(&mut self, id: &str, market: Arc<dyn Market>) {
        info!("Registered market {} ({}, zone {})", id, market.name(), market.zone().name());
        self.markets.insert(id.to_string(), market);
    }

    pub fn get_market(&self, id: &str) -> Result<Arc<dyn Market>> {
        self.markets
            .get(id)
            .cloned()
            .ok_or_else(|| MarketError::UnknownMarket(id.to_string()))
    }

    pub fn get_status(&self, id: &str, instant: DateTime<Utc>) -> Result<MarketStatus> {
        let market = self.get_market(id)?;
        let status = market.get_status(instant);
        debug!("{} at {}: {}", id, instant, status);
        Ok(status)
    }

    pub fn is_open(&self, id: &str, instant: DateTime<Utc>) -> Result<bool> {
        Ok(self.get_status(id, instant)? == MarketStatus::Open)
    }

    pub fn report(&self, id: &str, instant: DateTime<Utc>) -> Result<StatusReport> {
        let market = self.get_market(id)?;
        let local_time = market.zone().to_local(&instant);
        let status = market.status_at_local(&local_time);
        Ok(StatusReport {
            market: id.to_string(),
            status,
            is_open: status.is_open(),
            local_time,
        })
    }

    /// Registered ids, sorted
    pub fn market_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.markets.keys().cloned().collect();
        ids.sort();
        ids
    }
}

pub fn builtin_market(kind: MarketKind) -> Result<Arc<dyn Market>> {
    let market: Arc<dyn Market> = match kind {
        MarketKind::Nasdaq => Arc::new(Nasdaq::new()?),
        MarketKind::Hkex => Arc::new(SessionMarket::hkex()?),
        MarketKind::ChinaAShare => Arc::new(SessionMarket::china_a_share()?),
    };
    Ok(market)
}
