/// Market time zones: IANA lookup with fixed-offset fallback
use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::error::{MarketError, Result};

/// Fallback offsets (hours east of UTC) for zones the built-in markets use.
/// These ignore DST, which only matters for intraday comparisons.
const KNOWN_FALLBACKS: [(&str, i32); 3] = [
    ("America/New_York", -5),
    ("Asia/Hong_Kong", 8),
    ("Asia/Shanghai", 8),
];

/// Zone a market evaluates its local wall clock in
#[derive(Debug, Clone, PartialEq)]
pub enum MarketZone {
    Named(Tz),
    Fixed { name: String, offset: FixedOffset },
}

impl MarketZone {
    /// Resolve an IANA zone name, falling back to a known fixed offset
    pub fn resolve(name: &str) -> Result<Self> {
        Self::resolve_with_fallback(name, None)
    }

    /// Resolve an IANA zone name; `fallback_hours` overrides the known
    /// fallback table when the name is not in the zone database.
    pub fn resolve_with_fallback(name: &str, fallback_hours: Option<i32>) -> Result<Self> {
        match name.parse::<Tz>() {
            Ok(tz) => Ok(MarketZone::Named(tz)),
            Err(e) => {
                let hours = fallback_hours.or_else(|| known_fallback_hours(name));
                match hours.and_then(|h| Self::fixed(name, h)) {
                    Some(zone) => {
                        warn!("Zone '{}' unavailable ({}), using fixed offset {}", name, e, zone.offset_label());
                        Ok(zone)
                    }
                    None => Err(MarketError::ZoneResolution(format!("{}: {}", name, e))),
                }
            }
        }
    }

    /// Resolve a zone the caller knows has a fallback offset
    pub(crate) fn builtin(name: &str, fallback_hours: i32) -> Self {
        Self::resolve_with_fallback(name, Some(fallback_hours)).unwrap_or_else(|_| MarketZone::Fixed {
            name: name.to_string(),
            offset: Utc.fix(),
        })
    }

    /// Fixed offset of `hours` east of UTC, `None` when out of range
    pub fn fixed(name: &str, hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(|offset| MarketZone::Fixed {
            name: name.to_string(),
            offset,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            MarketZone::Named(tz) => tz.name(),
            MarketZone::Fixed { name, .. } => name,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MarketZone::Fixed { .. })
    }

    /// Convert an instant to this zone's local wall clock
    pub fn to_local(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            MarketZone::Named(tz) => instant.with_timezone(tz).fixed_offset(),
            MarketZone::Fixed { offset, .. } => instant.with_timezone(offset),
        }
    }

    fn offset_label(&self) -> String {
        match self {
            MarketZone::Named(tz) => tz.name().to_string(),
            MarketZone::Fixed { offset, .. } => offset.to_string(),
        }
    }
}

fn known_fallback_hours(name: &str) -> Option<i32> {
    KNOWN_FALLBACKS
        .iter()
        .find(|(zone, _)| *zone == name)
        .map(|(_, hours)| *hours)
}
