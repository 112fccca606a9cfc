/// Session windows expressed as offsets from local midnight
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};

use crate::error::{MarketError, Result};

/// One contiguous trading interval `[start, end)` on the local wall clock.
///
/// When `end <= start` the window wraps past midnight and covers
/// `[start, 24h) ∪ [0, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    start: Duration,
    end: Duration,
}

impl SessionWindow {
    pub fn new(start: Duration, end: Duration) -> Result<Self> {
        let day = Duration::days(1);
        for (label, offset) in [("start", start), ("end", end)] {
            if offset < Duration::zero() || offset >= day {
                return Err(MarketError::InvalidSession(format!(
                    "{} offset {}s is outside [0, 24h)",
                    label,
                    offset.num_seconds()
                )));
            }
        }
        Ok(SessionWindow { start, end })
    }

    /// Build from wall-clock hours and minutes, e.g. `from_hm((9, 30), (16, 0))`
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Result<Self> {
        Self::new(hm_offset(start)?, hm_offset(end)?)
    }

    /// Parse `HH:MM` or `HH:MM:SS` bounds
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_offset(start)?, parse_offset(end)?)
    }

    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn end(&self) -> Duration {
        self.end
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `elapsed` since local midnight falls inside the window
    pub fn contains(&self, elapsed: Duration) -> bool {
        if self.wraps_midnight() {
            elapsed >= self.start || elapsed < self.end
        } else {
            elapsed >= self.start && elapsed < self.end
        }
    }

    /// Whether a local time falls inside the window, measured against
    /// midnight of its own day in its own zone.
    pub fn is_within<Tz: TimeZone>(&self, local: &DateTime<Tz>) -> bool {
        self.contains(elapsed_since_midnight(local))
    }
}

/// Wall-clock time elapsed since local midnight
pub fn elapsed_since_midnight<Tz: TimeZone>(local: &DateTime<Tz>) -> Duration {
    let time = local.time();
    Duration::seconds(i64::from(time.num_seconds_from_midnight()))
        + Duration::nanoseconds(i64::from(time.nanosecond()))
}

fn hm_offset((hour, minute): (u32, u32)) -> Result<Duration> {
    if hour >= 24 || minute >= 60 {
        return Err(MarketError::InvalidSession(format!(
            "{:02}:{:02} is not a valid time of day",
            hour, minute
        )));
    }
    Ok(Duration::hours(i64::from(hour)) + Duration::minutes(i64::from(minute)))
}

fn parse_offset(value: &str) -> Result<Duration> {
    let time = NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| MarketError::InvalidSession(format!("'{}': {}", value, e)))?;
    Ok(Duration::seconds(i64::from(time.num_seconds_from_midnight())))
}
