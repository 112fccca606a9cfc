/// Per-market trading status policies
use chrono::{DateTime, FixedOffset, Utc};

use crate::time::{HolidayProvider, MarketZone};
use crate::types::MarketStatus;

pub mod nasdaq;
pub mod session_market;

pub use nasdaq::Nasdaq;
pub use session_market::SessionMarket;

/// A market that can classify any instant into a `MarketStatus`.
///
/// Implementations are immutable once built and may be shared across threads.
pub trait Market: Send + Sync {
    fn name(&self) -> &str;

    fn zone(&self) -> &MarketZone;

    fn holidays(&self) -> &dyn HolidayProvider;

    /// Status for a time already on the market's local wall clock
    fn status_at_local(&self, local: &DateTime<FixedOffset>) -> MarketStatus;

    fn get_status(&self, instant: DateTime<Utc>) -> MarketStatus {
        self.status_at_local(&self.zone().to_local(&instant))
    }

    /// Regular session only; extended sessions report `false`
    fn is_open(&self, instant: DateTime<Utc>) -> bool {
        self.get_status(instant) == MarketStatus::Open
    }
}
