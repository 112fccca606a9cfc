/// NASDAQ: four sessions including an overnight window across midnight
use chrono::{DateTime, FixedOffset, Timelike};

use crate::error::Result;
use crate::markets::Market;
use crate::time::{is_weekend, DynamicHolidays, HolidayProvider, MarketZone, SessionWindow};
use crate::types::MarketStatus;

/// US equities on Eastern Time.
///
/// Sessions (ET): overnight 20:00-04:00, premarket 04:00-09:30,
/// regular 09:30-16:00, postmarket 16:00-20:00.
#[derive(Debug, Clone)]
pub struct Nasdaq {
    zone: MarketZone,
    holidays: DynamicHolidays,
    overnight: SessionWindow,
    premarket: SessionWindow,
    regular: SessionWindow,
    postmarket: SessionWindow,
}

impl Nasdaq {
    pub fn new() -> Result<Self> {
        let zone = MarketZone::builtin("America/New_York", -5);
        let holidays = DynamicHolidays::us_market(zone.clone());
        Ok(Nasdaq {
            zone,
            holidays,
            overnight: SessionWindow::from_hm((20, 0), (4, 0))?,
            premarket: SessionWindow::from_hm((4, 0), (9, 30))?,
            regular: SessionWindow::from_hm((9, 30), (16, 0))?,
            postmarket: SessionWindow::from_hm((16, 0), (20, 0))?,
        })
    }

    /// The overnight session belongs to the trading day it runs into.
    ///
    /// The evening half (from 20:00) only requires the next civil day to be a
    /// weekday; it does not consult the holiday table. The early-morning half
    /// (before 04:00) requires the current civil day to be a weekday.
    fn in_overnight_session(&self, local: &DateTime<FixedOffset>) -> bool {
        if !self.overnight.is_within(local) {
            return false;
        }

        let today = local.date_naive();
        if local.hour() >= 20 {
            today.succ_opt().is_some_and(|next| !is_weekend(&next))
        } else if local.hour() < 4 {
            !is_weekend(&today)
        } else {
            false
        }
    }
}

impl Market for Nasdaq {
    fn name(&self) -> &str {
        "NASDAQ"
    }

    fn zone(&self) -> &MarketZone {
        &self.zone
    }

    fn holidays(&self) -> &dyn HolidayProvider {
        &self.holidays
    }

    fn status_at_local(&self, local: &DateTime<FixedOffset>) -> MarketStatus {
        // Checked before the weekend gate: Sunday 20:00 opens Monday's session
        if self.in_overnight_session(local) {
            return MarketStatus::Overnight;
        }

        if is_weekend(local) {
            return MarketStatus::Closed;
        }

        if self.holidays.is_holiday(local) {
            return MarketStatus::Closed;
        }

        if self.premarket.is_within(local) {
            MarketStatus::Premarket
        } else if self.regular.is_within(local) {
            MarketStatus::Open
        } else if self.postmarket.is_within(local) {
            MarketStatus::Postmarket
        } else {
            MarketStatus::Closed
        }
    }
}
