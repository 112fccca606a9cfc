/// Markets whose day is a plain list of session windows (HKEX, A-shares,
/// and markets declared in configuration)
use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::markets::Market;
use crate::time::{is_weekend, HolidayProvider, MarketZone, SessionWindow, StaticHolidays};
use crate::types::MarketStatus;

pub struct SessionMarket {
    name: String,
    zone: MarketZone,
    sessions: Vec<(SessionWindow, MarketStatus)>,
    holidays: Box<dyn HolidayProvider>,
}

impl SessionMarket {
    /// `sessions` are tried in order; the first window containing the
    /// local time decides the status.
    pub fn new(
        name: &str,
        zone: MarketZone,
        sessions: Vec<(SessionWindow, MarketStatus)>,
        holidays: Box<dyn HolidayProvider>,
    ) -> Self {
        SessionMarket {
            name: name.to_string(),
            zone,
            sessions,
            holidays,
        }
    }

    /// Hong Kong Exchange: 09:30-12:00 and 13:00-16:00 HKT
    pub fn hkex() -> Result<Self> {
        Ok(Self::new(
            "HKEX",
            MarketZone::builtin("Asia/Hong_Kong", 8),
            vec![
                (SessionWindow::from_hm((9, 30), (12, 0))?, MarketStatus::Open),
                (SessionWindow::from_hm((13, 0), (16, 0))?, MarketStatus::Open),
            ],
            Box::new(StaticHolidays::hkex()?),
        ))
    }

    /// Shanghai and Shenzhen share hours: 09:30-11:30 and 13:00-15:00 CST
    pub fn china_a_share() -> Result<Self> {
        Ok(Self::new(
            "China A-Share",
            MarketZone::builtin("Asia/Shanghai", 8),
            vec![
                (SessionWindow::from_hm((9, 30), (11, 30))?, MarketStatus::Open),
                (SessionWindow::from_hm((13, 0), (15, 0))?, MarketStatus::Open),
            ],
            Box::new(StaticHolidays::china_a_share()?),
        ))
    }

    pub fn sessions(&self) -> &[(SessionWindow, MarketStatus)] {
        &self.sessions
    }
}

impl Market for SessionMarket {
    fn name(&self) -> &str {
        &self.name
    }

    fn zone(&self) -> &MarketZone {
        &self.zone
    }

    fn holidays(&self) -> &dyn HolidayProvider {
        self.holidays.as_ref()
    }

    fn status_at_local(&self, local: &DateTime<FixedOffset>) -> MarketStatus {
        if self.holidays.is_holiday(local) {
            return MarketStatus::Closed;
        }

        if is_weekend(local) {
            return MarketStatus::Closed;
        }

        self.sessions
            .iter()
            .find(|(window, _)| window.is_within(local))
            .map(|(_, status)| *status)
            .unwrap_or(MarketStatus::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use chrono_tz::Asia::{Hong_Kong, Shanghai};

    fn hk(m: u32, d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Hong_Kong.with_ymd_and_hms(2026, m, d, hour, minute, 0).unwrap().with_timezone(&Utc)
    }

    fn cn(m: u32, d: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Shanghai.with_ymd_and_hms(2026, m, d, hour, minute, 0).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_hkex_sessions() {
        let hkex = SessionMarket::hkex().unwrap();
        assert_eq!(hkex.name(), "HKEX");
        // Monday 2026-01-19
        assert_eq!(hkex.get_status(hk(1, 19, 10, 0)), MarketStatus::Open);
        assert_eq!(hkex.get_status(hk(1, 19, 14, 0)), MarketStatus::Open);
        assert!(hkex.is_open(hk(1, 19, 9, 30)));
        assert!(!hkex.is_open(hk(1, 19, 9, 29)));
        assert!(!hkex.is_open(hk(1, 19, 16, 0)));
    }

    #[test]
    fn test_hkex_lunch_break() {
        let hkex = SessionMarket::hkex().unwrap();
        assert_eq!(hkex.get_status(hk(1, 19, 12, 0)), MarketStatus::Closed);
        assert_eq!(hkex.get_status(hk(1, 19, 12, 30)), MarketStatus::Closed);
        assert_eq!(hkex.get_status(hk(1, 19, 13, 0)), MarketStatus::Open);
    }

    #[test]
    fn test_hkex_weekend_and_holiday() {
        let hkex = SessionMarket::hkex().unwrap();
        // Saturday
        assert_eq!(hkex.get_status(hk(1, 17, 10, 0)), MarketStatus::Closed);
        // Lunar New Year, Tuesday
        assert_eq!(hkex.get_status(hk(2, 17, 10, 0)), MarketStatus::Closed);
        // Easter Monday
        assert_eq!(hkex.get_status(hk(4, 6, 14, 0)), MarketStatus::Closed);
        assert_eq!(hkex.get_status(hk(4, 7, 14, 0)), MarketStatus::Open);
    }

    #[test]
    fn test_hkex_holiday_uses_local_date() {
        let hkex = SessionMarket::hkex().unwrap();
        // 2025-12-31 20:00 UTC is already Jan 1 in Hong Kong
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap();
        let local = hkex.zone().to_local(&instant);
        assert!(hkex.holidays().is_holiday(&local));
    }

    #[test]
    fn test_china_sessions() {
        let china = SessionMarket::china_a_share().unwrap();
        assert_eq!(china.name(), "China A-Share");
        assert_eq!(china.get_status(cn(1, 19, 10, 0)), MarketStatus::Open);
        assert_eq!(china.get_status(cn(1, 19, 11, 30)), MarketStatus::Closed);
        assert_eq!(china.get_status(cn(1, 19, 12, 0)), MarketStatus::Closed);
        assert_eq!(china.get_status(cn(1, 19, 14, 0)), MarketStatus::Open);
        assert_eq!(china.get_status(cn(1, 19, 15, 0)), MarketStatus::Closed);
    }

    #[test]
    fn test_china_holidays() {
        let china = SessionMarket::china_a_share().unwrap();
        // National Day week ends on Thursday Oct 8
        assert_eq!(china.get_status(cn(10, 8, 10, 0)), MarketStatus::Closed);
        assert_eq!(china.get_status(cn(10, 9, 10, 0)), MarketStatus::Open);
        // Spring Festival
        assert_eq!(china.get_status(cn(2, 16, 10, 0)), MarketStatus::Closed);
    }

    #[test]
    fn test_first_matching_session_wins() {
        let market = SessionMarket::new(
            "Test",
            MarketZone::resolve("UTC").unwrap(),
            vec![
                (SessionWindow::from_hm((8, 0), (9, 0)).unwrap(), MarketStatus::Premarket),
                (SessionWindow::from_hm((8, 30), (17, 0)).unwrap(), MarketStatus::Open),
            ],
            Box::new(StaticHolidays::default()),
        );
        let at = |hour, minute| Utc.with_ymd_and_hms(2026, 1, 20, hour, minute, 0).unwrap();
        assert_eq!(market.get_status(at(8, 45)), MarketStatus::Premarket);
        assert_eq!(market.get_status(at(9, 0)), MarketStatus::Open);
        assert_eq!(market.get_status(at(17, 0)), MarketStatus::Closed);
    }

    #[test]
    fn test_is_open_matches_status() {
        let hkex = SessionMarket::hkex().unwrap();
        let start = hk(1, 16, 0, 0);
        for step in 0..(7 * 24 * 4) {
            let instant = start + chrono::Duration::minutes(15 * step);
            assert_eq!(hkex.is_open(instant), hkex.get_status(instant) == MarketStatus::Open);
        }
    }
}
