pub mod calendar;
pub mod session;
pub mod holidays;
pub mod zone;

pub use calendar::{easter_sunday, good_friday, is_weekend, last_weekday_of_month, nth_weekday_of_month};
pub use holidays::{us_market_rules, DynamicHolidays, HolidayDef, HolidayProvider, HolidayRule, StaticHolidays};
pub use session::SessionWindow;
pub use zone::MarketZone;
