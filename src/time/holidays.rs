/// Market holiday calendars: static date tables and rule-based calendars
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{MarketError, Result};
use crate::time::calendar::{easter_sunday_date, last_weekday_of_month, nth_weekday_of_month};
use crate::time::zone::MarketZone;

const HKEX_TABLE: &str = include_str!("../../data/holidays/hkex.csv");
const CHINA_A_SHARE_TABLE: &str = include_str!("../../data/holidays/china_a_share.csv");

/// Answers whether a local date is a market holiday.
///
/// Membership is decided on the civil date only; time of day never matters.
pub trait HolidayProvider: Send + Sync {
    /// Name of the holiday falling on `local`'s date, if any
    fn holiday_name(&self, local: &DateTime<FixedOffset>) -> Option<&str>;

    fn is_holiday(&self, local: &DateTime<FixedOffset>) -> bool {
        self.holiday_name(local).is_some()
    }

    /// Holidays dated in `year`, sorted by date
    fn holidays_in_year(&self, year: i32) -> Vec<(NaiveDate, String)>;
}

/// Rule describing when a recurring holiday falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum HolidayRule {
    /// Fixed date; Saturday is observed on Friday, Sunday on Monday
    FixedDateObserved { month: u32, day: u32 },
    /// `n`-th weekday of the month (1-based)
    NthWeekday { month: u32, weekday: Weekday, n: u32 },
    LastWeekday { month: u32, weekday: Weekday },
    /// Days relative to Easter Sunday (Good Friday is -2)
    MovingFeast { offset_days: i64 },
}

impl HolidayRule {
    /// Whether `date` is this holiday (literal or observed) in its own year
    pub fn matches(&self, date: NaiveDate) -> bool {
        match *self {
            HolidayRule::FixedDateObserved { month, day } => {
                let Some(literal) = NaiveDate::from_ymd_opt(date.year(), month, day) else {
                    return false;
                };
                if date == literal {
                    return true;
                }
                match literal.weekday() {
                    Weekday::Sat => literal.pred_opt() == Some(date),
                    Weekday::Sun => literal.succ_opt() == Some(date),
                    _ => false,
                }
            }
            HolidayRule::NthWeekday { month, weekday, n } => {
                date.month() == month
                    && nth_weekday_of_month(date.year(), month, weekday, n) == Some(date.day())
            }
            HolidayRule::LastWeekday { month, weekday } => {
                date.month() == month
                    && last_weekday_of_month(date.year(), month, weekday) == Some(date.day())
            }
            HolidayRule::MovingFeast { .. } => self.observed_in_year(date.year()) == Some(date),
        }
    }

    /// Date the market closes for this holiday in `year`, if it falls in `year`
    pub fn observed_in_year(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            HolidayRule::FixedDateObserved { month, day } => {
                let literal = NaiveDate::from_ymd_opt(year, month, day)?;
                let observed = match literal.weekday() {
                    Weekday::Sat => literal.pred_opt(),
                    Weekday::Sun => literal.succ_opt(),
                    _ => Some(literal),
                };
                // Substitutes never cross into a neighbouring year
                observed.filter(|date| date.year() == year)
            }
            HolidayRule::NthWeekday { month, weekday, n } => {
                NaiveDate::from_ymd_opt(year, month, nth_weekday_of_month(year, month, weekday, n)?)
            }
            HolidayRule::LastWeekday { month, weekday } => {
                NaiveDate::from_ymd_opt(year, month, last_weekday_of_month(year, month, weekday)?)
            }
            HolidayRule::MovingFeast { offset_days } => {
                let easter = easter_sunday_date(year)?;
                if offset_days >= 0 {
                    easter.checked_add_days(Days::new(offset_days.unsigned_abs()))
                } else {
                    easter.checked_sub_days(Days::new(offset_days.unsigned_abs()))
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let month = match *self {
            HolidayRule::FixedDateObserved { month, day } => {
                // 2024 is a leap year, so Feb 29 is accepted
                if NaiveDate::from_ymd_opt(2024, month, day).is_none() {
                    return Err(MarketError::HolidayData(format!(
                        "{}-{} is not a calendar date",
                        month, day
                    )));
                }
                month
            }
            HolidayRule::NthWeekday { month, n, .. } => {
                if !(1..=5).contains(&n) {
                    return Err(MarketError::HolidayData(format!("ordinal {} is not in 1..=5", n)));
                }
                month
            }
            HolidayRule::LastWeekday { month, .. } => month,
            HolidayRule::MovingFeast { offset_days } => {
                if offset_days.abs() > 180 {
                    return Err(MarketError::HolidayData(format!(
                        "Easter offset {} is more than 180 days",
                        offset_days
                    )));
                }
                return Ok(());
            }
        };

        if !(1..=12).contains(&month) {
            return Err(MarketError::HolidayData(format!("month {} is not in 1..=12", month)));
        }
        Ok(())
    }

    /// Relative evaluation cost; Easter arithmetic is the most expensive
    fn cost(&self) -> u8 {
        match self {
            HolidayRule::FixedDateObserved { .. } => 0,
            HolidayRule::NthWeekday { .. } => 1,
            HolidayRule::LastWeekday { .. } => 2,
            HolidayRule::MovingFeast { .. } => 3,
        }
    }
}

/// A named holiday rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDef {
    pub name: String,
    #[serde(flatten)]
    pub rule: HolidayRule,
}

impl HolidayDef {
    pub fn new(name: &str, rule: HolidayRule) -> Self {
        HolidayDef {
            name: name.to_string(),
            rule,
        }
    }
}

/// US exchange holidays, in effect from 2022 onward
pub fn us_market_rules() -> Vec<HolidayDef> {
    use HolidayRule::*;

    vec![
        HolidayDef::new("New Year's Day", FixedDateObserved { month: 1, day: 1 }),
        HolidayDef::new("Martin Luther King Jr. Day", NthWeekday { month: 1, weekday: Weekday::Mon, n: 3 }),
        HolidayDef::new("Presidents Day", NthWeekday { month: 2, weekday: Weekday::Mon, n: 3 }),
        HolidayDef::new("Good Friday", MovingFeast { offset_days: -2 }),
        HolidayDef::new("Memorial Day", LastWeekday { month: 5, weekday: Weekday::Mon }),
        HolidayDef::new("Juneteenth", FixedDateObserved { month: 6, day: 19 }),
        HolidayDef::new("Independence Day", FixedDateObserved { month: 7, day: 4 }),
        HolidayDef::new("Labor Day", NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 }),
        HolidayDef::new("Thanksgiving", NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 }),
        HolidayDef::new("Christmas", FixedDateObserved { month: 12, day: 25 }),
    ]
}

/// Holidays from an explicit table of dates
#[derive(Debug, Clone, Default)]
pub struct StaticHolidays {
    dates: HashMap<NaiveDate, String>,
}

#[derive(Debug, Deserialize)]
struct HolidayRecord {
    date: NaiveDate,
    #[serde(default)]
    name: String,
}

impl StaticHolidays {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self::from_entries(dates.into_iter().map(|date| (date, String::new())))
    }

    pub fn from_entries<I: IntoIterator<Item = (NaiveDate, String)>>(entries: I) -> Self {
        let mut holidays = StaticHolidays::default();
        holidays.extend(entries);
        holidays
    }

    /// Each value is reduced to its calendar date in its own zone, so a
    /// midnight-local timestamp never slides to the neighbouring UTC day.
    pub fn from_local_dates<Tz, I>(dates: I) -> Self
    where
        Tz: TimeZone,
        I: IntoIterator<Item = DateTime<Tz>>,
    {
        Self::new(dates.into_iter().map(|dt| dt.date_naive()))
    }

    /// Load a `date,name` table with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut entries = Vec::new();
        for record in csv_reader.deserialize() {
            let record: HolidayRecord = record?;
            entries.push((record.date, record.name));
        }

        Ok(Self::from_entries(entries))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Hong Kong Exchange closures
    pub fn hkex() -> Result<Self> {
        Self::from_csv_reader(HKEX_TABLE.as_bytes())
    }

    /// Shanghai and Shenzhen exchange closures
    pub fn china_a_share() -> Result<Self> {
        Self::from_csv_reader(CHINA_A_SHARE_TABLE.as_bytes())
    }

    pub fn extend<I: IntoIterator<Item = (NaiveDate, String)>>(&mut self, entries: I) {
        for (date, name) in entries {
            let name = if name.is_empty() { "Holiday".to_string() } else { name };
            self.dates.insert(date, name);
        }
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.dates.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayProvider for StaticHolidays {
    fn holiday_name(&self, local: &DateTime<FixedOffset>) -> Option<&str> {
        self.dates.get(&local.date_naive()).map(String::as_str)
    }

    fn holidays_in_year(&self, year: i32) -> Vec<(NaiveDate, String)> {
        let mut holidays: Vec<(NaiveDate, String)> = self
            .dates
            .iter()
            .filter(|(date, _)| date.year() == year)
            .map(|(date, name)| (*date, name.clone()))
            .collect();
        holidays.sort();
        holidays
    }
}

/// Holidays computed from rules, evaluated in a fixed reference zone
#[derive(Debug, Clone)]
pub struct DynamicHolidays {
    zone: MarketZone,
    rules: Vec<HolidayDef>,
}

impl DynamicHolidays {
    pub fn new(zone: MarketZone, mut rules: Vec<HolidayDef>) -> Self {
        rules.sort_by_key(|def| def.rule.cost());
        DynamicHolidays { zone, rules }
    }

    /// Like `new`, rejecting malformed rules
    pub fn try_new(zone: MarketZone, rules: Vec<HolidayDef>) -> Result<Self> {
        for def in &rules {
            def.rule
                .validate()
                .map_err(|e| MarketError::HolidayData(format!("{}: {}", def.name, e)))?;
        }
        Ok(Self::new(zone, rules))
    }

    pub fn us_market(zone: MarketZone) -> Self {
        Self::new(zone, us_market_rules())
    }

    pub fn rules(&self) -> &[HolidayDef] {
        &self.rules
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&str> {
        self.rules
            .iter()
            .find(|def| def.rule.matches(date))
            .map(|def| def.name.as_str())
    }
}

impl HolidayProvider for DynamicHolidays {
    fn holiday_name(&self, local: &DateTime<FixedOffset>) -> Option<&str> {
        let date = self.zone.to_local(&local.with_timezone(&Utc)).date_naive();
        self.holiday_on(date)
    }

    fn holidays_in_year(&self, year: i32) -> Vec<(NaiveDate, String)> {
        let mut holidays: Vec<(NaiveDate, String)> = self
            .rules
            .iter()
            .filter_map(|def| def.rule.observed_in_year(year).map(|date| (date, def.name.clone())))
            .filter(|(date, _)| date.year() == year)
            .collect();
        holidays.sort();
        holidays
    }
}
