/// Civil calendar helpers: weekends, weekday ordinals and Easter
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Saturday or Sunday in the value's own calendar
pub fn is_weekend<D: Datelike>(date: &D) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Day of month of the `n`-th `weekday` in `month`, or `None` when the month
/// has fewer than `n` of them (only the 5th can be missing).
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<u32> {
    // No month holds a sixth occurrence
    if n == 0 || n > 5 {
        return None;
    }

    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    while date.weekday() != weekday {
        date = date.succ_opt()?;
    }

    let date = date.checked_add_days(Days::new(u64::from((n - 1) * 7)))?;
    if date.month() != month {
        return None;
    }

    Some(date.day())
}

/// Day of month of the last `weekday` in `month`
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    let mut date = first_of_next.pred_opt()?;
    while date.weekday() != weekday && date > first {
        date = date.pred_opt()?;
    }

    Some(date.day())
}

/// Easter Sunday as `(month, day)`, anonymous Gregorian algorithm.
/// Valid from 1583 onward.
pub fn easter_sunday(year: i32) -> (u32, u32) {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    (month as u32, day as u32)
}

pub fn easter_sunday_date(year: i32) -> Option<NaiveDate> {
    let (month, day) = easter_sunday(year);
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn good_friday(year: i32) -> Option<NaiveDate> {
    easter_sunday_date(year)?.checked_sub_days(Days::new(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easter_reference_years() {
        assert_eq!(easter_sunday(2024), (3, 31));
        assert_eq!(easter_sunday(2025), (4, 20));
        assert_eq!(easter_sunday(2026), (4, 5));
        assert_eq!(easter_sunday(2027), (3, 28));
        assert_eq!(easter_sunday(2038), (4, 25));
        assert_eq!(easter_sunday(1818), (3, 22));
    }

    #[test]
    fn test_good_friday() {
        assert_eq!(good_friday(2025), NaiveDate::from_ymd_opt(2025, 4, 18));
        assert_eq!(good_friday(2026), NaiveDate::from_ymd_opt(2026, 4, 3));
        // Easter on March 22 pulls Good Friday back to March 20
        assert_eq!(good_friday(1818), NaiveDate::from_ymd_opt(1818, 3, 20));
    }

    #[test]
    fn test_nth_weekday() {
        // MLK Day 2026
        assert_eq!(nth_weekday_of_month(2026, 1, Weekday::Mon, 3), Some(19));
        // Labor Day 2026
        assert_eq!(nth_weekday_of_month(2026, 9, Weekday::Mon, 1), Some(7));
        // Thanksgiving 2026
        assert_eq!(nth_weekday_of_month(2026, 11, Weekday::Thu, 4), Some(26));
    }

    #[test]
    fn test_nth_weekday_missing() {
        // February 2026 has exactly four Mondays
        assert_eq!(nth_weekday_of_month(2026, 2, Weekday::Mon, 4), Some(23));
        assert_eq!(nth_weekday_of_month(2026, 2, Weekday::Mon, 5), None);
        // January 2026 has five Thursdays
        assert_eq!(nth_weekday_of_month(2026, 1, Weekday::Thu, 5), Some(29));
        assert_eq!(nth_weekday_of_month(2026, 1, Weekday::Mon, 0), None);
        assert_eq!(nth_weekday_of_month(2026, 13, Weekday::Mon, 1), None);
    }

    #[test]
    fn test_nth_weekday_huge_ordinal() {
        assert_eq!(nth_weekday_of_month(2026, 1, Weekday::Mon, 6), None);
        assert_eq!(nth_weekday_of_month(2026, 1, Weekday::Mon, 700_000_000), None);
        assert_eq!(nth_weekday_of_month(2026, 1, Weekday::Mon, u32::MAX), None);
    }

    #[test]
    fn test_last_weekday() {
        // Memorial Day 2026
        assert_eq!(last_weekday_of_month(2026, 5, Weekday::Mon), Some(25));
        // Month ending on the target weekday
        assert_eq!(last_weekday_of_month(2026, 5, Weekday::Sun), Some(31));
        assert_eq!(last_weekday_of_month(2026, 12, Weekday::Thu), Some(31));
        assert_eq!(last_weekday_of_month(2024, 2, Weekday::Thu), Some(29));
        assert_eq!(last_weekday_of_month(2026, 0, Weekday::Mon), None);
    }

    #[test]
    fn test_weekend() {
        let sat = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
        let sun = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        let mon = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
        assert!(is_weekend(&sat));
        assert!(is_weekend(&sun));
        assert!(!is_weekend(&mon));
    }
}
