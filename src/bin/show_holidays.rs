/// List a market's holidays for one year
///
/// Usage: show_holidays <MARKET_ID> [YEAR]
use chrono::{Datelike, Utc};
use markethours::{config::load_config, MarketChecker};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let market_id = args.next().unwrap_or_else(|| "NASDAQ".to_string());
    let year: i32 = match args.next() {
        Some(value) => value.parse()?,
        None => Utc::now().year(),
    };

    let checker = match std::env::var("CONFIG_PATH") {
        Ok(path) => MarketChecker::from_config(&load_config(path)?)?,
        Err(_) => MarketChecker::new()?,
    };
    let market = checker.get_market(&market_id)?;

    println!("{} holidays in {} ({})", market.name(), year, market.zone().name());
    println!("====================================");

    let holidays = market.holidays().holidays_in_year(year);
    if holidays.is_empty() {
        println!("   No holidays on record for {}", year);
        return Ok(());
    }

    for (date, name) in &holidays {
        println!("   {} {}  {}", date.format("%Y-%m-%d"), date.weekday(), name);
    }
    println!("\n   Total: {}", holidays.len());

    Ok(())
}
