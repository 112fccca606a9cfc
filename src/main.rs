/// Print the trading status of every registered market
///
/// Usage: markethours [RFC3339-instant] [--config <path>] [--json]
use chrono::{DateTime, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use markethours::{
    config::load_config,
    error::{MarketError, Result},
    MarketChecker,
};

fn main() -> Result<()> {
    let mut json = false;
    let mut instant: Option<DateTime<Utc>> = None;
    let mut config_path = std::env::var("CONFIG_PATH").ok();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                config_path = Some(args.next().ok_or_else(|| {
                    MarketError::ConfigError("--config needs a path".to_string())
                })?);
            }
            other => instant = Some(parse_instant(other)?),
        }
    }

    // The log level comes from the config, so the subscriber starts after loading it
    let config = config_path.as_deref().map(load_config).transpose()?;
    let log_level = config.as_ref().map(|c| c.log_level.as_str()).unwrap_or("info");
    init_logging(log_level);

    if let (Some(path), Some(config)) = (&config_path, &config) {
        info!("Loaded {} custom market(s) from {}", config.markets.len(), path);
    }

    let checker = match &config {
        Some(config) => MarketChecker::from_config(config)?,
        None => MarketChecker::new()?,
    };

    let instant = instant.unwrap_or_else(Utc::now);
    info!("Checking {} market(s) at {}", checker.market_ids().len(), instant.to_rfc3339());

    if !json {
        println!("Market status at {}", instant.to_rfc3339());
        println!("=========================================");
    }

    for id in checker.market_ids() {
        let report = checker.report(&id, instant)?;
        if json {
            let line = serde_json::to_string(&report)
                .map_err(|e| MarketError::ConfigError(format!("Failed to encode report: {}", e)))?;
            println!("{}", line);
        } else {
            println!(
                "   {:<14} {:<11} open={:<5} local {}",
                report.market,
                report.status.as_str(),
                report.is_open,
                report.local_time.format("%a %Y-%m-%d %H:%M %:z")
            );
        }
    }

    Ok(())
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MarketError::ConfigError(format!("Invalid instant '{}': {}", value, e)))
}

/// `LOG_FORMAT=json` switches to structured log lines
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("markethours={}", level)));

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
