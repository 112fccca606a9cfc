/// Centralized error types for market hour checks
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    // Registry Errors
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    // Time Zone Errors
    #[error("Time zone resolution failed: {0}")]
    ZoneResolution(String),

    // Schedule Errors
    #[error("Invalid session window: {0}")]
    InvalidSession(String),

    #[error("Invalid holiday data: {0}")]
    HolidayData(String),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // File I/O Errors
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, MarketError>;

impl MarketError {
    /// Zone lookups have a fixed-offset fallback; nothing else is retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MarketError::ZoneResolution(_))
    }

    /// Get error code for logging/monitoring
    pub fn error_code(&self) -> &str {
        match self {
            MarketError::UnknownMarket(_) => "MKT_001",
            MarketError::ZoneResolution(_) => "TZ_001",
            MarketError::InvalidSession(_) => "SCHED_001",
            MarketError::HolidayData(_) => "SCHED_002",
            MarketError::ConfigError(_) => "CFG_001",
            MarketError::FileError(_) => "FILE_001",
            MarketError::CsvError(_) => "FILE_002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(MarketError::UnknownMarket("LSE".to_string()).error_code(), "MKT_001");
        assert_eq!(MarketError::ZoneResolution("Mars/Base".to_string()).error_code(), "TZ_001");
    }

    #[test]
    fn test_only_zone_errors_are_recoverable() {
        assert!(MarketError::ZoneResolution("Mars/Base".to_string()).is_recoverable());
        assert!(!MarketError::UnknownMarket("LSE".to_string()).is_recoverable());
        assert!(!MarketError::ConfigError("bad".to_string()).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = MarketError::UnknownMarket("LSE".to_string());
        assert_eq!(err.to_string(), "Unknown market: LSE");
    }
}
