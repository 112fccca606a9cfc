pub mod types;
pub mod error;
pub mod time;
pub mod markets;
pub mod checker;
pub mod config;

pub use types::*;
pub use error::{MarketError, Result};
pub use checker::MarketChecker;
pub use markets::Market;
