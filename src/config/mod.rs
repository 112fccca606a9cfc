pub mod loader;

pub use loader::{build_market, load_config, parse_config};
