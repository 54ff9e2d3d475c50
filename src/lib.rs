pub mod analysis;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod source;

#[cfg(test)]
mod test_utils;

pub use commands::AppState;
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, Result};
pub use logging::init_logging;
pub use source::{InMemorySource, SessionSource};
