//! Error types shared by the analytics engine and its collaborators

use chrono::{DateTime, Utc};
use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum AnalyticsError {
  #[error("Invalid range: start {start} must be before end {end}")]
  InvalidRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  },

  #[error("Invalid window: {name} must be positive, got {value}")]
  InvalidWindow { name: &'static str, value: i64 },

  #[error("Invalid window: {name} of {value} is too large to represent")]
  WindowTooLarge { name: &'static str, value: i64 },

  #[error("Invalid threshold: must be a finite, non-negative number, got {0}")]
  InvalidThreshold(f64),

  #[error("Data integrity error in exercise log {log_id}: {message}")]
  DataIntegrity { log_id: i64, message: String },

  #[error("Invalid limit: {0:?}")]
  InvalidLimit(String),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration error: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),
}

impl AnalyticsError {
  pub fn integrity(log_id: i64, message: impl Into<String>) -> Self {
    AnalyticsError::DataIntegrity {
      log_id,
      message: message.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
