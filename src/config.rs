use std::env;
use std::str::FromStr;

use crate::analysis::balance::{BalanceParams, DEFAULT_CURRENT_WINDOW, DEFAULT_THRESHOLD};
use crate::analysis::ranking::DEFAULT_TOP_LIMIT;
use crate::analysis::window::{DEFAULT_LOOKBACK_DAYS, DEFAULT_WEEKS};
use crate::error::{AnalyticsError, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://training.db?mode=rwc";

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
  pub database_url: String,
  pub baseline_weeks: i64,
  pub current_window: i64,
  pub balance_threshold: f64,
  pub top_limit: usize,
  pub lookback_days: i64,
}

impl Default for AnalyticsConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      baseline_weeks: DEFAULT_WEEKS,
      current_window: DEFAULT_CURRENT_WINDOW,
      balance_threshold: DEFAULT_THRESHOLD,
      top_limit: DEFAULT_TOP_LIMIT,
      lookback_days: DEFAULT_LOOKBACK_DAYS,
    }
  }
}

/// Parse `key` if set. Unset or empty values yield `default`.
fn var_or<T>(key: &str, default: T) -> Result<T>
where
  T: FromStr + PartialOrd + Default,
{
  let raw = match env::var(key) {
    Ok(raw) if !raw.trim().is_empty() => raw,
    _ => return Ok(default),
  };
  let value = raw
    .trim()
    .parse::<T>()
    .map_err(|_| AnalyticsError::Config(format!("{} is not a valid number: {:?}", key, raw)))?;
  if value <= T::default() {
    return Err(AnalyticsError::Config(format!("{} must be positive, got {:?}", key, raw)));
  }
  Ok(value)
}

impl AnalyticsConfig {
  pub fn from_env() -> Result<Self> {
    let defaults = Self::default();
    Ok(Self {
      database_url: env::var("TRAINING_DATABASE_URL").unwrap_or(defaults.database_url),
      baseline_weeks: var_or("ANALYTICS_BASELINE_WEEKS", defaults.baseline_weeks)?,
      current_window: var_or("ANALYTICS_CURRENT_WINDOW", defaults.current_window)?,
      balance_threshold: var_or("ANALYTICS_BALANCE_THRESHOLD", defaults.balance_threshold)?,
      top_limit: var_or("ANALYTICS_TOP_LIMIT", defaults.top_limit)?,
      lookback_days: var_or("ANALYTICS_LOOKBACK_DAYS", defaults.lookback_days)?,
    })
  }

  pub fn balance_params(&self) -> BalanceParams {
    BalanceParams {
      weeks: self.baseline_weeks,
      current_window: self.current_window,
      threshold: self.balance_threshold,
    }
  }
}
