//! Muscle-group balance: recent share of volume vs a longer baseline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::muscle::{group_totals, weekly_group_volume, WeeklyGroupRow};
use super::window::{round_to, DateWindow, DEFAULT_WEEKS};
use crate::error::{AnalyticsError, Result};
use crate::models::{GroupMap, TrainingSession};

pub const DEFAULT_CURRENT_WINDOW: i64 = 2;
pub const DEFAULT_THRESHOLD: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
  Ok,
  Overemphasized,
  Undertrained,
}

impl BalanceStatus {
  /// Compare a group's current share to its baseline share.
  ///
  /// Both bounds are strict, so a share sitting exactly on
  /// `baseline * (1 ± threshold)` is still `Ok`. Two zero shares are `Ok`.
  pub fn classify(current: f64, baseline: f64, threshold: f64) -> Self {
    if current > baseline * (1.0 + threshold) {
      BalanceStatus::Overemphasized
    } else if current < baseline * (1.0 - threshold) {
      BalanceStatus::Undertrained
    } else {
      BalanceStatus::Ok
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceParams {
  /// Baseline window length in weeks
  pub weeks: i64,
  /// Number of most recent weekly rows forming the current window
  pub current_window: i64,
  pub threshold: f64,
}

impl Default for BalanceParams {
  fn default() -> Self {
    Self {
      weeks: DEFAULT_WEEKS,
      current_window: DEFAULT_CURRENT_WINDOW,
      threshold: DEFAULT_THRESHOLD,
    }
  }
}

impl BalanceParams {
  pub fn validate(&self) -> Result<()> {
    if self.weeks <= 0 {
      return Err(AnalyticsError::InvalidWindow {
        name: "weeks",
        value: self.weeks,
      });
    }
    if self.current_window <= 0 {
      return Err(AnalyticsError::InvalidWindow {
        name: "current_window",
        value: self.current_window,
      });
    }
    if !self.threshold.is_finite() || self.threshold < 0.0 {
      return Err(AnalyticsError::InvalidThreshold(self.threshold));
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResult {
  pub baseline_share: GroupMap<f64>,
  pub current_share: GroupMap<f64>,
  pub status: GroupMap<BalanceStatus>,
}

/// Score balance from weekly rows already restricted to the baseline window.
///
/// The current window is the last `current_window` rows (all rows when fewer
/// exist). With no rows every share is zero and every group is `Ok`.
pub fn score_rows(rows: &[WeeklyGroupRow], params: &BalanceParams) -> Result<BalanceResult> {
  params.validate()?;

  let take = (params.current_window as usize).min(rows.len());
  let recent = &rows[rows.len() - take..];

  let baseline = group_totals(rows).shares();
  let current = group_totals(recent).shares();

  let status = current.map(|g, share| BalanceStatus::classify(*share, baseline[g], params.threshold));

  Ok(BalanceResult {
    baseline_share: baseline.map(|_, v| round_to(*v, 4)),
    current_share: current.map(|_, v| round_to(*v, 4)),
    status,
  })
}

/// Balance over the `params.weeks` weeks ending at `now`
pub fn score_balance(
  sessions: &[TrainingSession],
  params: &BalanceParams,
  now: DateTime<Utc>,
) -> Result<BalanceResult> {
  params.validate()?;
  let window = DateWindow::resolve_weeks(None, None, now, params.weeks)?;
  let rows = weekly_group_volume(sessions, &window)?;
  score_rows(&rows, params)
}
