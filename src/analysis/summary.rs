//! Combined muscle-group training summary

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::balance::{score_rows, BalanceParams, BalanceResult};
use super::muscle::{weekly_group_volume, WeeklyGroupRow};
use super::recency::{days_since_trained, RecencyMap};
use super::recent::{compare_current_week, CurrentVsLast};
use super::window::DateWindow;
use crate::error::Result;
use crate::models::TrainingSession;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSummary {
  pub weekly: Vec<WeeklyGroupRow>,
  pub current_vs_last: CurrentVsLast,
  pub balance: BalanceResult,
  pub recency_days: RecencyMap,
}

/// Weekly group rows, balance, this-vs-last-week and recency, all as of `now`.
///
/// The weekly rows and the balance baseline share one `params.weeks` window.
pub fn compose(sessions: &[TrainingSession], params: &BalanceParams, now: DateTime<Utc>) -> Result<TrainingSummary> {
  params.validate()?;

  let window = DateWindow::resolve_weeks(None, None, now, params.weeks)?;
  let weekly = weekly_group_volume(sessions, &window)?;
  let balance = score_rows(&weekly, params)?;
  let current_vs_last = compare_current_week(sessions, now)?;
  let recency_days = days_since_trained(sessions, now.date_naive());

  tracing::debug!(weeks = weekly.len(), "composed training summary");

  Ok(TrainingSummary {
    weekly,
    current_vs_last,
    balance,
    recency_days,
  })
}
