//! Top sessions by total volume

use chrono::NaiveDate;
use serde::Serialize;
use std::str::FromStr;

use super::volume::session_volume;
use crate::error::{AnalyticsError, Result};
use crate::models::TrainingSession;

pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Number of sessions to return from [`top_sessions`]; always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLimit(usize);

impl Default for TopLimit {
  fn default() -> Self {
    TopLimit(DEFAULT_TOP_LIMIT)
  }
}

impl TopLimit {
  pub fn new(limit: usize) -> Result<Self> {
    if limit == 0 {
      return Err(AnalyticsError::InvalidLimit(limit.to_string()));
    }
    Ok(TopLimit(limit))
  }

  /// Lenient parse of a caller-supplied limit.
  ///
  /// Absent, non-numeric or non-positive values fall back to the default of 5
  /// instead of failing the request.
  pub fn from_param(raw: Option<&str>) -> Self {
    match raw.map(str::parse::<TopLimit>) {
      Some(Ok(limit)) => limit,
      Some(Err(e)) => {
        tracing::debug!(error = %e, "falling back to default top limit");
        TopLimit::default()
      }
      None => TopLimit::default(),
    }
  }

  pub fn get(self) -> usize {
    self.0
  }
}

impl FromStr for TopLimit {
  type Err = AnalyticsError;
  fn from_str(s: &str) -> Result<Self> {
    let limit = s
      .trim()
      .parse::<usize>()
      .map_err(|_| AnalyticsError::InvalidLimit(s.to_string()))?;
    TopLimit::new(limit)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSessionRow {
  pub id: i64,
  pub date: NaiveDate,
  pub name: String,
  pub total_volume: f64,
  pub exercise_count: usize,
}

/// The `limit` sessions with the greatest total volume, heaviest first.
/// Equal volumes are ordered by session id ascending.
pub fn top_sessions(sessions: &[TrainingSession], limit: TopLimit) -> Result<Vec<TopSessionRow>> {
  let mut rows = sessions
    .iter()
    .map(|s| {
      Ok(TopSessionRow {
        id: s.id,
        date: s.date,
        name: s.name.clone(),
        total_volume: session_volume(s)?,
        exercise_count: s.logs.len(),
      })
    })
    .collect::<Result<Vec<_>>>()?;

  rows.sort_by(|a, b| {
    b.total_volume
      .total_cmp(&a.total_volume)
      .then_with(|| a.id.cmp(&b.id))
  });
  rows.truncate(limit.get());

  Ok(rows)
}
