//! ISO-week volume and frequency reports

use serde::Serialize;
use std::collections::BTreeMap;

use super::volume::session_volume;
use super::window::{iso_week_key, round_to, DateWindow};
use crate::error::Result;
use crate::models::TrainingSession;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyVolumeRow {
  pub week: String,
  pub avg_volume_per_workout: f64,
  pub total_volume: f64,
  pub workout_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyFrequencyRow {
  pub week: String,
  pub workout_count: u32,
}

#[derive(Default)]
struct WeekTotals {
  total_volume: f64,
  workout_count: u32,
}

/// Total and average session volume per ISO week, oldest week first.
///
/// Only weeks that contain at least one session produce a row, so the
/// average never divides by zero.
pub fn weekly_volume(sessions: &[TrainingSession], window: &DateWindow) -> Result<Vec<WeeklyVolumeRow>> {
  // "YYYY-Www" keys sort chronologically
  let mut weeks: BTreeMap<String, WeekTotals> = BTreeMap::new();

  for session in window.filter(sessions) {
    let volume = session_volume(session)?;
    let totals = weeks.entry(iso_week_key(session.date)).or_default();
    totals.total_volume += volume;
    totals.workout_count += 1;
  }

  tracing::debug!(weeks = weeks.len(), "computed weekly volume");

  Ok(
    weeks
      .into_iter()
      .map(|(week, totals)| WeeklyVolumeRow {
        week,
        avg_volume_per_workout: round_to(totals.total_volume / totals.workout_count as f64, 2),
        total_volume: round_to(totals.total_volume, 2),
        workout_count: totals.workout_count,
      })
      .collect(),
  )
}

/// Workout count per ISO week, oldest week first
pub fn weekly_frequency(sessions: &[TrainingSession], window: &DateWindow) -> Vec<WeeklyFrequencyRow> {
  let mut weeks: BTreeMap<String, u32> = BTreeMap::new();
  for session in window.filter(sessions) {
    *weeks.entry(iso_week_key(session.date)).or_default() += 1;
  }

  weeks
    .into_iter()
    .map(|(week, workout_count)| WeeklyFrequencyRow { week, workout_count })
    .collect()
}
