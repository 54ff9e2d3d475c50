//! Muscle-group volume per Monday-aligned week
//!
//! Weeks here start on the Monday on or before the session date. This is not
//! the ISO-week keying used by the weekly volume report; the two disagree on
//! labels around year boundaries and must not be mixed.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::volume::log_volume;
use super::window::{week_start, DateWindow};
use crate::error::Result;
use crate::models::{GroupMap, TrainingSession};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGroupRow {
  pub week_start: NaiveDate,
  /// Volume per group; every canonical group is present
  pub groups: GroupMap<f64>,
  /// Distinct sessions that trained each group
  pub sessions: GroupMap<u32>,
  pub total: f64,
}

#[derive(Default)]
struct WeekCell {
  volumes: GroupMap<f64>,
  sessions: GroupMap<HashSet<i64>>,
}

/// Bucket every log in `window` by (week start, muscle group), oldest week first.
///
/// A session is counted once per group no matter how many logs of that group it holds.
pub fn weekly_group_volume(sessions: &[TrainingSession], window: &DateWindow) -> Result<Vec<WeeklyGroupRow>> {
  let mut weeks: BTreeMap<NaiveDate, WeekCell> = BTreeMap::new();

  for session in window.filter(sessions) {
    let week = week_start(session.date);
    for log in &session.logs {
      let volume = log_volume(log)?;
      let group = log.muscle_group();
      let cell = weeks.entry(week).or_default();
      cell.volumes[group] += volume;
      cell.sessions[group].insert(session.id);
    }
  }

  tracing::debug!(weeks = weeks.len(), "computed muscle-group weeks");

  Ok(
    weeks
      .into_iter()
      .map(|(week_start, cell)| WeeklyGroupRow {
        week_start,
        total: cell.volumes.total(),
        groups: cell.volumes,
        sessions: cell.sessions.map(|_, ids| ids.len() as u32),
      })
      .collect(),
  )
}

/// Per-group volume summed over `rows`
pub fn group_totals(rows: &[WeeklyGroupRow]) -> GroupMap<f64> {
  let mut totals = GroupMap::default();
  for row in rows {
    totals.add_assign(&row.groups);
  }
  totals
}
