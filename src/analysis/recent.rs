//! This week vs last week, per muscle group

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;

use super::muscle::{group_totals, weekly_group_volume};
use super::window::{round_to, week_start, DateWindow};
use crate::error::Result;
use crate::models::{GroupMap, MuscleGroup, TrainingSession};

/// Reported when last week had no volume for a group and this week does
pub const NEW_VOLUME_DELTA_PCT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentVsLast {
  pub this: GroupMap<f64>,
  pub last: GroupMap<f64>,
  pub delta_pct: GroupMap<Option<f64>>,
  pub top_group: MuscleGroup,
  pub total_this: f64,
  pub total_last: f64,
}

pub fn delta_pct(this: f64, last: f64) -> Option<f64> {
  if last == 0.0 {
    if this == 0.0 {
      None
    } else {
      Some(NEW_VOLUME_DELTA_PCT)
    }
  } else {
    Some(round_to((this - last) / last * 100.0, 2))
  }
}

/// Group with the most volume; ties go to the earlier canonical group
pub fn top_group(volumes: &GroupMap<f64>) -> MuscleGroup {
  let mut best = MuscleGroup::ALL[0];
  for (group, volume) in volumes.iter() {
    if *volume > volumes[best] {
      best = group;
    }
  }
  best
}

fn window_totals(sessions: &[TrainingSession], start: DateTime<Utc>, end: DateTime<Utc>) -> Result<GroupMap<f64>> {
  // At exactly Monday 00:00 the current week is still empty
  if start >= end {
    return Ok(GroupMap::default());
  }
  let rows = weekly_group_volume(sessions, &DateWindow::new(start, end)?)?;
  Ok(group_totals(&rows))
}

/// Compare `[monday, now)` against the seven days before it
pub fn compare_current_week(sessions: &[TrainingSession], now: DateTime<Utc>) -> Result<CurrentVsLast> {
  let start_this = week_start(now.date_naive()).and_time(NaiveTime::MIN).and_utc();
  let start_last = start_this - Duration::days(7);

  let this = window_totals(sessions, start_this, now)?;
  let last = window_totals(sessions, start_last, start_this)?;

  Ok(CurrentVsLast {
    delta_pct: this.map(|g, v| delta_pct(*v, last[g])),
    top_group: top_group(&this),
    total_this: this.total(),
    total_last: last.total(),
    this,
    last,
  })
}
