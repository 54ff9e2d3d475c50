//! Per-exercise performance history and logging defaults

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::volume::set_pairs;
use crate::error::Result;
use crate::models::TrainingSession;

pub const DEFAULT_REPS: f64 = 10.0;
pub const DEFAULT_WEIGHT: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseHistory {
  /// Heaviest weight ever lifted and the reps done at it
  pub max_weight: f64,
  pub max_reps: f64,
  /// Final set of the most recent log
  pub last_weight: f64,
  pub last_reps: f64,
}

/// Suggested values when logging a new set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseDefaults {
  pub reps: f64,
  pub weight: f64,
}

impl Default for ExerciseDefaults {
  fn default() -> Self {
    Self {
      reps: DEFAULT_REPS,
      weight: DEFAULT_WEIGHT,
    }
  }
}

fn chronological(sessions: &[TrainingSession]) -> Vec<&TrainingSession> {
  let mut ordered: Vec<&TrainingSession> = sessions.iter().collect();
  ordered.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
  ordered
}

/// History keyed by exercise id
pub fn exercise_history(sessions: &[TrainingSession]) -> Result<BTreeMap<i64, ExerciseHistory>> {
  let mut history: BTreeMap<i64, ExerciseHistory> = BTreeMap::new();

  for session in chronological(sessions) {
    for log in &session.logs {
      let pairs = set_pairs(log)?;
      let Some(&(last_reps, last_weight)) = pairs.last() else {
        continue;
      };

      // Heaviest set in this log; first one wins on ties
      let mut heaviest = pairs[0];
      for pair in &pairs[1..] {
        if pair.1 > heaviest.1 {
          heaviest = *pair;
        }
      }
      let (top_reps, top_weight) = heaviest;

      // Every entry starts from zero, so a weight-free log never sets max_reps
      let entry = history.entry(log.exercise.id).or_default();
      if top_weight > entry.max_weight {
        entry.max_weight = top_weight;
        entry.max_reps = top_reps;
      }
      entry.last_weight = last_weight;
      entry.last_reps = last_reps;
    }
  }

  tracing::debug!(exercises = history.len(), "computed exercise history");
  Ok(history)
}

pub fn exercise_defaults(history: &BTreeMap<i64, ExerciseHistory>, exercise_id: i64) -> ExerciseDefaults {
  history
    .get(&exercise_id)
    .map(|h| ExerciseDefaults {
      reps: h.max_reps,
      weight: h.max_weight,
    })
    .unwrap_or_default()
}

/// Latest session date per exercise id
pub fn last_completed(sessions: &[TrainingSession]) -> BTreeMap<i64, NaiveDate> {
  let mut latest: BTreeMap<i64, NaiveDate> = BTreeMap::new();
  for session in sessions {
    for log in &session.logs {
      latest
        .entry(log.exercise.id)
        .and_modify(|d| *d = (*d).max(session.date))
        .or_insert(session.date);
    }
  }
  latest
}
