//! Training volume of a single exercise log: Σ reps × weight per set

use serde_json::Value;

use crate::error::{AnalyticsError, Result};
use crate::models::{ExerciseLog, TrainingSession};

/// Coerce one stored set entry. `Ok(None)` means the entry is null.
fn coerce(log_id: i64, field: &str, index: usize, value: &Value) -> Result<Option<f64>> {
  let number = match value {
    Value::Null => return Ok(None),
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };

  match number {
    Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n)),
    Some(n) if n.is_finite() => Err(AnalyticsError::integrity(
      log_id,
      format!("{}[{}] is negative ({})", field, index, n),
    )),
    _ => Err(AnalyticsError::integrity(
      log_id,
      format!("{}[{}] is not numeric: {}", field, index, value),
    )),
  }
}

/// Coerced `(reps, weight)` pairs, one per rep entry.
///
/// Missing or null weights count as zero; weights past the last rep entry are ignored.
pub fn set_pairs(log: &ExerciseLog) -> Result<Vec<(f64, f64)>> {
  let weights = log.weights_per_set.as_deref().unwrap_or(&[]);

  log
    .reps_per_set
    .iter()
    .enumerate()
    .map(|(i, rep)| {
      let reps = coerce(log.id, "reps_per_set", i, rep)?
        .ok_or_else(|| AnalyticsError::integrity(log.id, format!("reps_per_set[{}] is null", i)))?;
      let weight = match weights.get(i) {
        Some(w) => coerce(log.id, "weights_per_set", i, w)?.unwrap_or(0.0),
        None => 0.0,
      };
      Ok((reps, weight))
    })
    .collect()
}

pub fn log_volume(log: &ExerciseLog) -> Result<f64> {
  Ok(set_pairs(log)?.iter().map(|(reps, weight)| reps * weight).sum())
}

pub fn session_volume(session: &TrainingSession) -> Result<f64> {
  session
    .logs
    .iter()
    .map(log_volume)
    .sum::<Result<f64>>()
}
