use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Exercise, MuscleGroup};

pub const DEFAULT_SESSION_NAME: &str = "Untitled Workout";

/// A logged training session with its exercise logs, as supplied by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSession {
  pub id: i64,
  pub owner_id: i64,
  pub date: NaiveDate,
  pub name: String,
  pub logs: Vec<ExerciseLog>,
}

impl TrainingSession {
  pub fn new(id: i64, owner_id: i64, date: NaiveDate) -> Self {
    Self {
      id,
      owner_id,
      date,
      name: DEFAULT_SESSION_NAME.to_string(),
      logs: Vec::new(),
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_log(mut self, log: ExerciseLog) -> Self {
    self.logs.push(log);
    self
  }

  /// The session date as an instant (midnight UTC), for comparison against window bounds
  pub fn starts_at(&self) -> DateTime<Utc> {
    self.date.and_time(NaiveTime::MIN).and_utc()
  }
}

/// One exercise performed within a session.
///
/// Per-set entries are kept as raw JSON values, the way the CRUD layer stores
/// them; the volume calculator coerces them to numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
  pub id: i64,
  pub session_id: i64,
  pub exercise: Exercise,
  pub sets: i64,
  pub reps_per_set: Vec<Value>,
  pub weights_per_set: Option<Vec<Value>>,
}

impl ExerciseLog {
  /// Build a log from already-numeric reps and weights
  pub fn from_numbers(
    id: i64,
    session_id: i64,
    exercise: Exercise,
    reps: &[u32],
    weights: Option<Vec<f64>>,
  ) -> Self {
    Self {
      id,
      session_id,
      exercise,
      sets: reps.len() as i64,
      reps_per_set: reps.iter().map(|r| Value::from(*r)).collect(),
      weights_per_set: weights.map(|ws| ws.into_iter().map(Value::from).collect()),
    }
  }

  pub fn muscle_group(&self) -> MuscleGroup {
    self.exercise.group()
  }
}
