use crate::analysis::{self, ExerciseDefaults, ExerciseHistory};
use crate::commands::AppState;
use crate::error::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Heaviest and most recent set per exercise id
pub async fn get_exercise_history(state: &AppState, owner_id: i64) -> Result<BTreeMap<i64, ExerciseHistory>> {
  tracing::info!("Exercise history requested by owner {}", owner_id);

  let sessions = state.source.fetch_sessions(owner_id, None, None).await?;
  analysis::exercise_history(&sessions)
}

/// Suggested reps and weight for the next set of `exercise_id`
pub async fn get_exercise_defaults(state: &AppState, owner_id: i64, exercise_id: i64) -> Result<ExerciseDefaults> {
  tracing::info!("Exercise defaults for {} requested by owner {}", exercise_id, owner_id);

  let history = get_exercise_history(state, owner_id).await?;
  Ok(analysis::exercise_defaults(&history, exercise_id))
}

pub async fn get_exercise_recency(state: &AppState, owner_id: i64) -> Result<BTreeMap<i64, NaiveDate>> {
  tracing::info!("Exercise recency requested by owner {}", owner_id);

  let sessions = state.source.fetch_sessions(owner_id, None, None).await?;
  Ok(analysis::last_completed(&sessions))
}
