use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::collections::HashMap;

use crate::error::{AnalyticsError, Result};
use crate::models::{Exercise, ExerciseLog, MuscleGroup, TrainingSession};
use crate::source::SessionSource;

pub type DbPool = SqlitePool;

/// Open the connection pool and run migrations
pub async fn initialize_db(database_url: &str) -> Result<DbPool> {
  tracing::info!("Initializing database at: {}", database_url);

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}

/// ---------------------------------------------------------------------------
/// Session Source
/// ---------------------------------------------------------------------------

/// Reads workouts and their performed exercises straight from SQLite.
///
/// Bounds are applied at date granularity (`start`'s date through `end`'s
/// date inclusive), which is a superset of the half-open instant range.
pub struct SqliteSessionSource {
  pool: DbPool,
}

impl SqliteSessionSource {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

fn parse_entries(log_id: i64, column: &str, raw: &str) -> Result<Option<Vec<Value>>> {
  serde_json::from_str(raw)
    .map_err(|e| AnalyticsError::integrity(log_id, format!("{} is not a JSON array: {}", column, e)))
}

fn log_from_row(row: &SqliteRow) -> Result<ExerciseLog> {
  let id: i64 = row.try_get("id")?;
  let reps_raw: String = row.try_get("reps_per_set")?;
  let weights_raw: Option<String> = row.try_get("weights_per_set")?;
  let muscle_group: Option<String> = row.try_get("muscle_group")?;

  // A JSON `null` in the column means no weights were recorded
  let weights_per_set = match weights_raw {
    Some(raw) => parse_entries(id, "weights_per_set", &raw)?,
    None => None,
  };
  let reps_per_set = parse_entries(id, "reps_per_set", &reps_raw)?
    .ok_or_else(|| AnalyticsError::integrity(id, "reps_per_set is null"))?;

  Ok(ExerciseLog {
    id,
    session_id: row.try_get("workout_id")?,
    exercise: Exercise {
      id: row.try_get("exercise_id")?,
      name: row.try_get("exercise_name")?,
      muscle_group: muscle_group.map(|label| MuscleGroup::from_label(Some(&label))),
      is_custom: row.try_get("is_custom")?,
      owner_id: row.try_get("exercise_owner_id")?,
    },
    sets: row.try_get("sets")?,
    reps_per_set,
    weights_per_set,
  })
}

#[async_trait]
impl SessionSource for SqliteSessionSource {
  async fn fetch_sessions(
    &self,
    owner_id: i64,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
  ) -> Result<Vec<TrainingSession>> {
    let start_date: Option<NaiveDate> = start.map(|s| s.date_naive());
    let end_date: Option<NaiveDate> = end.map(|e| e.date_naive());

    let workout_rows = sqlx::query(
      r#"
      SELECT id, owner_id, date, name
      FROM workouts
      WHERE owner_id = ?1
        AND (?2 IS NULL OR date >= ?2)
        AND (?3 IS NULL OR date <= ?3)
      ORDER BY date, id
      "#,
    )
    .bind(owner_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(&self.pool)
    .await?;

    let mut sessions = Vec::with_capacity(workout_rows.len());
    let mut positions: HashMap<i64, usize> = HashMap::new();
    for row in workout_rows {
      let session = TrainingSession {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        date: row.try_get("date")?,
        name: row.try_get("name")?,
        logs: Vec::new(),
      };
      positions.insert(session.id, sessions.len());
      sessions.push(session);
    }

    let log_rows = sqlx::query(
      r#"
      SELECT
        pe.id, pe.workout_id, pe.sets, pe.reps_per_set, pe.weights_per_set,
        e.id AS exercise_id, e.name AS exercise_name, e.muscle_group,
        e.is_custom, e.owner_id AS exercise_owner_id
      FROM performed_exercises pe
      JOIN exercises e ON e.id = pe.exercise_id
      JOIN workouts w ON w.id = pe.workout_id
      WHERE w.owner_id = ?1
        AND (?2 IS NULL OR w.date >= ?2)
        AND (?3 IS NULL OR w.date <= ?3)
      ORDER BY pe.workout_id, pe.id
      "#,
    )
    .bind(owner_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(&self.pool)
    .await?;

    for row in &log_rows {
      let log = log_from_row(row)?;
      if let Some(&pos) = positions.get(&log.session_id) {
        if !log.exercise.visible_to(sessions[pos].owner_id) {
          return Err(AnalyticsError::integrity(
            log.id,
            format!("custom exercise {} belongs to another owner", log.exercise.id),
          ));
        }
        sessions[pos].logs.push(log);
      }
    }

    tracing::debug!(
      owner_id,
      sessions = sessions.len(),
      logs = log_rows.len(),
      "loaded sessions from sqlite"
    );

    Ok(sessions)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{
    date, seed_test_custom_exercise, seed_test_exercise, seed_test_performed_exercise, seed_test_workout,
    setup_test_db, teardown_test_db, utc,
  };

  #[tokio::test]
  async fn test_fetch_sessions_loads_logs_and_exercises() {
    // Arrange
    let pool = setup_test_db().await;
    let bench = seed_test_exercise(&pool, "Bench Press", Some("chest")).await;
    let mystery = seed_test_exercise(&pool, "Mystery Move", None).await;
    let curl = seed_test_exercise(&pool, "Curl", Some("Biceps")).await;
    let workout = seed_test_workout(&pool, 1, date(2024, 3, 4), "Push Day").await;
    seed_test_performed_exercise(&pool, workout, bench, "[10, 8, 8]", Some("[100, 100, \"90\"]")).await;
    seed_test_performed_exercise(&pool, workout, mystery, "[12]", None).await;
    seed_test_performed_exercise(&pool, workout, curl, "[10]", Some("null")).await;
    seed_test_workout(&pool, 2, date(2024, 3, 4), "Someone else").await;

    // Act
    let source = SqliteSessionSource::new(pool.clone());
    let sessions = source.fetch_sessions(1, None, None).await.unwrap();

    // Assert
    assert_eq!(sessions.len(), 1);
    let session = &sessions[0];
    assert_eq!(session.name, "Push Day");
    assert_eq!(session.date, date(2024, 3, 4));
    assert_eq!(session.logs.len(), 3);
    assert_eq!(session.logs[0].exercise.group(), MuscleGroup::Chest);
    assert_eq!(session.logs[1].exercise.group(), MuscleGroup::Core);
    assert!(session.logs[1].weights_per_set.is_none());
    assert_eq!(session.logs[2].exercise.group(), MuscleGroup::Arms);
    assert!(session.logs[2].weights_per_set.is_none());
    assert_eq!(crate::analysis::session_volume(session).unwrap(), 2620.0);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_fetch_sessions_respects_date_bounds() {
    let pool = setup_test_db().await;
    seed_test_workout(&pool, 1, date(2024, 2, 28), "Old").await;
    seed_test_workout(&pool, 1, date(2024, 3, 4), "Inside").await;
    seed_test_workout(&pool, 1, date(2024, 3, 20), "Later").await;

    let source = SqliteSessionSource::new(pool.clone());
    let sessions = source
      .fetch_sessions(1, Some(utc(2024, 3, 1, 0)), Some(utc(2024, 3, 10, 0)))
      .await
      .unwrap();

    let names: Vec<_> = sessions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Inside"]);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_unparsable_json_column_is_integrity_error() {
    let pool = setup_test_db().await;
    let squat = seed_test_exercise(&pool, "Squat", Some("legs")).await;
    let workout = seed_test_workout(&pool, 1, date(2024, 3, 4), "Legs").await;
    let log_id = seed_test_performed_exercise(&pool, workout, squat, "not json", None).await;

    let source = SqliteSessionSource::new(pool.clone());
    let err = source.fetch_sessions(1, None, None).await.unwrap_err();

    assert!(matches!(err, AnalyticsError::DataIntegrity { log_id: id, .. } if id == log_id));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_custom_exercises_follow_their_owner() {
    // Arrange
    let pool = setup_test_db().await;
    let own = seed_test_custom_exercise(&pool, "Landmine Press", Some("shoulders"), 1).await;
    let foreign = seed_test_custom_exercise(&pool, "Sled Push", Some("legs"), 2).await;
    let monday = seed_test_workout(&pool, 1, date(2024, 3, 4), "Mine").await;
    seed_test_performed_exercise(&pool, monday, own, "[8]", Some("[40]")).await;
    let source = SqliteSessionSource::new(pool.clone());

    // Act
    let sessions = source.fetch_sessions(1, None, None).await.unwrap();

    // Assert
    let exercise = &sessions[0].logs[0].exercise;
    assert!(exercise.is_custom);
    assert_eq!(exercise.owner_id, Some(1));
    assert_eq!(exercise.group(), MuscleGroup::Shoulders);

    // Arrange: a log that points at another owner's custom exercise
    let friday = seed_test_workout(&pool, 1, date(2024, 3, 8), "Borrowed").await;
    let log_id = seed_test_performed_exercise(&pool, friday, foreign, "[10]", Some("[90]")).await;

    // Act
    let err = source.fetch_sessions(1, None, None).await.unwrap_err();

    // Assert
    assert!(matches!(err, AnalyticsError::DataIntegrity { log_id: id, .. } if id == log_id));
    assert!(err.to_string().contains("another owner"));

    teardown_test_db(pool).await;
  }
}
