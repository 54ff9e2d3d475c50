//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown and seed helpers
//! - Mock session factories
//! - Date helpers
//! - Helper assertions

use crate::analysis::DateWindow;
use crate::models::{Exercise, ExerciseLog, MuscleGroup, TrainingSession};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert a catalogue exercise, returning its id
pub async fn seed_test_exercise(pool: &SqlitePool, name: &str, muscle_group: Option<&str>) -> i64 {
  sqlx::query("INSERT INTO exercises (name, muscle_group) VALUES (?1, ?2)")
    .bind(name)
    .bind(muscle_group)
    .execute(pool)
    .await
    .expect("Failed to insert test exercise")
    .last_insert_rowid()
}

/// Insert a user-defined exercise owned by `owner_id`, returning its id
pub async fn seed_test_custom_exercise(
  pool: &SqlitePool,
  name: &str,
  muscle_group: Option<&str>,
  owner_id: i64,
) -> i64 {
  sqlx::query("INSERT INTO exercises (name, muscle_group, is_custom, owner_id) VALUES (?1, ?2, 1, ?3)")
    .bind(name)
    .bind(muscle_group)
    .bind(owner_id)
    .execute(pool)
    .await
    .expect("Failed to insert test custom exercise")
    .last_insert_rowid()
}

/// Insert a workout, returning its id
pub async fn seed_test_workout(pool: &SqlitePool, owner_id: i64, date: NaiveDate, name: &str) -> i64 {
  sqlx::query("INSERT INTO workouts (owner_id, date, name) VALUES (?1, ?2, ?3)")
    .bind(owner_id)
    .bind(date)
    .bind(name)
    .execute(pool)
    .await
    .expect("Failed to insert test workout")
    .last_insert_rowid()
}

/// Insert a performed exercise with raw JSON set columns, returning its id
pub async fn seed_test_performed_exercise(
  pool: &SqlitePool,
  workout_id: i64,
  exercise_id: i64,
  reps_json: &str,
  weights_json: Option<&str>,
) -> i64 {
  let sets = serde_json::from_str::<Vec<serde_json::Value>>(reps_json)
    .map(|v| v.len() as i64)
    .unwrap_or(0);

  sqlx::query(
    r#"
    INSERT INTO performed_exercises (workout_id, exercise_id, sets, reps_per_set, weights_per_set)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(workout_id)
  .bind(exercise_id)
  .bind(sets)
  .bind(reps_json)
  .bind(weights_json)
  .execute(pool)
  .await
  .expect("Failed to insert test performed exercise")
  .last_insert_rowid()
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_exercise(id: i64, group: MuscleGroup) -> Exercise {
  Exercise::new(id, format!("{} exercise {}", group, id), group)
}

/// Session for owner 1 with one single-set log per `(group, volume)` entry.
///
/// Each log is one rep at `volume` weight, so its volume is exactly `volume`.
/// Log ids are `id * 100 + position`; exercises are one per group.
pub fn mock_session(id: i64, date: NaiveDate, logs: &[(MuscleGroup, f64)]) -> TrainingSession {
  logs
    .iter()
    .enumerate()
    .fold(TrainingSession::new(id, 1, date), |session, (i, (group, volume))| {
      let exercise_id = MuscleGroup::ALL.iter().position(|g| g == group).unwrap_or(0) as i64 + 1;
      session.with_log(ExerciseLog::from_numbers(
        id * 100 + i as i64,
        id,
        mock_exercise(exercise_id, *group),
        &[1],
        Some(vec![*volume]),
      ))
    })
}

/// Single chest log session with the given total volume
pub fn mock_session_with_volume(id: i64, date: NaiveDate, volume: f64) -> TrainingSession {
  mock_session(id, date, &[(MuscleGroup::Chest, volume)])
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Window from midnight UTC of `start` to midnight UTC of `end`
pub fn window_between(start: NaiveDate, end: NaiveDate) -> DateWindow {
  DateWindow::new(
    start.and_time(NaiveTime::MIN).and_utc(),
    end.and_time(NaiveTime::MIN).and_utc(),
  )
  .expect("valid test window")
}

/// Calendar date N days before today (UTC)
pub fn date_days_ago(days: i64) -> NaiveDate {
  (Utc::now() - Duration::days(days)).date_naive()
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::analysis::session_volume;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('exercises', 'workouts', 'performed_exercises')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 3, "Expected 3 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_helpers_insert_rows() {
    let pool = setup_test_db().await;

    let exercise = seed_test_exercise(&pool, "Deadlift", Some("back")).await;
    let workout = seed_test_workout(&pool, 1, date(2024, 3, 4), "Pull").await;
    seed_test_performed_exercise(&pool, workout, exercise, "[5, 5]", Some("[225, 225]")).await;

    let sets: i64 = sqlx::query_scalar("SELECT sets FROM performed_exercises")
      .fetch_one(&pool)
      .await
      .expect("Failed to read sets");
    assert_eq!(sets, 2);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_session_volumes_are_exact() {
    let session = mock_session(
      7,
      date(2024, 3, 4),
      &[(MuscleGroup::Chest, 1250.5), (MuscleGroup::Core, 40.0)],
    );

    assert_eq!(session.logs.len(), 2);
    assert_eq!(session.logs[1].id, 701);
    assert_eq!(session.logs[1].muscle_group(), MuscleGroup::Core);
    assert_approx_eq!(session_volume(&session).unwrap(), 1290.5, 1e-9);
  }

  #[test]
  fn test_window_between_is_midnight_aligned() {
    let window = window_between(date(2024, 3, 1), date(2024, 3, 8));
    assert_eq!(window.start, utc(2024, 3, 1, 0));
    assert_eq!(window.end - window.start, Duration::days(7));
  }
}
