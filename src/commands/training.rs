use crate::analysis::{
  self, BalanceParams, BalanceResult, CurrentVsLast, DateWindow, RecencyMap, TopLimit, TopSessionRow, TrainingSummary,
  WeeklyFrequencyRow, WeeklyGroupRow, WeeklyVolumeRow,
};
use crate::commands::AppState;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};

/// ---------------------------------------------------------------------------
/// Weekly Volume & Frequency
/// ---------------------------------------------------------------------------

fn lookback_window(
  state: &AppState,
  start: Option<DateTime<Utc>>,
  end: Option<DateTime<Utc>>,
) -> Result<DateWindow> {
  DateWindow::resolve(start, end, Utc::now(), Duration::days(state.config.lookback_days))
}

pub async fn get_weekly_volume(
  state: &AppState,
  owner_id: i64,
  start: Option<DateTime<Utc>>,
  end: Option<DateTime<Utc>>,
) -> Result<Vec<WeeklyVolumeRow>> {
  tracing::info!("Weekly volume requested by owner {}", owner_id);

  let window = lookback_window(state, start, end)?;
  let sessions = state
    .source
    .fetch_sessions(owner_id, Some(window.start), Some(window.end))
    .await?;

  analysis::weekly_volume(&sessions, &window)
}

pub async fn get_weekly_frequency(
  state: &AppState,
  owner_id: i64,
  start: Option<DateTime<Utc>>,
  end: Option<DateTime<Utc>>,
) -> Result<Vec<WeeklyFrequencyRow>> {
  tracing::info!("Weekly frequency requested by owner {}", owner_id);

  let window = lookback_window(state, start, end)?;
  let sessions = state
    .source
    .fetch_sessions(owner_id, Some(window.start), Some(window.end))
    .await?;

  Ok(analysis::weekly_frequency(&sessions, &window))
}

/// ---------------------------------------------------------------------------
/// Top Workouts
/// ---------------------------------------------------------------------------

/// `limit` is the raw caller parameter; malformed values fall back to 5
pub async fn get_top_workouts(state: &AppState, owner_id: i64, limit: Option<&str>) -> Result<Vec<TopSessionRow>> {
  tracing::info!("Top workouts requested by owner {}", owner_id);

  let limit = match limit {
    Some(raw) => TopLimit::from_param(Some(raw)),
    None => TopLimit::new(state.config.top_limit).unwrap_or_default(),
  };
  let sessions = state.source.fetch_sessions(owner_id, None, None).await?;

  analysis::top_sessions(&sessions, limit)
}

/// ---------------------------------------------------------------------------
/// Muscle Groups
/// ---------------------------------------------------------------------------

pub async fn get_muscle_group_weekly(
  state: &AppState,
  owner_id: i64,
  start: Option<DateTime<Utc>>,
  end: Option<DateTime<Utc>>,
  weeks: Option<i64>,
) -> Result<Vec<WeeklyGroupRow>> {
  tracing::info!("Muscle group weekly volume requested by owner {}", owner_id);

  let weeks = weeks.unwrap_or(state.config.baseline_weeks);
  let window = DateWindow::resolve_weeks(start, end, Utc::now(), weeks)?;
  let sessions = state
    .source
    .fetch_sessions(owner_id, Some(window.start), Some(window.end))
    .await?;

  analysis::weekly_group_volume(&sessions, &window)
}

pub async fn get_muscle_balance(state: &AppState, owner_id: i64, params: &BalanceParams) -> Result<BalanceResult> {
  tracing::info!("Muscle balance requested by owner {}", owner_id);

  params.validate()?;
  let now = Utc::now();
  let window = DateWindow::resolve_weeks(None, None, now, params.weeks)?;
  let sessions = state
    .source
    .fetch_sessions(owner_id, Some(window.start), Some(window.end))
    .await?;

  analysis::score_balance(&sessions, params, now)
}

pub async fn get_current_vs_last(state: &AppState, owner_id: i64) -> Result<CurrentVsLast> {
  tracing::info!("Current vs last week requested by owner {}", owner_id);

  let now = Utc::now();
  let sessions = state
    .source
    .fetch_sessions(owner_id, Some(now - Duration::days(14)), Some(now))
    .await?;

  analysis::compare_current_week(&sessions, now)
}

pub async fn get_recency(state: &AppState, owner_id: i64) -> Result<RecencyMap> {
  tracing::info!("Muscle group recency requested by owner {}", owner_id);

  let sessions = state.source.fetch_sessions(owner_id, None, None).await?;
  Ok(analysis::days_since_trained(&sessions, Utc::now().date_naive()))
}

pub async fn get_training_summary(
  state: &AppState,
  owner_id: i64,
  params: &BalanceParams,
) -> Result<TrainingSummary> {
  tracing::info!("Training summary requested by owner {}", owner_id);

  // Recency needs the full history, so nothing is bounded here
  let sessions = state.source.fetch_sessions(owner_id, None, None).await?;
  analysis::compose(&sessions, params, Utc::now())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
