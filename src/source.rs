//! Where training sessions come from

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::TrainingSession;

/// Read-only access to one owner's logged sessions.
///
/// Bounds are optional. Implementations may return a superset of the range
/// (the analytics apply the exact half-open filter), but never another
/// owner's sessions.
#[async_trait]
pub trait SessionSource: Send + Sync {
  async fn fetch_sessions(
    &self,
    owner_id: i64,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
  ) -> Result<Vec<TrainingSession>>;
}

/// Sessions held in memory, mainly for tests and fixtures
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
  sessions: Vec<TrainingSession>,
}

impl InMemorySource {
  pub fn new(sessions: Vec<TrainingSession>) -> Self {
    Self { sessions }
  }
}

#[async_trait]
impl SessionSource for InMemorySource {
  async fn fetch_sessions(
    &self,
    owner_id: i64,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
  ) -> Result<Vec<TrainingSession>> {
    Ok(
      self
        .sessions
        .iter()
        .filter(|s| s.owner_id == owner_id)
        .filter(|s| start.map_or(true, |start| s.starts_at() >= start))
        .filter(|s| end.map_or(true, |end| s.starts_at() < end))
        .cloned()
        .collect(),
    )
  }
}
