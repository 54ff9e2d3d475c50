//! Date windows and the two week-bucketing rules used by the reports

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{AnalyticsError, Result};
use crate::models::TrainingSession;

/// Default look-back for the ISO-week volume and frequency reports
pub const DEFAULT_LOOKBACK_DAYS: i64 = 180;

/// Default length of the muscle-group baseline window
pub const DEFAULT_WEEKS: i64 = 12;

/// Half-open instant range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl DateWindow {
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
    if start >= end {
      return Err(AnalyticsError::InvalidRange { start, end });
    }
    Ok(Self { start, end })
  }

  /// Fill in missing bounds: `end` defaults to `now`, `start` to `end - default_span`
  pub fn resolve(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    default_span: Duration,
  ) -> Result<Self> {
    let end = end.unwrap_or(now);
    let start = match start {
      Some(s) => s,
      None => end
        .checked_sub_signed(default_span)
        .unwrap_or(DateTime::<Utc>::MIN_UTC),
    };
    Self::new(start, end)
  }

  /// Same as [`DateWindow::resolve`] with the default span given in weeks
  pub fn resolve_weeks(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    weeks: i64,
  ) -> Result<Self> {
    Self::resolve(start, end, now, weeks_span(weeks)?)
  }

  pub fn contains(&self, session: &TrainingSession) -> bool {
    let at = session.starts_at();
    at >= self.start && at < self.end
  }

  pub fn filter<'a>(
    &self,
    sessions: &'a [TrainingSession],
  ) -> impl Iterator<Item = &'a TrainingSession> + 'a {
    let window = *self;
    sessions.iter().filter(move |s| window.contains(s))
  }
}

/// Validated span of `weeks` weeks
pub fn weeks_span(weeks: i64) -> Result<Duration> {
  if weeks <= 0 {
    return Err(AnalyticsError::InvalidWindow {
      name: "weeks",
      value: weeks,
    });
  }
  Duration::try_weeks(weeks).ok_or(AnalyticsError::WindowTooLarge {
    name: "weeks",
    value: weeks,
  })
}

/// ISO-8601 week key, e.g. `2024-W01`. Uses the ISO year, so 2024-12-30 is `2025-W01`.
pub fn iso_week_key(date: NaiveDate) -> String {
  let week = date.iso_week();
  format!("{}-W{:02}", week.year(), week.week())
}

/// Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Round to `places` decimals; exact ties go to the even neighbour
pub fn round_to(value: f64, places: i32) -> f64 {
  let factor = 10f64.powi(places);
  (value * factor).round_ties_even() / factor
}
