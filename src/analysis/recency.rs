//! Days since each muscle group was last trained

use chrono::NaiveDate;

use crate::models::{GroupMap, MuscleGroup, TrainingSession};

/// Days since last trained per group; `None` when never trained
pub type RecencyMap = GroupMap<Option<i64>>;

/// Per group, whole days between `today` and the latest session that trained it.
///
/// Looks at the full history. Future-dated sessions clamp to 0; groups never
/// trained are `None`.
pub fn days_since_trained(sessions: &[TrainingSession], today: NaiveDate) -> RecencyMap {
  let mut newest_first: Vec<&TrainingSession> = sessions.iter().collect();
  newest_first.sort_by(|a, b| b.date.cmp(&a.date));

  let mut days = RecencyMap::default();
  let mut remaining = MuscleGroup::ALL.len();

  for session in newest_first {
    let elapsed = (today - session.date).num_days().max(0);
    for log in &session.logs {
      let slot = &mut days[log.muscle_group()];
      if slot.is_none() {
        *slot = Some(elapsed);
        remaining -= 1;
      }
    }
    if remaining == 0 {
      break;
    }
  }

  days
}
