//! Training-load analytics over fully loaded sessions
//!
//! Everything here is synchronous and side-effect free. Callers that need the
//! current time pass `now` in explicitly.

pub mod balance;
pub mod history;
pub mod muscle;
pub mod ranking;
pub mod recency;
pub mod recent;
pub mod summary;
pub mod volume;
pub mod weekly;
pub mod window;

pub use balance::{score_balance, score_rows, BalanceParams, BalanceResult, BalanceStatus};
pub use history::{exercise_defaults, exercise_history, last_completed, ExerciseDefaults, ExerciseHistory};
pub use muscle::{group_totals, weekly_group_volume, WeeklyGroupRow};
pub use ranking::{top_sessions, TopLimit, TopSessionRow};
pub use recency::{days_since_trained, RecencyMap};
pub use recent::{compare_current_week, CurrentVsLast};
pub use summary::{compose, TrainingSummary};
pub use volume::{log_volume, session_volume};
pub use weekly::{weekly_frequency, weekly_volume, WeeklyFrequencyRow, WeeklyVolumeRow};
pub use window::{iso_week_key, week_start, DateWindow};
