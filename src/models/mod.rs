pub mod exercise;
pub mod muscle_group;
pub mod workout;

pub use exercise::Exercise;
pub use muscle_group::{GroupMap, MuscleGroup};
pub use workout::{ExerciseLog, TrainingSession, DEFAULT_SESSION_NAME};
