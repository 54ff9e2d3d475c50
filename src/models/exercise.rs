use serde::{Deserialize, Serialize};

use super::MuscleGroup;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
  pub id: i64,
  pub name: String,
  pub muscle_group: Option<MuscleGroup>,
  #[serde(default)]
  pub is_custom: bool,
  /// Owner of a user-defined exercise; `None` for the shared catalogue
  #[serde(default)]
  pub owner_id: Option<i64>,
}

impl Exercise {
  pub fn new(id: i64, name: impl Into<String>, muscle_group: MuscleGroup) -> Self {
    Self {
      id,
      name: name.into(),
      muscle_group: Some(muscle_group),
      is_custom: false,
      owner_id: None,
    }
  }

  /// Unclassified exercises count as core
  pub fn group(&self) -> MuscleGroup {
    self.muscle_group.unwrap_or_default()
  }

  /// Catalogue exercises are shared; custom ones belong to their creator
  pub fn visible_to(&self, owner_id: i64) -> bool {
    !self.is_custom || self.owner_id == Some(owner_id)
  }
}
