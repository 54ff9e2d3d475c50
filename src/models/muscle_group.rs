use serde::{Deserialize, Serialize, Serializer};
use std::ops::{Index, IndexMut};

/// Canonical muscle-group classification. Declaration order is the canonical
/// order: every per-group report lists groups this way and ties resolve to
/// the earlier group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
  Chest = 0,
  Back = 1,
  Shoulders = 2,
  Arms = 3,
  Legs = 4,
  #[default]
  Core = 5,
}

impl MuscleGroup {
  pub const ALL: [MuscleGroup; 6] = [
    MuscleGroup::Chest,
    MuscleGroup::Back,
    MuscleGroup::Shoulders,
    MuscleGroup::Arms,
    MuscleGroup::Legs,
    MuscleGroup::Core,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      MuscleGroup::Chest => "chest",
      MuscleGroup::Back => "back",
      MuscleGroup::Shoulders => "shoulders",
      MuscleGroup::Arms => "arms",
      MuscleGroup::Legs => "legs",
      MuscleGroup::Core => "core",
    }
  }

  fn slot(self) -> usize {
    self as usize
  }

  /// Lenient parse used for stored classifications. Detailed muscle names go
  /// through [`MuscleGroup::from_muscle`]; missing or unknown labels land in `Core`.
  pub fn from_label(label: Option<&str>) -> Self {
    match label.map(|l| l.trim().to_lowercase()) {
      Some(l) => l.parse().unwrap_or_else(|_| Self::from_muscle(&l)),
      None => Self::default(),
    }
  }

  /// Map a detailed muscle name (as found in exercise catalogues) to its group
  pub fn from_muscle(muscle: &str) -> Self {
    match muscle.trim().to_lowercase().as_str() {
      "chest" => MuscleGroup::Chest,
      "lats" | "middle back" | "lower back" | "traps" => MuscleGroup::Back,
      "shoulders" | "neck" => MuscleGroup::Shoulders,
      "biceps" | "triceps" | "forearms" => MuscleGroup::Arms,
      "quadriceps" | "calves" | "glutes" | "hamstrings" | "abductors" | "adductors" => {
        MuscleGroup::Legs
      }
      _ => MuscleGroup::Core,
    }
  }
}

impl std::fmt::Display for MuscleGroup {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for MuscleGroup {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "chest" => Ok(Self::Chest),
      "back" => Ok(Self::Back),
      "shoulders" => Ok(Self::Shoulders),
      "arms" => Ok(Self::Arms),
      "legs" => Ok(Self::Legs),
      "core" => Ok(Self::Core),
      _ => Err(format!("Unknown muscle group: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Per-group map: one slot per canonical group, always fully populated
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupMap<T>([T; 6]);

impl<T> GroupMap<T> {
  pub fn from_fn(mut f: impl FnMut(MuscleGroup) -> T) -> Self {
    Self(std::array::from_fn(|i| f(MuscleGroup::ALL[i])))
  }

  pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, &T)> {
    MuscleGroup::ALL.into_iter().zip(self.0.iter())
  }

  pub fn values(&self) -> impl Iterator<Item = &T> {
    self.0.iter()
  }

  pub fn map<U>(&self, mut f: impl FnMut(MuscleGroup, &T) -> U) -> GroupMap<U> {
    GroupMap::from_fn(|g| f(g, &self[g]))
  }
}

impl GroupMap<f64> {
  pub fn total(&self) -> f64 {
    self.0.iter().sum()
  }

  /// Each group's fraction of the map total; all zero when the total is zero
  pub fn shares(&self) -> GroupMap<f64> {
    let total = self.total();
    self.map(|_, v| if total > 0.0 { v / total } else { 0.0 })
  }

  pub fn add_assign(&mut self, other: &GroupMap<f64>) {
    for g in MuscleGroup::ALL {
      self[g] += other[g];
    }
  }
}

impl<T> Index<MuscleGroup> for GroupMap<T> {
  type Output = T;
  fn index(&self, group: MuscleGroup) -> &T {
    &self.0[group.slot()]
  }
}

impl<T> IndexMut<MuscleGroup> for GroupMap<T> {
  fn index_mut(&mut self, group: MuscleGroup) -> &mut T {
    &mut self.0[group.slot()]
  }
}

impl<T: Serialize> Serialize for GroupMap<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.iter().map(|(g, v)| (g.as_str(), v)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_canonical_order_and_labels() {
    let labels: Vec<_> = MuscleGroup::ALL.iter().map(|g| g.as_str()).collect();
    assert_eq!(labels, ["chest", "back", "shoulders", "arms", "legs", "core"]);
    assert_eq!("legs".parse::<MuscleGroup>(), Ok(MuscleGroup::Legs));
    assert!("glutes".parse::<MuscleGroup>().is_err());
  }

  #[test]
  fn test_missing_or_unknown_label_defaults_to_core() {
    assert_eq!(MuscleGroup::from_label(None), MuscleGroup::Core);
    assert_eq!(MuscleGroup::from_label(Some("cardio")), MuscleGroup::Core);
    assert_eq!(MuscleGroup::from_label(Some(" Back ")), MuscleGroup::Back);
    assert_eq!(MuscleGroup::from_label(Some("Quadriceps")), MuscleGroup::Legs);
  }

  #[test]
  fn test_detailed_muscle_mapping() {
    assert_eq!(MuscleGroup::from_muscle("Lats"), MuscleGroup::Back);
    assert_eq!(MuscleGroup::from_muscle("neck"), MuscleGroup::Shoulders);
    assert_eq!(MuscleGroup::from_muscle("hamstrings"), MuscleGroup::Legs);
    assert_eq!(MuscleGroup::from_muscle("triceps"), MuscleGroup::Arms);
    assert_eq!(MuscleGroup::from_muscle("abdominals"), MuscleGroup::Core);
    assert_eq!(MuscleGroup::from_muscle("something else"), MuscleGroup::Core);
  }

  #[test]
  fn test_group_map_shares_and_serialization() {
    let mut volumes = GroupMap::<f64>::default();
    volumes[MuscleGroup::Chest] = 300.0;
    volumes[MuscleGroup::Legs] = 100.0;

    let shares = volumes.shares();
    assert_eq!(shares[MuscleGroup::Chest], 0.75);
    assert_eq!(shares[MuscleGroup::Legs], 0.25);
    assert_eq!(shares[MuscleGroup::Core], 0.0);

    let empty = GroupMap::<f64>::default().shares();
    assert!(empty.values().all(|v| *v == 0.0));

    let json = serde_json::to_value(volumes).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "chest": 300.0, "back": 0.0, "shoulders": 0.0,
        "arms": 0.0, "legs": 100.0, "core": 0.0
      })
    );
  }
}
