use std::cmp::Ordering;
use std::collections::HashMap;

use crate::structures::{Manifest, PatchEntry};

impl Manifest {
  pub fn new(patches: Vec<PatchEntry>) -> Self {
    let total_size = patches.iter().map(|patch| patch.original_size).sum();
    Self {
      patches,
      total_size,
    }
  }

  pub fn len(&self) -> usize {
    self.patches.len()
  }

  pub fn is_empty(&self) -> bool {
    self.patches.is_empty()
  }

  /// Keeps a single entry per target file, the one with the highest version.
  /// Targets stay in the order they were first seen, equal versions keep the earlier entry.
  pub fn keep_latest_only(self) -> Self {
    let mut latest : Vec<PatchEntry> = Vec::with_capacity(self.patches.len());
    let mut positions : HashMap<String, usize> = HashMap::new();
    for patch in self.patches {
      match positions.get(&patch.target_file_name) {
        Some(&position) => {
          if patch.compare_version(&latest[position]) == Ordering::Greater {
            latest[position] = patch;
          }
        },
        None => {
          positions.insert(patch.target_file_name.clone(), latest.len());
          latest.push(patch);
        }
      }
    }
    Self::new(latest)
  }

  /// Highest version found among the entries.
  pub fn latest_version(&self) -> Option<&str> {
    self.patches.iter()
      .max_by(|a, b| a.compare_version(b))
      .map(|patch| patch.version.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(version: &str, target: &str, size: u64) -> PatchEntry {
    PatchEntry::new(version, &format!("{}.lzma", target), target, size, size / 2, None, "http://cdn")
  }

  #[test]
  fn latest_version_wins_per_target() {
    let manifest = Manifest::new(vec![
      entry("00025", "Game.exe", 100),
      entry("00026", "Game.exe", 120),
    ]).keep_latest_only();
    assert_eq!(manifest.patches.len(), 1);
    assert_eq!(manifest.patches[0].version, "00026");
    assert_eq!(manifest.total_size, 120);
  }

  #[test]
  fn order_of_appearance_does_not_matter() {
    let manifest = Manifest::new(vec![
      entry("00026", "Game.exe", 120),
      entry("00025", "Game.exe", 100),
      entry("00025", "Data/a.pak", 7),
    ]).keep_latest_only();
    assert_eq!(manifest.patches.iter().map(|p| p.target_file_name.as_str()).collect::<Vec<_>>(), vec!["Game.exe", "Data/a.pak"]);
    assert_eq!(manifest.patches[0].version, "00026");
    assert_eq!(manifest.total_size, 127);
  }

  #[test]
  fn total_size_without_dedup_counts_everything() {
    let manifest = Manifest::new(vec![
      entry("00025", "Game.exe", 100),
      entry("00026", "Game.exe", 120),
    ]);
    assert_eq!(manifest.total_size, 220);
    assert_eq!(manifest.latest_version(), Some("00026"));
  }
}
