use std::cmp::Ordering;

use crate::structures::PatchEntry;

/// The launcher is published under a different name so it doesn't overwrite itself while running.
const LAUNCHER_PUBLISHED_NAME : &str = "VLauncher_New.exe";
const LAUNCHER_NAME : &str = "VLauncher.exe";

impl PatchEntry {
  pub fn new(
    version: &str,
    patch_file_name: &str,
    target_file_name: &str,
    original_size: u64,
    compressed_size: u64,
    checksum: Option<String>,
    base_url: &str,
  ) -> Self {
    let target_file_name = if target_file_name == LAUNCHER_PUBLISHED_NAME {
      LAUNCHER_NAME
    } else {
      target_file_name
    };
    Self {
      version: version.to_string(),
      patch_file_name: patch_file_name.to_string(),
      target_file_name: target_file_name.to_string(),
      original_size,
      compressed_size,
      checksum,
      download_url: format!("{}/{}/{}", base_url.trim_end_matches('/'), version, patch_file_name),
    }
  }

  /// Compares versions numerically, falls back to comparing the strings if either isn't a number.
  pub fn compare_version(&self, other: &PatchEntry) -> Ordering {
    match (self.version.parse::<u64>(), other.version.parse::<u64>()) {
      (Ok(ours), Ok(theirs)) => ours.cmp(&theirs),
      _ => self.version.cmp(&other.version),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(version: &str, target: &str) -> PatchEntry {
    PatchEntry::new(version, "file.lzma", target, 1, 1, None, "http://cdn/vpatch/")
  }

  #[test]
  fn download_url_joins_base_version_and_file() {
    assert_eq!(entry("00026", "Game.exe").download_url, "http://cdn/vpatch/00026/file.lzma");
  }

  #[test]
  fn published_launcher_is_renamed() {
    assert_eq!(entry("00026", "VLauncher_New.exe").target_file_name, "VLauncher.exe");
    assert_eq!(entry("00026", "Data/VLauncher_New.exe").target_file_name, "Data/VLauncher_New.exe");
  }

  #[test]
  fn versions_compare_numerically() {
    assert_eq!(entry("00100", "a").compare_version(&entry("99", "a")), Ordering::Greater);
    assert_eq!(entry("00026", "a").compare_version(&entry("26", "a")), Ordering::Equal);
  }

  #[test]
  fn versions_fall_back_to_lexicographic() {
    assert_eq!(entry("26b", "a").compare_version(&entry("26a", "a")), Ordering::Greater);
    assert_eq!(entry("100", "a").compare_version(&entry("9x", "a")), Ordering::Less);
  }
}
