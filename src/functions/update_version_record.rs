use std::path::Path;

use tracing::{info, instrument, warn};

use crate::functions::{read_ini_file, write_ini_file};
use crate::structures::{Error, IniValue};

pub(crate) const PATCH_SECTION : &str = "patch";
pub(crate) const VERSION_KEY : &str = "version";

/// Sets `[patch] version` in the record at `path`. A missing record is left alone.
#[instrument]
pub(crate) async fn update_version_record(path: &Path, version: &str) -> Result<(), Error> {
  if !tokio::fs::try_exists(path).await? {
    warn!("{} doesn't exist, not recording version {}", path.display(), version);
    return Ok(());
  }
  let mut document = read_ini_file(path).await?;
  document.set(PATCH_SECTION, VERSION_KEY, IniValue::from(version));
  write_ini_file(path, &document).await?;
  info!("Installation is now at version {}", version);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn only_the_version_changes() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("Patch.ini");
    std::fs::write(&path, "[patch]\r\nfilename=Game.exe\r\nversion=26\r\n\r\n[launcher]\r\nwidth=800\r\n").unwrap();
    update_version_record(&path, "00027").await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[patch]\nfilename=Game.exe\nversion=00027\n\n[launcher]\nwidth=800");
  }

  #[tokio::test]
  async fn missing_record_is_skipped() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("Patch.ini");
    update_version_record(&path, "00027").await.unwrap();
    assert!(!path.exists());
  }
}
