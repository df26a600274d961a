use std::path::{Path, PathBuf};

use crate::structures::Error;

/// Every file below `directory`, recursively, sorted by path.
pub(crate) async fn read_dir(directory: &Path) -> Result<Vec<PathBuf>, Error> {
  let mut files = Vec::new();
  let mut pending = vec![directory.to_path_buf()];
  while let Some(directory) = pending.pop() {
    let mut entries = tokio::fs::read_dir(&directory).await?;
    while let Some(entry) = entries.next_entry().await? {
      if entry.file_type().await?.is_dir() {
        pending.push(entry.path());
      } else {
        files.push(entry.path());
      }
    }
  }
  files.sort();
  Ok(files)
}
