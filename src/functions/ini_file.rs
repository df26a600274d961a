use std::ffi::OsString;
use std::path::Path;

use tracing::debug;

use crate::structures::{Error, IniDocument};

pub async fn read_ini_file(path: &Path) -> Result<IniDocument, Error> {
  let bytes = tokio::fs::read(path).await?;
  IniDocument::decode(&String::from_utf8_lossy(&bytes))
}

/// Writes to a sibling temporary file first and renames it over `path`.
pub async fn write_ini_file(path: &Path, document: &IniDocument) -> Result<(), Error> {
  let mut temporary_name = path.file_name().map(OsString::from).unwrap_or_default();
  temporary_name.push(".tmp");
  let temporary = path.with_file_name(temporary_name);
  tokio::fs::write(&temporary, document.encode()).await?;
  if let Err(error) = tokio::fs::rename(&temporary, path).await {
    let _ = tokio::fs::remove_file(&temporary).await;
    return Err(error.into());
  }
  debug!("Wrote {}", path.display());
  Ok(())
}
