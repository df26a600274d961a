use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::functions::{copy_file, delete_file, read_dir, target_path, update_version_record};
use crate::implementations::normalize_separators;
use crate::structures::{ApplyOptions, DeleteFileList, Error};

/// Copies every staged file into the installation, records `new_version`, sweeps the delete list and removes the staging directory.
#[instrument(skip(options))]
pub async fn apply_patch_files(staging_dir: &Path, install_root: &Path, new_version: &str, options: &ApplyOptions) -> Result<(), Error> {
  options.process_guard.ensure_not_running().map_err(|error| match error {
    Error::Precondition(_) => error,
    other => Error::Precondition(other.to_string()),
  })?;
  if !tokio::fs::try_exists(staging_dir).await? {
    return Err(Error::InvalidInput(format!("staging directory {} doesn't exist", staging_dir.display())));
  }

  let staged = read_dir(staging_dir).await?
    .into_iter()
    .map(|path| relative_name(staging_dir, &path).map(|relative| (path, relative)))
    .collect::<Result<Vec<_>, Error>>()?;

  let delete_list = match staged.iter().find(|(path, _)| is_delete_list_path(path)) {
    Some((path, relative)) => {
      info!("Found delete list {}", relative);
      let bytes = tokio::fs::read(path).await?;
      DeleteFileList::parse(&String::from_utf8_lossy(&bytes))
    },
    None => DeleteFileList::default(),
  };

  let mut copied = HashSet::with_capacity(staged.len());
  for (source, relative) in &staged {
    let destination = target_path(install_root, relative)?;
    if let Some(parent) = destination.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    if tokio::fs::try_exists(&destination).await? {
      if delete_list.matches(relative) {
        info!("{} is on the delete list and gets replaced", relative);
      }
      delete_file(&destination, options.delete_retry).await?;
    }
    copy_file(source, &destination, options.copy_retry).await?;
    info!("Copied {}", relative);
    copied.insert(relative.clone());
  }

  update_version_record(&install_root.join(&options.version_record_path), new_version).await?;

  for entry in delete_list.entries.iter().filter(|entry| !copied.contains(*entry)) {
    sweep(install_root, entry, options).await;
  }

  match tokio::fs::remove_dir_all(staging_dir).await {
    Err(error) if error.kind() != ErrorKind::NotFound => return Err(error.into()),
    _ => {},
  }
  info!("Applied {} files", staged.len());
  Ok(())
}

/// Path below `root` with `/` separators.
fn relative_name(root: &Path, path: &Path) -> Result<String, Error> {
  let relative = path.strip_prefix(root)
    .map_err(|_| Error::InvalidInput(format!("{} is not inside {}", path.display(), root.display())))?;
  Ok(normalize_separators(&relative.to_string_lossy()))
}

fn is_delete_list_path(path: &Path) -> bool {
  path.file_name()
    .map(|file_name| DeleteFileList::is_delete_file_list(&file_name.to_string_lossy()))
    .unwrap_or(false)
}

/// Deletes an obsolete file. Nothing here fails the run.
async fn sweep(install_root: &Path, entry: &str, options: &ApplyOptions) {
  let path = match target_path(install_root, entry) {
    Ok(path) => path,
    Err(error) => {
      warn!("Skipping delete list entry {}: {}", entry, error);
      return;
    }
  };
  match tokio::fs::metadata(&path).await {
    Ok(metadata) if metadata.is_dir() => warn!("{} is a directory, not deleting it", path.display()),
    Ok(_) => match delete_file(&path, options.delete_retry).await {
      Ok(()) => info!("Deleted obsolete {}", entry),
      Err(error) => warn!("Couldn't delete obsolete {}: {}", entry, error),
    },
    Err(error) if error.kind() == ErrorKind::NotFound => info!("{} is already gone", entry),
    Err(error) => warn!("Couldn't inspect {}: {}", path.display(), error),
  }
}
