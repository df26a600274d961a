use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::functions::{is_locked, retry};
use crate::structures::{Error, RetryPolicy};

/// Removes a file, retrying while another process holds it.
#[instrument(skip(policy))]
pub(crate) async fn delete_file(path: &Path, policy: RetryPolicy) -> Result<(), Error> {
  retry(policy, is_locked, |_| tokio::fs::remove_file(path))
    .await
    .map_err(|(error, attempts)| locked_or_io(path, error, attempts))
}

pub(crate) fn locked_or_io(path: &Path, error: std::io::Error, attempts: u32) -> Error {
  if is_locked(&error) {
    Error::LockedFile { path: PathBuf::from(path), attempts }
  } else {
    error.into()
  }
}
