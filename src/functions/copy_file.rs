use std::io::ErrorKind;
use std::path::Path;

use tracing::{instrument, warn};

use crate::functions::{is_locked, retry};
use crate::functions::delete_file::locked_or_io;
use crate::structures::{Error, RetryPolicy};

/// Copies over `destination`. While the destination is locked it is deleted again before every retry.
#[instrument(skip(policy))]
pub(crate) async fn copy_file(source: &Path, destination: &Path, policy: RetryPolicy) -> Result<u64, Error> {
  retry(policy, is_locked, |attempt| async move {
    if attempt > 0 {
      if let Err(error) = tokio::fs::remove_file(destination).await {
        if error.kind() != ErrorKind::NotFound {
          warn!("Couldn't remove {} before retrying the copy: {}", destination.display(), error);
        }
      }
    }
    tokio::fs::copy(source, destination).await
  })
  .await
  .map_err(|(error, attempts)| locked_or_io(destination, error, attempts))
}
