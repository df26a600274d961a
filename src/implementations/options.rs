use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::structures::{ApplyOptions, Error, FetchOptions, NoProcessGuard, RetryPolicy};
use crate::traits::ProcessGuard;

pub(crate) const DEFAULT_CONCURRENCY : usize = 3;
pub(crate) const DEFAULT_PROGRESS_INTERVAL : Duration = Duration::from_secs(2);
pub(crate) const DEFAULT_VERSION_RECORD_PATH : &str = "PatchInfo/Patch.ini";

impl Default for FetchOptions {
  fn default() -> Self {
    Self {
      concurrency: DEFAULT_CONCURRENCY,
      progress_interval: DEFAULT_PROGRESS_INTERVAL,
      verify_checksums: false,
    }
  }
}

impl Default for ApplyOptions {
  fn default() -> Self {
    Self {
      delete_retry: RetryPolicy::delete(),
      copy_retry: RetryPolicy::copy(),
      version_record_path: PathBuf::from(DEFAULT_VERSION_RECORD_PATH),
      process_guard: Arc::new(NoProcessGuard),
    }
  }
}

impl std::fmt::Debug for ApplyOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.debug_struct("ApplyOptions")
      .field("delete_retry", &self.delete_retry)
      .field("copy_retry", &self.copy_retry)
      .field("version_record_path", &self.version_record_path)
      .finish_non_exhaustive()
  }
}

impl ProcessGuard for NoProcessGuard {
  fn ensure_not_running(&self) -> Result<(), Error> {
    Ok(())
  }
}
