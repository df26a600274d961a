use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::structures::RetryPolicy;
use crate::traits::ProcessGuard;

/// Knobs of the download and decompress stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
  /// Upper bound on entries processed at the same time
  pub concurrency: usize,
  /// Minimum time between two progress events, completion is never held back
  pub progress_interval: Duration,
  pub verify_checksums: bool,
}

/// Knobs of the stage copying staged files into the installation.
#[derive(Clone)]
pub struct ApplyOptions {
  pub delete_retry: RetryPolicy,
  pub copy_retry: RetryPolicy,
  /// Relative to the installation root
  pub version_record_path: PathBuf,
  pub process_guard: Arc<dyn ProcessGuard>,
}

/// Lets everything through.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProcessGuard;
