use std::time::Duration;

/// How often a locked file operation is retried, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Retries after the first attempt
  pub retries: u32,
  pub backoff: Duration,
}
