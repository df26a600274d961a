use std::future::Future;
use std::io::ErrorKind;

use tracing::warn;

use crate::structures::RetryPolicy;

/// Whether an io error means another process holds the file.
pub fn is_locked(error: &std::io::Error) -> bool {
  if error.kind() == ErrorKind::ResourceBusy {
    return true;
  }
  // ERROR_SHARING_VIOLATION and ERROR_LOCK_VIOLATION
  cfg!(windows) && matches!(error.raw_os_error(), Some(32) | Some(33))
}

/// Runs `operation` until it succeeds, fails with an error `should_retry` rejects, or the policy runs out.
/// `operation` receives the zero based attempt number. The last error is returned when retries run out.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, should_retry: impl Fn(&E) -> bool, mut operation: F) -> Result<T, (E, u32)>
where
  F: FnMut(u32) -> Fut,
  Fut: Future<Output = Result<T, E>>,
  E: std::fmt::Display,
{
  let mut attempt = 0;
  loop {
    match operation(attempt).await {
      Ok(value) => return Ok(value),
      Err(error) if attempt < policy.retries && should_retry(&error) => {
        attempt += 1;
        warn!("Attempt {}/{} failed: {}, retrying in {:?}", attempt, policy.attempts(), error, policy.backoff);
        tokio::time::sleep(policy.backoff).await;
      },
      Err(error) => return Err((error, attempt + 1)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::time::Duration;

  fn busy() -> std::io::Error {
    std::io::Error::from(ErrorKind::ResourceBusy)
  }

  #[tokio::test]
  async fn succeeds_after_locked_attempts() {
    let calls = AtomicU32::new(0);
    let result = retry(RetryPolicy::new(5, Duration::from_millis(1)), is_locked, |attempt| {
      calls.fetch_add(1, Ordering::SeqCst);
      async move { if attempt < 2 { Err(busy()) } else { Ok(attempt) } }
    }).await;
    assert_eq!(result.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
  }

  #[tokio::test]
  async fn gives_up_after_retries_are_exhausted() {
    let calls = AtomicU32::new(0);
    let result : Result<(), _> = retry(RetryPolicy::new(3, Duration::from_millis(1)), is_locked, |_| {
      calls.fetch_add(1, Ordering::SeqCst);
      async { Err(busy()) }
    }).await;
    let (error, attempts) = result.unwrap_err();
    assert!(is_locked(&error));
    assert_eq!(attempts, 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
  }

  #[tokio::test]
  async fn other_errors_are_not_retried() {
    let calls = AtomicU32::new(0);
    let result : Result<(), _> = retry(RetryPolicy::new(5, Duration::from_millis(1)), is_locked, |_| {
      calls.fetch_add(1, Ordering::SeqCst);
      async { Err(std::io::Error::from(ErrorKind::PermissionDenied)) }
    }).await;
    assert_eq!(result.unwrap_err().1, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }
}
