use std::time::Duration;

use crate::structures::RetryPolicy;

impl RetryPolicy {
  pub const fn new(retries: u32, backoff: Duration) -> Self {
    Self {
      retries,
      backoff,
    }
  }

  /// Deleting a locked destination: five more tries, half a second apart.
  pub const fn delete() -> Self {
    Self::new(5, Duration::from_millis(500))
  }

  /// Copying onto a locked destination: three more tries, half a second apart.
  pub const fn copy() -> Self {
    Self::new(3, Duration::from_millis(500))
  }

  pub const fn attempts(&self) -> u32 {
    self.retries + 1
  }
}
