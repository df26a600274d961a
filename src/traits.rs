use async_trait::async_trait;

use crate::structures::{Error, HttpResponse};

/// Where patch lists and payloads come from.
#[async_trait]
pub trait HttpClient: Send + Sync {
  /// GET `url`. A status outside 2xx is an `Error::Network` naming the url.
  async fn get(&self, url: &str) -> Result<HttpResponse, Error>;
}

/// Checked before anything in the installation is touched.
pub trait ProcessGuard: Send + Sync {
  /// Fails when the game or launcher is still running.
  fn ensure_not_running(&self) -> Result<(), Error>;
}
