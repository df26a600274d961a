use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, instrument};

use crate::structures::{Error, HttpResponse, ReqwestHttpClient};
use crate::traits::HttpClient;

impl ReqwestHttpClient {
  pub fn new() -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .user_agent(format!("r2beat-patcher ({})", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(setup_error)?;
    Ok(Self { client })
  }

  pub fn with_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
  #[instrument(skip(self))]
  async fn get(&self, url: &str) -> Result<HttpResponse, Error> {
    let response = self.client.get(url).send().await
      .map_err(|error| Error::Network { url: url.to_string(), message: error.to_string() })?;
    let status = response.status();
    if !status.is_success() {
      return Err(Error::Network { url: url.to_string(), message: format!("HTTP {}", status) });
    }
    let content_length = response.content_length();
    debug!("{} answered {} with {:?} bytes", url, status, content_length);
    let owned_url = url.to_string();
    let body = response.bytes_stream()
      .map(move |chunk| chunk
        .map(|bytes| bytes.to_vec())
        .map_err(|error| Error::Network { url: owned_url.clone(), message: error.to_string() }))
      .boxed();
    Ok(HttpResponse {
      content_length,
      body,
    })
  }
}

fn setup_error(error: impl std::fmt::Display) -> Error {
  Error::InvalidInput(format!("couldn't set up the http client: {}", error))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn setup_failures_name_the_client() {
    let error = setup_error("no tls backend");
    assert!(matches!(error, Error::InvalidInput(ref message) if message == "couldn't set up the http client: no tls backend"));
  }

  #[test]
  fn default_client_builds() {
    assert!(ReqwestHttpClient::new().is_ok());
  }
}
