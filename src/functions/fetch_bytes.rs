use futures::StreamExt;

use crate::structures::Error;
use crate::traits::HttpClient;

const MAX_PREALLOCATION : u64 = 1 << 20;

/// Downloads a whole body into memory, fine for lists and small text files.
pub(crate) async fn fetch_bytes(client: &dyn HttpClient, url: &str) -> Result<Vec<u8>, Error> {
  let mut response = client.get(url).await?;
  let mut bytes = Vec::with_capacity(response.content_length.unwrap_or(0).min(MAX_PREALLOCATION) as usize);
  while let Some(chunk) = response.body.next().await {
    bytes.extend_from_slice(&chunk?);
  }
  Ok(bytes)
}

/// The message of an error without the url a `Network` error already carries.
pub(crate) fn failure_message(error: Error) -> String {
  match error {
    Error::Network { message, .. } => message,
    Error::Download { message, .. } => message,
    other => other.to_string(),
  }
}
