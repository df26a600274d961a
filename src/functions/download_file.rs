use std::path::Path;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

use crate::functions::fetch_bytes::failure_message;
use crate::structures::Error;
use crate::traits::HttpClient;

/// Streams `url` into `destination`, reporting the downloaded fraction as chunks arrive.
/// Without a content length the fraction stays at 0 until the body is complete.
#[instrument(skip(client, on_progress))]
pub(crate) async fn download_file(
  client: &dyn HttpClient,
  url: &str,
  destination: &Path,
  mut on_progress: impl FnMut(f64) -> Result<(), Error>,
) -> Result<u64, Error> {
  let download_error = |error: Error| Error::Download { url: url.to_string(), message: failure_message(error) };
  let mut response = client.get(url).await.map_err(download_error)?;
  let mut file = tokio::fs::File::create(destination).await?;
  let mut received : u64 = 0;
  while let Some(chunk) = response.body.next().await {
    let chunk = chunk.map_err(download_error)?;
    file.write_all(&chunk).await?;
    received += chunk.len() as u64;
    if let Some(length) = response.content_length.filter(|length| *length > 0) {
      on_progress(received as f64 / length as f64)?;
    }
  }
  file.flush().await?;
  on_progress(1.0)?;
  Ok(received)
}
