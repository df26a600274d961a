use std::path::Path;

use tracing::{info, instrument, warn};

use crate::functions::decode_patch_list;
use crate::functions::fetch_bytes::{failure_message, fetch_bytes};
use crate::structures::{Error, Manifest};
use crate::traits::HttpClient;

/// Builds the manifest of the given versions.
/// A list found in `cache_dir` is used as is, otherwise it's downloaded from `{base_url}/{version}/{version}.lst` and cached.
#[instrument(skip(client))]
pub async fn resolve_manifest<S: AsRef<str> + std::fmt::Debug>(
  client: &dyn HttpClient,
  base_url: &str,
  versions: &[S],
  keep_latest_only: bool,
  cache_dir: &Path,
) -> Result<Manifest, Error> {
  let versions : Vec<&str> = versions.iter()
    .map(|version| version.as_ref())
    .filter(|version| {
      let valid = is_version_token(version);
      if !valid {
        warn!("Ignoring version {:?}, it isn't a number", version);
      }
      valid
    })
    .collect();
  if versions.is_empty() {
    return Err(Error::InvalidInput("no valid version to resolve".to_string()));
  }
  tokio::fs::create_dir_all(cache_dir).await?;

  let mut patches = Vec::new();
  for version in versions {
    let text = read_or_fetch_list(client, base_url, version, cache_dir).await?;
    let entries = decode_patch_list(&text, version, base_url);
    info!("Version {} lists {} files", version, entries.len());
    patches.extend(entries);
  }
  let manifest = Manifest::new(patches);
  Ok(if keep_latest_only { manifest.keep_latest_only() } else { manifest })
}

pub(crate) fn is_version_token(version: &str) -> bool {
  !version.is_empty() && version.bytes().all(|byte| byte.is_ascii_digit())
}

async fn read_or_fetch_list(client: &dyn HttpClient, base_url: &str, version: &str, cache_dir: &Path) -> Result<String, Error> {
  let cached = cache_dir.join(format!("{}.lst.txt", version));
  if tokio::fs::try_exists(&cached).await? {
    info!("Using cached list {}", cached.display());
    let bytes = tokio::fs::read(&cached).await?;
    return Ok(String::from_utf8_lossy(&bytes).into_owned());
  }
  let url = format!("{}/{}/{}.lst", base_url.trim_end_matches('/'), version, version);
  info!("Downloading list {}", url);
  let bytes = fetch_bytes(client, &url).await
    .map_err(|error| Error::Network { url: url.clone(), message: failure_message(error) })?;
  tokio::fs::write(&cached, &bytes).await?;
  Ok(String::from_utf8_lossy(&bytes).into_owned())
}
