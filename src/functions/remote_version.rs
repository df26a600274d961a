use tracing::{info, instrument};

use crate::functions::fetch_bytes::{failure_message, fetch_bytes};
use crate::structures::Error;
use crate::traits::HttpClient;

const OPEN_SECTION : &str = "[useropen]";
const SECTION_ENDS : [&str; 2] = ["[masteropen]", "[versionend]"];

/// The newest published version in a `patchVersionInfo.txt` listing.
/// That's the last version line of the `[useropen]` section, which ends at `[masteropen]` or `[versionend]`.
pub fn parse_version_info(text: &str) -> Result<String, Error> {
  let mut lines = text.lines().map(str::trim);
  if !lines.any(|line| line.eq_ignore_ascii_case(OPEN_SECTION)) {
    return Err(Error::Format(format!("version info has no {} section", OPEN_SECTION)));
  }
  lines
    .take_while(|line| !SECTION_ENDS.iter().any(|end| line.eq_ignore_ascii_case(end)))
    .filter(|line| !line.is_empty() && !line.starts_with('['))
    .last()
    .map(str::to_string)
    .ok_or_else(|| Error::Format(format!("{} lists no version", OPEN_SECTION)))
}

#[instrument(skip(client))]
pub async fn fetch_remote_version(client: &dyn HttpClient, url: &str) -> Result<String, Error> {
  let bytes = fetch_bytes(client, url).await
    .map_err(|error| Error::Network { url: url.to_string(), message: failure_message(error) })?;
  let version = parse_version_info(&String::from_utf8_lossy(&bytes))?;
  info!("Latest published version is {}", version);
  Ok(version)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn last_version_of_the_user_section_wins() {
    let text = "[versionstart]\r\n[useropen]\r\n00025\r\n00026\r\n\r\n[masteropen]\r\n00030\r\n[versionend]\r\n";
    assert_eq!(parse_version_info(text).unwrap(), "00026");
  }

  #[test]
  fn section_may_run_until_version_end() {
    assert_eq!(parse_version_info("[useropen]\n00025\n[versionend]\n00099").unwrap(), "00025");
    assert_eq!(parse_version_info("[useropen]\n00025\n00027").unwrap(), "00027");
  }

  #[test]
  fn missing_section_or_version_is_a_format_error() {
    assert!(matches!(parse_version_info("00025\n00026"), Err(Error::Format(_))));
    assert!(matches!(parse_version_info("[useropen]\n\n[masteropen]\n00030"), Err(Error::Format(_))));
  }
}
