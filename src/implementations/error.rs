use crate::structures::Error;

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::InvalidUrl(error) => Some(error),
      Self::IoError(error) => Some(error),
      Self::JoinError(error) => Some(error),
      _ => None,
    }
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::InvalidInput(message) => write!(f, "invalid input: {}", message),
      Self::Format(message) => write!(f, "format error: {}", message),
      Self::Network { url, message } => write!(f, "failed to fetch {}: {}", url, message),
      Self::Download { url, message } => write!(f, "failed to download patch file {}: {}", url, message),
      Self::Decompress { path, message } => write!(f, "failed to decompress {}: {}", path.display(), message),
      Self::LockedFile { path, attempts } => write!(f, "{} is locked, gave up after {} attempts", path.display(), attempts),
      Self::Precondition(message) => write!(f, "precondition failed: {}", message),
      Self::ChecksumMismatch { path, expected, actual } => write!(f, "checksum of {} is incorrect\nGot hash: {}\nExpected hash: {}", path.display(), actual, expected),
      Self::InvalidUrl(error) => write!(f, "invalid url: {}", error),
      Self::IoError(error) => write!(f, "io error: {}", error),
      Self::JoinError(error) => write!(f, "background task failed: {}", error),
      Self::MutexPoisoned(message) => write!(f, "mutex poisoned: {}", message),
    }
  }
}

impl From<std::io::Error> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: std::io::Error) -> Self {
    log_error(&error);
    Self::IoError(error)
  }
}

impl From<tokio::task::JoinError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: tokio::task::JoinError) -> Self {
    log_error(&error);
    Self::JoinError(error)
  }
}

impl From<url::ParseError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: url::ParseError) -> Self {
    log_error(&error);
    Self::InvalidUrl(error)
  }
}

impl From<ini::ParseError> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: ini::ParseError) -> Self {
    log_error(&error);
    Self::Format(error.to_string())
  }
}

impl<T> From<std::sync::PoisonError<std::sync::MutexGuard<'_, T>>> for Error {
  #[track_caller]
  #[inline(always)]
  fn from(error: std::sync::PoisonError<std::sync::MutexGuard<'_, T>>) -> Self {
    log_error(&error);
    Self::MutexPoisoned(error.to_string())
  }
}

#[track_caller]
fn log_error(error: &(impl std::error::Error + ?Sized)) {
  let location = core::panic::Location::caller();
  tracing::error!("{}:{}: {:?}", location.file(), location.line(), error);
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  #[test]
  fn display_names_the_offending_url() {
    let error = Error::Download { url: "http://cdn/00026/Game.exe.lzma".to_string(), message: "HTTP 404 Not Found".to_string() };
    assert_eq!(error.to_string(), "failed to download patch file http://cdn/00026/Game.exe.lzma: HTTP 404 Not Found");
  }

  #[test]
  fn locked_file_reports_attempts() {
    let error = Error::LockedFile { path: PathBuf::from("Game.exe"), attempts: 6 };
    assert_eq!(error.to_string(), "Game.exe is locked, gave up after 6 attempts");
  }

  #[test]
  fn io_errors_convert_and_keep_their_source() {
    let error : Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, Error::IoError(_)));
    assert!(std::error::Error::source(&error).is_some());
  }
}
