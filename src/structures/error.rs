use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
  /// Bad version tokens, an empty manifest, a path escaping its root, a run already in progress.
  InvalidInput(String),
  /// Unparseable manifest, ini or version listing.
  Format(String),
  /// Fetching a manifest or listing failed.
  Network { url: String, message: String },
  /// Fetching a patch payload failed.
  Download { url: String, message: String },
  /// Streaming a payload through the lzma decoder failed.
  Decompress { path: PathBuf, message: String },
  /// A destination stayed locked after every retry.
  LockedFile { path: PathBuf, attempts: u32 },
  /// The patched software is still running.
  Precondition(String),
  ChecksumMismatch { path: PathBuf, expected: String, actual: String },
  InvalidUrl(url::ParseError),
  IoError(std::io::Error),
  JoinError(tokio::task::JoinError),
  MutexPoisoned(String),
}
