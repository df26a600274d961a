use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{instrument, warn};
use xz2::read::XzDecoder;
use xz2::stream::Stream;

use crate::structures::Error;

/// Reports how much of the source has been consumed.
struct CountingReader<R, F> {
  inner: R,
  read: u64,
  total: u64,
  on_progress: F,
}

impl<R: Read, F: FnMut(f64) -> std::io::Result<()>> Read for CountingReader<R, F> {
  fn read(&mut self, buffer: &mut [u8]) -> std::io::Result<usize> {
    let read = self.inner.read(buffer)?;
    self.read += read as u64;
    if self.total > 0 {
      (self.on_progress)(self.read as f64 / self.total as f64)?;
    }
    Ok(read)
  }
}

/// Decodes an `.lzma` file into `destination`. Blocking, run it on the blocking pool.
/// A failed decode removes whatever was written to `destination`.
#[instrument(skip(on_progress))]
pub(crate) fn decompress_file(
  source: &Path,
  destination: &Path,
  on_progress: impl FnMut(f64) -> std::io::Result<()>,
) -> Result<u64, Error> {
  decode(source, destination, on_progress).map_err(|error| {
    if let Err(remove_error) = std::fs::remove_file(destination) {
      if remove_error.kind() != std::io::ErrorKind::NotFound {
        warn!("Couldn't remove partial output {}: {}", destination.display(), remove_error);
      }
    }
    Error::Decompress { path: PathBuf::from(source), message: error.to_string() }
  })
}

fn decode(source: &Path, destination: &Path, on_progress: impl FnMut(f64) -> std::io::Result<()>) -> std::io::Result<u64> {
  let file = File::open(source)?;
  let total = file.metadata()?.len();
  let reader = CountingReader { inner: file, read: 0, total, on_progress };
  let stream = Stream::new_lzma_decoder(u64::MAX).map_err(std::io::Error::other)?;
  let mut decoder = XzDecoder::new_stream(reader, stream);
  let mut writer = BufWriter::new(File::create(destination)?);
  let written = std::io::copy(&mut decoder, &mut writer)?;
  writer.flush()?;
  Ok(written)
}
