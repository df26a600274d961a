use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tracing::{error, info, instrument, warn};

use crate::functions::{decompress_file, download_file, get_hash, human_readable_bytesize, split_target_path};
use crate::structures::{Error, FetchOptions, Manifest, PatchEntry, ProgressCallback, ProgressTracker, Stage};
use crate::traits::HttpClient;

struct Job<'a> {
  patch: &'a PatchEntry,
  output: PathBuf,
  artifact: PathBuf,
}

struct FetchContext<'a> {
  client: &'a dyn HttpClient,
  jobs: Vec<Job<'a>>,
  cursor: AtomicUsize,
  failed: AtomicBool,
  tracker: Arc<Mutex<ProgressTracker>>,
  verify_checksums: bool,
}

/// Downloads and decodes every entry of `manifest` into `staging_dir`, skipping outputs that already exist.
/// Returns the output paths in manifest order.
#[instrument(skip(client, manifest, on_progress), fields(entries = manifest.len()))]
pub async fn fetch_and_decompress(
  client: &dyn HttpClient,
  manifest: &Manifest,
  staging_dir: &Path,
  options: &FetchOptions,
  on_progress: ProgressCallback,
) -> Result<Vec<PathBuf>, Error> {
  let mut outputs = Vec::with_capacity(manifest.len());
  for patch in &manifest.patches {
    let (directory, file_name) = split_target_path(staging_dir, &patch.target_file_name)?;
    outputs.push((patch, directory, file_name));
  }
  let taken : HashSet<PathBuf> = outputs.iter().map(|(_, directory, file_name)| directory.join(file_name)).collect();
  let jobs : Vec<Job> = outputs.into_iter()
    .enumerate()
    .map(|(index, (patch, directory, file_name))| Job {
      patch,
      output: directory.join(&file_name),
      artifact: artifact_path(&directory, patch, index, &taken),
    })
    .collect();
  tokio::fs::create_dir_all(staging_dir).await?;
  info!("Fetching {} files, {} once decompressed", jobs.len(), human_readable_bytesize(manifest.total_size));

  let tracker = Arc::new(Mutex::new(ProgressTracker::new(jobs.len(), options.progress_interval, on_progress)));
  tracker.lock()?.emit(Stage::Download, None, "start");

  let workers = options.concurrency.max(1).min(jobs.len());
  let context = FetchContext {
    client,
    jobs,
    cursor: AtomicUsize::new(0),
    failed: AtomicBool::new(false),
    tracker,
    verify_checksums: options.verify_checksums,
  };
  let results = join_all((0..workers).map(|worker| context.work(worker))).await;
  if let Some(error) = results.into_iter().find_map(Result::err) {
    return Err(error);
  }

  context.tracker.lock()?.emit(Stage::Decompress, None, "done");
  Ok(context.jobs.into_iter().map(|job| job.output).collect())
}

impl<'a> FetchContext<'a> {
  async fn work(&self, worker: usize) -> Result<(), Error> {
    loop {
      if self.failed.load(Ordering::SeqCst) {
        info!("Worker {} stops, another entry failed", worker);
        return Ok(());
      }
      let index = self.cursor.fetch_add(1, Ordering::SeqCst);
      let job = match self.jobs.get(index) {
        Some(job) => job,
        None => return Ok(()),
      };
      if let Err(error) = self.process(index, job).await {
        error!("{} failed: {}", job.patch.target_file_name, error);
        self.failed.store(true, Ordering::SeqCst);
        return Err(error);
      }
    }
  }

  async fn process(&self, index: usize, job: &Job<'a>) -> Result<(), Error> {
    let target = job.patch.target_file_name.as_str();
    if tokio::fs::try_exists(&job.output).await? {
      info!("{} is already staged", target);
      self.report(index, Stage::Skip, 1.0, 1.0, target, "exists")?;
      return Ok(());
    }
    if let Some(parent) = job.output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }

    info!("Downloading {} from {}", target, job.patch.download_url);
    download_file(self.client, &job.patch.download_url, &job.artifact, |fraction| {
      self.report(index, Stage::Download, fraction, 0.0, target, "downloading")
    }).await?;
    self.report(index, Stage::Download, 1.0, 0.0, target, "downloaded")?;

    let tracker = self.tracker.clone();
    let artifact = job.artifact.clone();
    let output = job.output.clone();
    let owned_target = target.to_string();
    let checksum = job.patch.checksum.clone().filter(|_| self.verify_checksums);
    tokio::task::spawn_blocking(move || -> Result<(), Error> {
      decompress_file(&artifact, &output, |fraction| {
        let mut tracker = tracker.lock().map_err(|error| std::io::Error::other(error.to_string()))?;
        tracker.update(index, Stage::Decompress, 1.0, fraction, Some(&owned_target), "decompressing");
        Ok(())
      })?;
      if let Some(checksum) = checksum {
        verify_checksum(&output, &checksum)?;
      }
      Ok(())
    }).await??;
    self.report(index, Stage::Decompress, 1.0, 1.0, target, "decompressed")?;

    if let Err(error) = tokio::fs::remove_file(&job.artifact).await {
      warn!("Couldn't remove {}: {}", job.artifact.display(), error);
    }
    Ok(())
  }

  fn report(&self, index: usize, stage: Stage, download: f64, decompress: f64, target: &str, message: &str) -> Result<(), Error> {
    self.tracker.lock()?.update(index, stage, download, decompress, Some(target), message);
    Ok(())
  }
}

/// Where an entry's payload is downloaded to. Payload names repeat across versions,
/// so the name carries the version and the entry index and never equals a staged output.
fn artifact_path(directory: &Path, patch: &PatchEntry, index: usize, taken: &HashSet<PathBuf>) -> PathBuf {
  let mut artifact = directory.join(format!("{}.{}.{}.lzma", patch.patch_file_name, patch.version, index));
  while taken.contains(&artifact) {
    let mut name = artifact.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".part");
    artifact = directory.join(name);
  }
  artifact
}

/// Compares a SHA256 checksum against the decoded file, removing the file on a mismatch.
/// Checksums of any other shape can't be verified and are ignored.
fn verify_checksum(output: &Path, expected: &str) -> Result<(), Error> {
  if expected.len() != 64 || !expected.bytes().all(|byte| byte.is_ascii_hexdigit()) {
    warn!("Checksum {} of {} isn't a SHA256 hash, not verifying it", expected, output.display());
    return Ok(());
  }
  let actual = get_hash(output)?;
  if actual.eq_ignore_ascii_case(expected) {
    return Ok(());
  }
  if let Err(error) = std::fs::remove_file(output) {
    warn!("Couldn't remove {}: {}", output.display(), error);
  }
  Err(Error::ChecksumMismatch {
    path: output.to_path_buf(),
    expected: expected.to_string(),
    actual,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn patch(version: &str) -> PatchEntry {
    PatchEntry::new(version, "00001", "a.txt", 10, 5, None, "http://cdn.test/vpatch")
  }

  #[test]
  fn artifacts_differ_between_versions() {
    let directory = Path::new("staging");
    let taken = HashSet::new();
    let older = artifact_path(directory, &patch("00025"), 0, &taken);
    let newer = artifact_path(directory, &patch("00026"), 1, &taken);
    assert_ne!(older, newer);
    assert_eq!(older, directory.join("00001.00025.0.lzma"));
  }

  #[test]
  fn artifacts_step_around_staged_outputs() {
    let directory = Path::new("staging");
    let taken : HashSet<PathBuf> = [directory.join("00001.00025.0.lzma"), directory.join("00001.00025.0.lzma.part")].into_iter().collect();
    assert_eq!(artifact_path(directory, &patch("00025"), 0, &taken), directory.join("00001.00025.0.lzma.part.part"));
  }
}
