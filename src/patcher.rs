use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, instrument, warn};

use crate::functions::{
  self, apply_patch_files, fetch_and_decompress, fetch_remote_version, human_readable_bytesize, is_version_token, pending_versions, read_ini_file, write_ini_file,
  PATCH_SECTION, VERSION_KEY,
};
use crate::structures::{ApplyOptions, Error, FetchOptions, IniDocument, Manifest, PipelineState, ProgressCallback};
use crate::traits::HttpClient;

const CACHE_DIR_NAME : &str = "lst";
const STAGING_DIR_NAME : &str = "file";
const INSTALL_CONFIG_NAME : &str = "config.ini";

/// Drives one installation from the published patch lists to an updated game.
/// Build it with `PatcherBuilder`.
pub struct Patcher {
  pub(crate) cdn_base: String,
  pub(crate) install_root: PathBuf,
  pub(crate) work_dir: PathBuf,
  pub(crate) version_info_url: String,
  pub(crate) keep_latest_only: bool,
  pub(crate) fetch_options: FetchOptions,
  pub(crate) apply_options: ApplyOptions,
  pub(crate) http_client: Arc<dyn HttpClient>,
  pub(crate) progress_callback: ProgressCallback,
  pub(crate) state: Mutex<PipelineState>,
  pub(crate) in_progress: Arc<AtomicBool>,
}

/// Clears the in progress flag when dropped.
struct RunGuard {
  in_progress: Arc<AtomicBool>,
}

impl Drop for RunGuard {
  fn drop(&mut self) {
    self.in_progress.store(false, Ordering::SeqCst);
  }
}

impl Patcher {
  pub fn state(&self) -> Result<PipelineState, Error> {
    Ok(self.state.lock()?.clone())
  }

  pub fn cache_dir(&self) -> PathBuf {
    self.work_dir.join(CACHE_DIR_NAME)
  }

  pub fn staging_dir(&self) -> PathBuf {
    self.work_dir.join(STAGING_DIR_NAME)
  }

  /// Resolves the lists of `versions` into one manifest.
  pub async fn resolve_manifest<S: AsRef<str> + std::fmt::Debug>(&self, versions: &[S]) -> Result<Manifest, Error> {
    let _guard = self.start_run()?;
    self.resolve_stage(versions).await
  }

  /// Downloads and decompresses a resolved manifest into the staging directory.
  pub async fn fetch_and_decompress(&self, manifest: &Manifest) -> Result<Vec<PathBuf>, Error> {
    let _guard = self.start_run()?;
    self.fetch_stage(manifest).await
  }

  /// Moves the staged files into the installation and records `new_version`.
  /// The work directory is removed afterwards.
  pub async fn apply(&self, new_version: &str) -> Result<(), Error> {
    let _guard = self.start_run()?;
    self.apply_stage(new_version).await
  }

  /// The whole pipeline for `versions`, the last one of them is recorded as the installed version.
  #[instrument(skip(self))]
  pub async fn run<S: AsRef<str> + std::fmt::Debug>(&self, versions: &[S]) -> Result<(), Error> {
    let _guard = self.start_run()?;
    let new_version = versions.iter()
      .map(|version| version.as_ref())
      .filter(|version| is_version_token(version))
      .last()
      .map(str::to_string);
    let manifest = self.resolve_stage(versions).await?;
    let new_version = match new_version {
      Some(new_version) => new_version,
      None => return Err(Error::InvalidInput("no valid version to install".to_string())),
    };
    self.fetch_stage(&manifest).await?;
    self.apply_stage(&new_version).await
  }

  /// Versions published after the installed one, oldest first. Empty when up to date.
  #[instrument(skip(self))]
  pub async fn check_for_update(&self) -> Result<Vec<String>, Error> {
    let installed = self.installed_version().await?;
    let remote = fetch_remote_version(self.http_client.as_ref(), &self.version_info_url).await?;
    let pending = pending_versions(&installed, &remote)?;
    info!("Installed version {}, published version {}, {} pending", installed, remote, pending.len());
    Ok(pending)
  }

  /// The version record of the installation, which must have a `[patch]` section.
  pub async fn read_patch_info(&self) -> Result<IniDocument, Error> {
    let document = read_ini_file(&self.install_root.join(&self.apply_options.version_record_path)).await?;
    if document.section(PATCH_SECTION).is_none() {
      return Err(Error::Format(format!("{} has no [{}] section", self.apply_options.version_record_path.display(), PATCH_SECTION)));
    }
    Ok(document)
  }

  pub async fn installed_version(&self) -> Result<String, Error> {
    self.read_patch_info().await?
      .get(PATCH_SECTION, VERSION_KEY)
      .map(ToString::to_string)
      .ok_or_else(|| Error::Format(format!("[{}] has no {}", PATCH_SECTION, VERSION_KEY)))
  }

  pub async fn read_install_config(&self) -> Result<IniDocument, Error> {
    read_ini_file(&self.install_root.join(INSTALL_CONFIG_NAME)).await
  }

  pub async fn write_install_config(&self, document: &IniDocument) -> Result<(), Error> {
    write_ini_file(&self.install_root.join(INSTALL_CONFIG_NAME), document).await
  }

  fn start_run(&self) -> Result<RunGuard, Error> {
    if self.in_progress.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
      return Err(Error::InvalidInput("an update is already in progress".to_string()));
    }
    Ok(RunGuard { in_progress: self.in_progress.clone() })
  }

  async fn resolve_stage<S: AsRef<str> + std::fmt::Debug>(&self, versions: &[S]) -> Result<Manifest, Error> {
    self.stage(PipelineState::ResolvingManifest, async {
      let manifest = functions::resolve_manifest(
        self.http_client.as_ref(),
        &self.cdn_base,
        versions,
        self.keep_latest_only,
        &self.cache_dir(),
      ).await?;
      info!("Manifest holds {} files, {}", manifest.len(), human_readable_bytesize(manifest.total_size));
      Ok::<_, Error>(manifest)
    }).await
  }

  async fn fetch_stage(&self, manifest: &Manifest) -> Result<Vec<PathBuf>, Error> {
    self.stage(PipelineState::Fetching, fetch_and_decompress(
      self.http_client.as_ref(),
      manifest,
      &self.staging_dir(),
      &self.fetch_options,
      self.progress_callback.clone(),
    )).await
  }

  async fn apply_stage(&self, new_version: &str) -> Result<(), Error> {
    self.stage(PipelineState::Applying, async {
      apply_patch_files(&self.staging_dir(), &self.install_root, new_version, &self.apply_options).await?;
      match tokio::fs::remove_dir_all(&self.work_dir).await {
        Err(error) if error.kind() != ErrorKind::NotFound => warn!("Couldn't remove {}: {}", self.work_dir.display(), error),
        _ => {},
      }
      Ok::<_, Error>(())
    }).await?;
    self.transition(PipelineState::Done)
  }

  /// Enters `next`, runs `work` and marks the pipeline failed if it errors.
  async fn stage<T>(&self, next: PipelineState, work: impl Future<Output = Result<T, Error>>) -> Result<T, Error> {
    self.transition(next)?;
    match work.await {
      Ok(value) => Ok(value),
      Err(error) => {
        self.transition(PipelineState::Failed(error.to_string()))?;
        Err(error)
      }
    }
  }

  fn transition(&self, next: PipelineState) -> Result<(), Error> {
    let mut state = self.state.lock()?;
    if !state.can_transition_to(&next) {
      return Err(Error::InvalidInput(format!("can't move from {} to {}", state, next)));
    }
    info!("{} -> {}", state, next);
    *state = next;
    Ok(())
  }
}
