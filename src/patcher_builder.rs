use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::debug;

use crate::implementations::{DEFAULT_CONCURRENCY, DEFAULT_PROGRESS_INTERVAL, DEFAULT_VERSION_RECORD_PATH};
use crate::patcher::Patcher;
use crate::structures::{ApplyOptions, Error, FetchOptions, PipelineState, ProgressCallback, ProgressEvent, ReqwestHttpClient, RetryPolicy};
use crate::traits::{HttpClient, ProcessGuard};

pub const DEFAULT_CDN_BASE : &str = "https://r2beat-cdn.xiyouxi.com/live/vpatch";
const VERSION_INFO_FILE : &str = "patchVersionInfo.txt";
const WORK_DIR_NAME : &str = "patch";

pub struct PatcherBuilder {
  pub(crate) cdn_base: String,
  pub(crate) install_root: Option<PathBuf>,
  pub(crate) work_dir: Option<PathBuf>,
  pub(crate) version_info_url: Option<String>,
  pub(crate) concurrency: usize,
  pub(crate) progress_interval: Duration,
  pub(crate) delete_retry: RetryPolicy,
  pub(crate) copy_retry: RetryPolicy,
  pub(crate) verify_checksums: bool,
  pub(crate) keep_latest_only: bool,
  pub(crate) version_record_path: PathBuf,
  pub(crate) http_client: Option<Arc<dyn HttpClient>>,
  pub(crate) process_guard: Option<Arc<dyn ProcessGuard>>,
  pub(crate) progress_callback: Option<ProgressCallback>,
}

impl Default for PatcherBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl PatcherBuilder {
  pub fn new() -> Self {
    Self {
      cdn_base: DEFAULT_CDN_BASE.to_string(),
      install_root: None,
      work_dir: None,
      version_info_url: None,
      concurrency: DEFAULT_CONCURRENCY,
      progress_interval: DEFAULT_PROGRESS_INTERVAL,
      delete_retry: RetryPolicy::delete(),
      copy_retry: RetryPolicy::copy(),
      verify_checksums: false,
      keep_latest_only: true,
      version_record_path: PathBuf::from(DEFAULT_VERSION_RECORD_PATH),
      http_client: None,
      process_guard: None,
      progress_callback: None,
    }
  }

  pub fn set_cdn_base(&mut self, cdn_base: String) -> &mut Self {
    self.cdn_base = cdn_base;
    self
  }

  /// Directory of the installed game, required.
  pub fn set_install_root(&mut self, install_root: PathBuf) -> &mut Self {
    self.install_root = Some(install_root);
    self
  }

  /// Holds cached lists and staged files, `{install_root}/patch` unless set.
  pub fn set_work_dir(&mut self, work_dir: PathBuf) -> &mut Self {
    self.work_dir = Some(work_dir);
    self
  }

  pub fn set_version_info_url(&mut self, version_info_url: String) -> &mut Self {
    self.version_info_url = Some(version_info_url);
    self
  }

  pub fn set_concurrency(&mut self, concurrency: usize) -> &mut Self {
    self.concurrency = concurrency;
    self
  }

  pub fn set_progress_interval(&mut self, progress_interval: Duration) -> &mut Self {
    self.progress_interval = progress_interval;
    self
  }

  pub fn set_delete_retry(&mut self, delete_retry: RetryPolicy) -> &mut Self {
    self.delete_retry = delete_retry;
    self
  }

  pub fn set_copy_retry(&mut self, copy_retry: RetryPolicy) -> &mut Self {
    self.copy_retry = copy_retry;
    self
  }

  pub fn set_verify_checksums(&mut self, verify_checksums: bool) -> &mut Self {
    self.verify_checksums = verify_checksums;
    self
  }

  /// Whether only the newest entry per target file is fetched, on by default.
  pub fn set_keep_latest_only(&mut self, keep_latest_only: bool) -> &mut Self {
    self.keep_latest_only = keep_latest_only;
    self
  }

  pub fn set_version_record_path(&mut self, version_record_path: PathBuf) -> &mut Self {
    self.version_record_path = version_record_path;
    self
  }

  pub fn set_http_client(&mut self, http_client: Arc<dyn HttpClient>) -> &mut Self {
    self.http_client = Some(http_client);
    self
  }

  pub fn set_process_guard(&mut self, process_guard: Arc<dyn ProcessGuard>) -> &mut Self {
    self.process_guard = Some(process_guard);
    self
  }

  pub fn set_progress_callback(&mut self, progress_callback: ProgressCallback) -> &mut Self {
    self.progress_callback = Some(progress_callback);
    self
  }

  pub fn build(self) -> Result<Patcher, Error> {
    let cdn_base = url::Url::parse(&self.cdn_base)?;
    if cdn_base.cannot_be_a_base() {
      return Err(Error::InvalidInput(format!("{} can't be used as a base url", self.cdn_base)));
    }
    let cdn_base = self.cdn_base.trim_end_matches('/').to_string();
    let install_root = self.install_root
      .ok_or_else(|| Error::InvalidInput("no installation directory was set".to_string()))?;
    let work_dir = self.work_dir.unwrap_or_else(|| install_root.join(WORK_DIR_NAME));
    let version_info_url = self.version_info_url.unwrap_or_else(|| format!("{}/{}", cdn_base, VERSION_INFO_FILE));
    url::Url::parse(&version_info_url)?;
    if self.concurrency == 0 {
      return Err(Error::InvalidInput("concurrency must be at least 1".to_string()));
    }
    let http_client : Arc<dyn HttpClient> = match self.http_client {
      Some(http_client) => http_client,
      None => Arc::new(ReqwestHttpClient::new()?),
    };
    let mut apply_options = ApplyOptions {
      delete_retry: self.delete_retry,
      copy_retry: self.copy_retry,
      version_record_path: self.version_record_path,
      ..ApplyOptions::default()
    };
    if let Some(process_guard) = self.process_guard {
      apply_options.process_guard = process_guard;
    }
    let progress_callback : ProgressCallback = match self.progress_callback {
      Some(progress_callback) => progress_callback,
      None => Arc::new(|event: &ProgressEvent| {
        debug!("{:.2}% {:?} {}", event.percent, event.stage, event.target_file_name.as_deref().unwrap_or(""));
      }),
    };

    Ok(Patcher {
      cdn_base,
      install_root,
      work_dir,
      version_info_url,
      keep_latest_only: self.keep_latest_only,
      fetch_options: FetchOptions {
        concurrency: self.concurrency,
        progress_interval: self.progress_interval,
        verify_checksums: self.verify_checksums,
      },
      apply_options,
      http_client,
      progress_callback,
      state: Mutex::new(PipelineState::Idle),
      in_progress: Arc::new(AtomicBool::new(false)),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn builder() -> PatcherBuilder {
    let mut builder = PatcherBuilder::new();
    builder.set_install_root(PathBuf::from("/games/r2beat"));
    builder
  }

  #[test]
  fn defaults_follow_the_launcher() {
    let patcher = builder().build().unwrap();
    assert_eq!(patcher.cdn_base, DEFAULT_CDN_BASE);
    assert_eq!(patcher.work_dir, PathBuf::from("/games/r2beat").join("patch"));
    assert_eq!(patcher.version_info_url, format!("{}/patchVersionInfo.txt", DEFAULT_CDN_BASE));
    assert_eq!(patcher.fetch_options, FetchOptions::default());
    assert_eq!(patcher.apply_options.delete_retry, RetryPolicy::delete());
    assert_eq!(patcher.apply_options.copy_retry, RetryPolicy::copy());
  }

  #[test]
  fn trailing_slash_is_dropped_from_the_cdn() {
    let mut builder = builder();
    builder.set_cdn_base("http://localhost:8080/vpatch/".to_string());
    let patcher = builder.build().unwrap();
    assert_eq!(patcher.cdn_base, "http://localhost:8080/vpatch");
    assert_eq!(patcher.version_info_url, "http://localhost:8080/vpatch/patchVersionInfo.txt");
  }

  #[test]
  fn invalid_configuration_is_refused() {
    let mut invalid_url = builder();
    invalid_url.set_cdn_base("not a url".to_string());
    assert!(matches!(invalid_url.build(), Err(Error::InvalidUrl(_))));

    assert!(matches!(PatcherBuilder::new().build(), Err(Error::InvalidInput(_))));

    let mut no_workers = builder();
    no_workers.set_concurrency(0);
    assert!(matches!(no_workers.build(), Err(Error::InvalidInput(_))));
  }
}
