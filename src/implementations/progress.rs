use std::time::{Duration, Instant};

use tracing::trace;

use crate::structures::{ProgressCallback, ProgressEvent, ProgressState, ProgressTracker, Stage};

impl ProgressState {
  pub fn new(entries: usize) -> Self {
    Self {
      download: vec![0.0; entries],
      decompress: vec![0.0; entries],
    }
  }

  /// Fractions never move backwards, a lower value than the current one is ignored.
  pub fn set(&mut self, index: usize, download: f64, decompress: f64) {
    if let Some(current) = self.download.get_mut(index) {
      *current = current.max(download.clamp(0.0, 1.0));
    }
    if let Some(current) = self.decompress.get_mut(index) {
      *current = current.max(decompress.clamp(0.0, 1.0));
    }
  }

  pub fn fractions(&self, index: usize) -> Option<(f64, f64)> {
    Some((*self.download.get(index)?, *self.decompress.get(index)?))
  }

  /// Mean over all entries of half the download plus half the decompress fraction, in percent.
  pub fn percent(&self) -> f64 {
    if self.download.is_empty() {
      return 100.0;
    }
    let sum : f64 = self.download.iter()
      .zip(self.decompress.iter())
      .map(|(download, decompress)| download * 0.5 + decompress * 0.5)
      .sum();
    let percent = (sum / self.download.len() as f64 * 100.0 * 100.0).round() / 100.0;
    percent.min(100.0)
  }
}

impl ProgressTracker {
  pub(crate) fn new(entries: usize, interval: Duration, callback: ProgressCallback) -> Self {
    Self {
      state: ProgressState::new(entries),
      interval,
      last_emit: None,
      callback,
    }
  }

  pub(crate) fn update(&mut self, index: usize, stage: Stage, download: f64, decompress: f64, target_file_name: Option<&str>, message: &str) {
    self.state.set(index, download, decompress);
    let percent = self.state.percent();
    if percent < 100.0 {
      if let Some(last_emit) = self.last_emit {
        if last_emit.elapsed() < self.interval {
          trace!("Throttled progress event at {}%", percent);
          return;
        }
      }
    }
    self.emit(stage, target_file_name, message);
  }

  /// Delivers the current percentage regardless of the throttle.
  pub(crate) fn emit(&mut self, stage: Stage, target_file_name: Option<&str>, message: &str) {
    self.last_emit = Some(Instant::now());
    (self.callback)(&ProgressEvent {
      percent: self.state.percent(),
      stage,
      target_file_name: target_file_name.map(str::to_string),
      message: Some(message.to_string()),
    });
  }
}
