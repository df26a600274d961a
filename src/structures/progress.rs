use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Download,
  Decompress,
  Skip,
}

/// What the progress sink receives.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
  /// 0..=100 over the whole run
  pub percent: f64,
  pub stage: Stage,
  pub target_file_name: Option<String>,
  pub message: Option<String>,
}

pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Per entry download and decompress fractions, both in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressState {
  pub(crate) download: Vec<f64>,
  pub(crate) decompress: Vec<f64>,
}

/// Owns the progress state of one run and throttles what reaches the callback.
pub(crate) struct ProgressTracker {
  pub(crate) state: ProgressState,
  pub(crate) interval: Duration,
  pub(crate) last_emit: Option<Instant>,
  pub(crate) callback: ProgressCallback,
}
