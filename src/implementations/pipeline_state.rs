use crate::structures::PipelineState;

impl PipelineState {
  /// A run has entered a stage and hasn't reached `Done` or `Failed` yet.
  pub fn is_running(&self) -> bool {
    matches!(self, Self::ResolvingManifest | Self::Fetching | Self::Applying)
  }

  /// Stages only move forward. Resolving may start over from any state, overlapping runs are kept out by the patcher.
  pub fn can_transition_to(&self, next: &PipelineState) -> bool {
    match (self, next) {
      (_, Self::Failed(_)) => self.is_running(),
      (_, Self::ResolvingManifest) => true,
      (Self::ResolvingManifest, Self::Fetching) => true,
      (Self::Fetching, Self::Applying) => true,
      (Self::Applying, Self::Done) => true,
      _ => false,
    }
  }
}

impl std::fmt::Display for PipelineState {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Self::Idle => write!(f, "idle"),
      Self::ResolvingManifest => write!(f, "resolving manifest"),
      Self::Fetching => write!(f, "fetching"),
      Self::Applying => write!(f, "applying"),
      Self::Done => write!(f, "done"),
      Self::Failed(reason) => write!(f, "failed: {}", reason),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stages_only_move_forward() {
    assert!(PipelineState::Idle.can_transition_to(&PipelineState::ResolvingManifest));
    assert!(PipelineState::ResolvingManifest.can_transition_to(&PipelineState::Fetching));
    assert!(PipelineState::Fetching.can_transition_to(&PipelineState::Applying));
    assert!(PipelineState::Applying.can_transition_to(&PipelineState::Done));
    assert!(!PipelineState::Applying.can_transition_to(&PipelineState::Fetching));
    assert!(!PipelineState::Idle.can_transition_to(&PipelineState::Applying));
  }

  #[test]
  fn failed_runs_restart_from_resolving() {
    let failed = PipelineState::Failed("HTTP 404".to_string());
    assert!(failed.can_transition_to(&PipelineState::ResolvingManifest));
    assert!(!failed.can_transition_to(&PipelineState::Fetching));
    assert!(PipelineState::Fetching.can_transition_to(&failed));
    assert!(!PipelineState::Done.can_transition_to(&failed));
  }

  #[test]
  fn resolving_can_be_repeated() {
    assert!(PipelineState::ResolvingManifest.can_transition_to(&PipelineState::ResolvingManifest));
    assert!(PipelineState::Fetching.can_transition_to(&PipelineState::ResolvingManifest));
  }
}
