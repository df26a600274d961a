#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
  Idle,
  ResolvingManifest,
  Fetching,
  Applying,
  Done,
  Failed(String),
}
