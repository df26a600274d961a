use crate::structures::PatchEntry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
  pub patches: Vec<PatchEntry>,
  /// Sum of `original_size` over `patches`
  pub total_size: u64,
}
