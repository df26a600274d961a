/// One row of a version list: a single file of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchEntry {
  /// Version the row was published under, e.g. "00026"
  pub version: String,
  /// Name of the compressed artifact on the cdn
  pub patch_file_name: String,
  /// Relative path of the file to materialize, may contain `/` or `\`
  pub target_file_name: String,
  pub original_size: u64,
  pub compressed_size: u64,
  /// Opaque, only checked when checksum verification is enabled
  pub checksum: Option<String>,
  /// `{base}/{version}/{patch_file_name}`
  pub download_url: String,
}
