/// Relative paths of obsolete files, read from a staged `DeleteFileList.dat`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteFileList {
  /// Entries with separators normalized to `/`, in file order
  pub entries: Vec<String>,
}
