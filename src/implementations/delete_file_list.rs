use crate::functions::significant_lines;
use crate::structures::DeleteFileList;

/// Name of the file, in any case, carrying the delete list inside a patch.
pub(crate) const DELETE_FILE_LIST_NAME : &str = "deletefilelist.dat";

impl DeleteFileList {
  pub fn parse(text: &str) -> Self {
    Self {
      entries: significant_lines(text).map(normalize_separators).collect(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Whether a staged relative path is named by the list, either exactly or as a trailing path.
  pub fn matches(&self, relative_path: &str) -> bool {
    let relative_path = normalize_separators(relative_path);
    self.entries.iter().any(|entry| {
      relative_path == *entry || relative_path.ends_with(&format!("/{}", entry))
    })
  }

  pub(crate) fn is_delete_file_list(file_name: &str) -> bool {
    file_name.to_lowercase() == DELETE_FILE_LIST_NAME
  }
}

pub(crate) fn normalize_separators(path: &str) -> String {
  path.replace('\\', "/")
}
