use std::path::{Component, Path, PathBuf};

use crate::structures::Error;

/// Splits a relative target such as `PatchInfo\DeleteFileList.dat` on either separator.
/// Returns the directory under `root` the file lives in, and the file name.
pub fn split_target_path(root: &Path, target: &str) -> Result<(PathBuf, String), Error> {
  let mut segments : Vec<&str> = target
    .split(|c| c == '/' || c == '\\')
    .filter(|segment| !segment.is_empty() && *segment != ".")
    .collect();
  if segments.iter().any(|segment| !is_plain_segment(segment)) {
    return Err(Error::InvalidInput(format!("{} points outside of {}", target, root.display())));
  }
  let file_name = segments.pop().ok_or_else(|| Error::InvalidInput(format!("\"{}\" does not name a file", target)))?;
  let mut directory = root.to_path_buf();
  directory.extend(segments);
  Ok((directory, file_name.to_string()))
}

/// A single file or directory name: no parent reference, drive prefix or root.
fn is_plain_segment(segment: &str) -> bool {
  if segment.contains(':') {
    return false;
  }
  let mut components = Path::new(segment).components();
  matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Full path of a relative target under `root`.
pub fn target_path(root: &Path, target: &str) -> Result<PathBuf, Error> {
  let (directory, file_name) = split_target_path(root, target)?;
  Ok(directory.join(file_name))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_file_stays_in_root() {
    let (directory, file_name) = split_target_path(Path::new("/staging"), "Game.exe").unwrap();
    assert_eq!(directory, PathBuf::from("/staging"));
    assert_eq!(file_name, "Game.exe");
  }

  #[test]
  fn both_separators_create_subdirectories() {
    let path = target_path(Path::new("/staging"), "PatchInfo\\sub/DeleteFileList.dat").unwrap();
    assert_eq!(path, Path::new("/staging").join("PatchInfo").join("sub").join("DeleteFileList.dat"));
  }

  #[test]
  fn empty_segments_are_ignored() {
    let path = target_path(Path::new("/staging"), "/Data//./a.pak").unwrap();
    assert_eq!(path, Path::new("/staging").join("Data").join("a.pak"));
  }

  #[test]
  fn parent_segments_are_rejected() {
    assert!(matches!(target_path(Path::new("/staging"), "..\\Windows\\evil.dll"), Err(Error::InvalidInput(_))));
    assert!(matches!(target_path(Path::new("/staging"), "//"), Err(Error::InvalidInput(_))));
  }

  #[test]
  fn drive_prefixes_are_rejected() {
    assert!(matches!(target_path(Path::new("/staging"), "C:\\Windows\\x.dll"), Err(Error::InvalidInput(_))));
    assert!(matches!(target_path(Path::new("/staging"), "Data/D:x.pak"), Err(Error::InvalidInput(_))));
  }
}
