use std::path::Path;

use crate::structures::{DeleteFileList, Document, Error, IniDocument};

/// Decodes a file by its extension: `.ini` files and `.dat` delete lists.
pub fn decode_document(file_name: &str, text: &str) -> Result<Document, Error> {
  let extension = Path::new(file_name)
    .extension()
    .and_then(|extension| extension.to_str())
    .map(str::to_lowercase);
  match extension.as_deref() {
    Some("ini") => Ok(Document::Ini(IniDocument::decode(text)?)),
    Some("dat") => Ok(Document::DeleteFileList(DeleteFileList::parse(text))),
    _ => Err(Error::Format(format!("{} is neither an .ini nor a .dat file", file_name))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_codec_from_extension() {
    assert!(matches!(decode_document("PatchInfo/Patch.INI", "[patch]\nversion=1"), Ok(Document::Ini(_))));
    assert!(matches!(decode_document("DeleteFileList.dat", "a.txt"), Ok(Document::DeleteFileList(list)) if list.entries == vec!["a.txt".to_string()]));
  }

  #[test]
  fn malformed_ini_is_a_format_error() {
    assert!(matches!(decode_document("Patch.ini", "[patch"), Err(Error::Format(_))));
  }

  #[test]
  fn unknown_extensions_are_format_errors() {
    assert!(matches!(decode_document("config.json", "{}"), Err(Error::Format(_))));
    assert!(matches!(decode_document("README", ""), Err(Error::Format(_))));
  }
}
