use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::structures::Error;

/// Opens a file and calculates its SHA256 hash, upper case hex.
pub(crate) fn get_hash(file_path: &Path) -> Result<String, Error> {
  let mut file = File::open(file_path)?;
  let mut hasher = Sha256::new();
  let mut buffer = [0u8; 4096];
  loop {
    let read = file.read(&mut buffer)?;
    if read == 0 {
      break;
    }
    hasher.update(&buffer[..read]);
  }
  Ok(hex::encode_upper(hasher.finalize()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hashes_file_contents() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("abc");
    std::fs::write(&path, b"abc").unwrap();
    assert_eq!(get_hash(&path).unwrap(), "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD");
  }
}
