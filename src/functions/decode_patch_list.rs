use tracing::debug;

use crate::functions::significant_lines;
use crate::structures::PatchEntry;

/// Decodes a version list, one `patchFileName targetFileName originalSize compressedSize [checksum]` per line.
/// Lines with fewer than four fields are skipped, sizes that aren't numbers count as 0.
pub fn decode_patch_list(text: &str, version: &str, base_url: &str) -> Vec<PatchEntry> {
  significant_lines(text).filter_map(|line| {
    let fields : Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
      debug!("Skipping list line with {} fields: {}", fields.len(), line);
      return None;
    }
    Some(PatchEntry::new(
      version,
      fields[0],
      fields[1],
      fields[2].parse().unwrap_or(0),
      fields[3].parse().unwrap_or(0),
      fields.get(4).map(|checksum| checksum.to_string()),
      base_url,
    ))
  }).collect()
}
