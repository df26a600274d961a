/// Convert a raw bytesize into a human readable string, e.g. 4_248_578 returns 4.25 MB
pub fn human_readable_bytesize(num: u64) -> String {
  const UNITS : [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
  const DELIMITER : f64 = 1000_f64;

  let num = num as f64;
  if num < DELIMITER {
    return format!("{} B", num);
  }
  let exponent = std::cmp::min((num.ln() / DELIMITER.ln()).floor() as i32, (UNITS.len() - 1) as i32);
  let pretty_bytes = (num / DELIMITER.powi(exponent) * 100.0).round() / 100.0;
  format!("{} {}", pretty_bytes, UNITS[exponent as usize])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn picks_the_largest_fitting_unit() {
    assert_eq!(human_readable_bytesize(4_248_578_547), "4.25 GB");
    assert_eq!(human_readable_bytesize(4_248_578), "4.25 MB");
    assert_eq!(human_readable_bytesize(1_500), "1.5 kB");
  }

  #[test]
  fn small_sizes_stay_in_bytes() {
    assert_eq!(human_readable_bytesize(0), "0 B");
    assert_eq!(human_readable_bytesize(999), "999 B");
  }
}
