/// Trimmed lines of a list file, without blank lines and `#` or `;` comments.
pub(crate) fn significant_lines(text: &str) -> impl Iterator<Item = &str> {
  text.lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with(';'))
}
