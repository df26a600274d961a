use crate::structures::Error;

/// Every version after `installed` up to and including `remote`, zero padded to the width of `remote`.
pub fn pending_versions(installed: &str, remote: &str) -> Result<Vec<String>, Error> {
  let parse = |version: &str| version.trim().parse::<u64>()
    .map_err(|_| Error::Format(format!("version \"{}\" isn't a number", version)));
  let installed_number = parse(installed)?;
  let remote_number = parse(remote)?;
  let width = remote.trim().len();
  let first = match installed_number.checked_add(1) {
    Some(first) => first,
    None => return Ok(Vec::new()),
  };
  Ok((first..=remote_number)
    .map(|version| format!("{:0width$}", version, width = width))
    .collect())
}
