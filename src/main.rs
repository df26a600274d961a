use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use r2beat_patcher::{Error, PatcherBuilder, ProgressEvent, DEFAULT_CDN_BASE};

#[derive(Parser)]
#[command(name = "r2beat_patcher", version, about = "Keeps an R2Beat installation up to date")]
struct Cli {
  /// Directory of the installed game
  #[arg(long, default_value = ".")]
  install_root: PathBuf,
  #[arg(long, default_value = DEFAULT_CDN_BASE)]
  cdn: String,
  /// Where lists are cached and files staged, defaults to `{install_root}/patch`
  #[arg(long)]
  work_dir: Option<PathBuf>,
  #[arg(long, default_value_t = 3)]
  concurrency: usize,
  /// Verify SHA256 checksums listed next to the files
  #[arg(long)]
  verify_checksums: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Lists the versions published after the installed one
  Check,
  /// Installs the given versions, or every pending one when none are given
  Update {
    versions: Vec<String>,
  },
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
  match run(Cli::parse()).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(error) => {
      error!("{}", error);
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> Result<(), Error> {
  let mut builder = PatcherBuilder::new();
  builder
    .set_install_root(cli.install_root)
    .set_cdn_base(cli.cdn)
    .set_concurrency(cli.concurrency)
    .set_verify_checksums(cli.verify_checksums)
    .set_progress_callback(Arc::new(|event: &ProgressEvent| {
      info!("{:>6.2}% {:?} {}", event.percent, event.stage, event.target_file_name.as_deref().unwrap_or(""));
    }));
  if let Some(work_dir) = cli.work_dir {
    builder.set_work_dir(work_dir);
  }
  let patcher = builder.build()?;

  match cli.command {
    Command::Check => {
      for version in patcher.check_for_update().await? {
        println!("{}", version);
      }
    },
    Command::Update { versions } => {
      let versions = if versions.is_empty() { patcher.check_for_update().await? } else { versions };
      if versions.is_empty() {
        info!("Already up to date");
        return Ok(());
      }
      info!("Updating to {}", versions.join(", "));
      patcher.run(&versions).await?;
    },
  }
  Ok(())
}
