//! sawari-collect binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered
//! under `SAWARI_*` environment variables, then either runs one live
//! ingestion batch or replays a previously written batch artifact.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod artifact;
mod error;
mod run;
mod settings;
mod sources;

use settings::CollectConfig;

#[derive(Parser)]
#[command(author, version, about = "Sawari transport-sentiment collector")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run one ingestion batch end to end.
  Collect,
  /// Replay a batch artifact through the insert + refresh path.
  Replay {
    /// Artifact JSON written by a previous `collect` run.
    file: PathBuf,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SAWARI"))
    .build()
    .context("failed to read config file")?;

  let cfg: CollectConfig = settings
    .try_deserialize()
    .context("failed to deserialise CollectConfig")?;

  match cli.command {
    Command::Collect => run::run_collect(&cfg).await,
    Command::Replay { file } => run::run_replay(&cfg, &file).await,
  }
}
