mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{FunctionArgs, cmd_build, cmd_build_all, cmd_info, cmd_plan};
use output::OutputFormat;

/// fnpack - Bundle serverless function code with webpack
#[derive(Parser)]
#[command(name = "fnpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Log level filter (e.g. debug, fnpack_lib=trace); falls back to RUST_LOG
  #[arg(long, global = true)]
  log_level: Option<String>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bundle one function
  Build(FunctionArgs),

  /// Show output paths and bundler arguments without building
  Plan(FunctionArgs),

  /// Bundle every function listed in a manifest, concurrently
  BuildAll {
    /// Path to the manifest file
    #[arg(default_value = "fnpack.json")]
    manifest: PathBuf,

    /// Maximum number of concurrent builds [default: number of CPUs]
    #[arg(short = 'j', long)]
    parallelism: Option<usize>,
  },

  /// Show version, default runtime, and bundler location
  Info,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.log_level.as_deref());

  match &cli.command {
    Commands::Build(args) => cmd_build(args, cli.output),
    Commands::Plan(args) => cmd_plan(args, cli.output),
    Commands::BuildAll { manifest, parallelism } => cmd_build_all(manifest, *parallelism, cli.output),
    Commands::Info => cmd_info(cli.output),
  }
}

fn init_tracing(level: Option<&str>) {
  let filter = match level {
    Some(level) => EnvFilter::new(level),
    None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
