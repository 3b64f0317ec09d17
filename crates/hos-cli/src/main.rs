//! hos-setup - HarmonyOS SDK provisioning CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hos_cli::cmd;
use hos_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let dry_run = cli.dry_run;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Setup(args) => cmd::setup::setup(args, dry_run, quiet).await,
        Commands::Layout { root, version } => cmd::layout::layout(root, version.as_deref()),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
