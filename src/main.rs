use anyhow::Result;
use clap::Parser;
use leavebook::cli::Cli;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "leavebook=debug"
    } else {
        "leavebook=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.run().await
}
