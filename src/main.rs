use anyhow::Result;
use clap::Parser;
use sleight::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Logs go to stderr so that `--output json` stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.to_log_level().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run(args) => {
            sleight::cli::commands::run(args, verbosity)?;
        }
        Commands::Validate(args) => {
            sleight::cli::commands::validate(args, verbosity)?;
        }
    }

    Ok(())
}
