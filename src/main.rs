//! ACME Bot - company chatbot relay
//!
#![doc = "ACME Bot - company chatbot relay"]
#![doc = "Main entry point for the ACME Bot server and terminal chat."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use acme_bot::cli::{Cli, Commands};
use acme_bot::commands;
use acme_bot::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            commands::run_serve(config).await?;
            Ok(())
        }
        Commands::Chat { .. } => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "acme_bot=debug,tower_http=debug"
    } else {
        "acme_bot=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
