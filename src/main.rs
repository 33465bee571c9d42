//! Tablet Configurator - Main Entry Point
//!
//! Native configuration client for the StoryTablet driver.

use clap::Parser;
use tablet_configurator::app::application::run;
use tablet_configurator::app::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await
}
