mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use upkg_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config = Config::load()?;

    match cli.command {
        cli::Commands::New(args) => commands::new::handle(args, &config).await,
        cli::Commands::Search {
            query,
            include_installed,
            format,
            project,
        } => commands::search::handle(query, include_installed, &format, project, &config).await,
        cli::Commands::Config { path } => commands::config::handle(path, &config),
        cli::Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
