use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cukraren::app::AppContext;
use cukraren::cli::{commands, Cli, Commands};
use cukraren::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Products { action } => commands::products(&ctx, action).await?,
        Commands::News { action } => commands::news(&ctx, action).await?,
        Commands::Gallery { action } => commands::gallery(&ctx, action).await?,
        Commands::Settings { action } => commands::settings(&ctx, action).await?,
        Commands::Cache { action } => commands::cache(&ctx, action)?,
    }

    Ok(())
}
