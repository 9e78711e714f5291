use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tusk::app::AppContext;
use tusk::cli::{commands, Cli, Commands};
use tusk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(instance) = cli.instance {
        config.instance.url = instance;
    }
    if let Some(token) = cli.token {
        config.instance.access_token = Some(token);
    }

    let ctx = AppContext::new(config, None)?;

    match cli.command {
        Commands::Mentions { mode, pages } => {
            commands::list_mentions(&ctx, mode, pages).await?;
        }
        Commands::Check { mode } => {
            commands::check_updates(&ctx, mode).await?;
        }
        Commands::Watch { mode, interval } => {
            commands::watch_mentions(&ctx, mode, interval.as_deref()).await?;
        }
        Commands::Show { id } => {
            commands::show_status(&ctx, &id)?;
        }
    }

    Ok(())
}
