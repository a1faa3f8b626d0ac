mod cli;
mod commands;
mod output;
mod setup;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use setup::prepare_core;
use soulmate_core::paths;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Always log to a daily file so table and JSON output stay clean
    let log_dir = paths::logs_dir()?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "soulmate.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    let core = prepare_core(cli.db_path).await?;
    let format = cli.format;

    match cli.command {
        Commands::Theme(command) => commands::theme::run(core, command, format).await,
        Commands::Approach(command) => commands::approach::run(core, command, format).await,
        Commands::User(command) => commands::user::run(core, command, format).await,
        Commands::History { email, full } => {
            commands::history::run(core, &email, full, format).await
        }
        Commands::Profile { email } => commands::profile::run(core, &email, format).await,
    }
}
