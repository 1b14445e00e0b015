use std::io::stdout;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ts_cli::commands::{add, clients, discard, save, start, status, stop};
use ts_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut out = stdout().lock();
    match command {
        Commands::Clients => clients::run(&mut out, &config)?,
        Commands::Start { client } => start::run(&mut out, client, Utc::now(), &config)?,
        Commands::Stop => stop::run(&mut out, Utc::now(), &config)?,
        Commands::Status { json } => status::run(&mut out, *json, Utc::now(), &config)?,
        Commands::Add { client, hours } => add::run(&mut out, client, hours, &config)?,
        Commands::Save { path, new } => {
            save::run(&mut out, path, *new, Local::now().date_naive(), &config)?;
        }
        Commands::Discard { yes } => discard::run(&mut out, *yes, &config)?,
    }

    Ok(())
}
