mod cli;
mod config;
mod models;
mod scoring;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::{AppConfig, StorageBackend};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // --data wins over the configured file; its extension picks the backend
    let (backend, data_path) = match &cli.data {
        Some(path) => (StorageBackend::infer(path), path.clone()),
        None => {
            config.ensure_data_dir()?;
            (config.storage.backend, config.data_path()?)
        }
    };
    log::debug!("Data file: {:?} ({:?})", data_path, backend);

    let mut store = store::open(backend, &data_path)?;
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Log(args)) => {
            handlers::handle_log(store.as_mut(), &config, &args, today)?;
        }
        Some(Commands::Score { date, json }) => {
            handlers::handle_score(store.as_ref(), &config, date.as_deref(), json, today)?;
        }
        Some(Commands::Week { date }) => {
            handlers::handle_week(store.as_ref(), &config, date.as_deref(), today)?;
        }
        Some(Commands::Goals { action }) => {
            handlers::handle_goals(&mut config, &action)?;
        }
        Some(Commands::Export { date }) => {
            handlers::handle_export(store.as_ref(), &config, date.as_deref(), today)?;
        }
        Some(Commands::Migrate) => {
            handlers::handle_migrate(store.as_mut())?;
        }

        // No subcommand → launch TUI
        None => {
            tui::app::run(store, config, today)?;
        }
    }

    Ok(())
}
