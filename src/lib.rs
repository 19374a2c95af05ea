pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::config::AppConfig;
use crate::core::source::SourceKind;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    /// Show the fund table
    List {
        all: bool,
        show_paused: Option<bool>,
        source: Option<SourceKind>,
    },
    /// Show recent premium history of one fund
    History {
        fund_id: String,
        days: Option<u32>,
        source: Option<SourceKind>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("lofarb starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::List {
            all,
            show_paused,
            source,
        } => {
            let source = providers::make_source(source.unwrap_or(config.source), &config);
            let show_paused = show_paused.unwrap_or(config.show_paused);
            cli::list::run(source.as_ref(), all, show_paused).await
        }
        AppCommand::History {
            fund_id,
            days,
            source,
        } => {
            let source = providers::make_source(source.unwrap_or(config.source), &config);
            let days = days.unwrap_or(config.history_days);
            cli::history::run(source.as_ref(), &fund_id, days).await
        }
    }
}
