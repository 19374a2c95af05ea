use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use lofarb::core::log::init_logging;
use lofarb::core::source::SourceKind;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
    /// Display LOF premium table with arbitrage difficulty
    List {
        /// Include every restricted fund, not only high premium ones
        #[arg(short, long)]
        all: bool,

        /// Include funds whose subscriptions are paused
        #[arg(short = 'p', long, overrides_with = "hide_paused")]
        show_paused: bool,

        /// Hide funds whose subscriptions are paused, even if the config shows them
        #[arg(long, overrides_with = "show_paused")]
        hide_paused: bool,

        /// Upstream to fetch from (happy-lof or jisilu)
        #[arg(short, long)]
        source: Option<SourceKind>,
    },
    /// Display recent premium history of a fund
    History {
        /// Fund code, e.g. 161129
        fund_id: String,

        /// Number of days to request
        #[arg(short, long)]
        days: Option<u32>,

        /// Upstream to fetch from (happy-lof or jisilu)
        #[arg(short, long)]
        source: Option<SourceKind>,
    },
}

impl From<Commands> for lofarb::AppCommand {
    fn from(cmd: Commands) -> lofarb::AppCommand {
        match cmd {
            Commands::List {
                all,
                show_paused,
                hide_paused,
                source,
            } => lofarb::AppCommand::List {
                all,
                show_paused: paused_override(show_paused, hide_paused),
                source,
            },
            Commands::History {
                fund_id,
                days,
                source,
            } => lofarb::AppCommand::History {
                fund_id,
                days,
                source,
            },
            Commands::Setup { .. } => unreachable!("Setup command should be handled separately"),
        }
    }
}

/// `None` when neither flag was given, so the config file decides.
fn paused_override(show_paused: bool, hide_paused: bool) -> Option<bool> {
    match (show_paused, hide_paused) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup { force }) => match cli.config_path.as_deref() {
            Some(path) => lofarb::cli::setup::setup_at_path(path, force).map(|_| ()),
            None => lofarb::cli::setup::setup(force).map(|_| ()),
        },
        Some(cmd) => lofarb::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
