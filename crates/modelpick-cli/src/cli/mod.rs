//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use modelpick_core::config::{self, SourceKind};
use modelpick_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "modelpick")]
#[command(version)]
#[command(about = "Pick an AI model from a remote catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the catalog backend (serves /api/models)
    #[arg(long, global = true, env = "MODELPICK_CATALOG_URL", value_name = "URL")]
    catalog_url: Option<String>,

    /// Where the catalog comes from: backend or openrouter
    #[arg(long, global = true, value_name = "SOURCE")]
    source: Option<SourceKind>,

    /// Log debug output (stderr, or the log file for the picker)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct PickArgs {
    /// Currently selected model id; skips default selection and is highlighted
    #[arg(long, value_name = "ID")]
    selected: Option<String>,

    /// Show the catalog without allowing a selection
    #[arg(long)]
    disabled: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Choose a model interactively and print its id (default)
    Pick(PickArgs),
    /// Print the catalog and the default model
    List {
        /// Only list models whose name, id or description contains this text
        #[arg(short, long)]
        query: Option<String>,

        /// Print the models as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write the default config file
    Init,
    /// Print a config file generated from the built-in defaults
    Generate,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Pick(PickArgs::default()));

    // The picker owns the terminal, so it logs to a file instead of stderr.
    let _log_guard = if matches!(command, Commands::Pick(_)) {
        Some(logging::init_file(&config::paths::logs_dir(), cli.verbose)?)
    } else {
        logging::init_stderr(cli.verbose);
        None
    };

    let mut config = config::Config::load().context("load config")?;
    if let Some(url) = cli.catalog_url {
        config.catalog_url = url;
    }
    if let Some(source) = cli.source {
        config.source = source;
    }

    match command {
        Commands::Pick(args) => commands::pick::run(&config, args.selected, args.disabled),
        Commands::List { query, json } => {
            commands::list::run(&config, query.as_deref(), json).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::Show => commands::config::show(&config),
        },
    }
}
