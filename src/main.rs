//! bookshelf - personal book library client
//!
//! CLI entry point that dispatches to subcommands.

use bookshelf::app::App;
use bookshelf::cli::{commands, Cli, Commands};
use bookshelf::config::{Config, ConfigManager};
use bookshelf::error::BookshelfResult;
use bookshelf::library::UreqTransport;
use bookshelf::storage::{CredentialStore, FileStore, MemoryStore};
use bookshelf::ui;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> BookshelfResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    ui::init_theme();
    debug!("Loaded config from {}", config_manager.path().display());

    // Config command doesn't need a session
    if let Commands::Config(args) = cli.command {
        return commands::config(args, &config_manager, &config).await;
    }

    let store: Arc<dyn CredentialStore> = if cli.ephemeral {
        debug!("Keeping session in memory (--ephemeral)");
        Arc::new(MemoryStore::new())
    } else {
        let dir = cli.state_dir.clone().unwrap_or_else(ConfigManager::state_dir);
        Arc::new(FileStore::open(&dir)?)
    };
    let transport = Arc::new(UreqTransport::with_timeout_secs(config.api.timeout_secs));
    let app = App::new(&config, store, transport);

    match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Login(args) => commands::login(args, &app).await,
        Commands::Logout => commands::logout(&app).await,
        Commands::Whoami(args) => commands::whoami(args, &app, &config.api.base_url).await,
        Commands::Search(args) => commands::search(args, &app).await,
        Commands::Recent(args) => commands::recent(args, &app).await,
        Commands::Library(args) => commands::library(args, &app).await,
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("bookshelf=warn"),
        1 => EnvFilter::new("bookshelf=info"),
        _ => EnvFilter::new("bookshelf=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
