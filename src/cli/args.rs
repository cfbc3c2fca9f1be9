//! CLI argument definitions using clap derive

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// bookshelf - personal book library client
///
/// Search the book catalogue and manage your own library from the
/// terminal.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BOOKSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted session
    #[arg(long, global = true, env = "BOOKSHELF_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Keep the session in memory only (overrides --state-dir)
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to the books service
    Login(LoginArgs),

    /// Sign out and forget the stored session
    Logout,

    /// Show the current session
    Whoami(FormatArgs),

    /// Search the book catalogue
    Search(SearchArgs),

    /// Show your recent searches
    Recent(FormatArgs),

    /// Manage your personal library
    Library(LibraryArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Username (prompted for when omitted)
    #[arg(short, long, env = "BOOKSHELF_USERNAME")]
    pub username: Option<String>,

    /// Password (prompted for when omitted)
    #[arg(short, long, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Output format selection shared by listing commands
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search terms
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    #[command(flatten)]
    pub output: FormatArgs,
}

/// Arguments for the library command
#[derive(Parser, Debug)]
pub struct LibraryArgs {
    /// Subcommand for library
    #[command(subcommand)]
    pub action: LibraryAction,
}

/// Library subcommands
#[derive(Subcommand, Debug)]
pub enum LibraryAction {
    /// List the books in your library
    List(FormatArgs),

    /// Add a book to your library
    Add(BookInput),

    /// Replace a book in your library
    Update {
        /// Book ID
        id: String,

        #[command(flatten)]
        book: BookInput,
    },

    /// Remove a book from your library
    Remove {
        /// Book ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// A book given either as raw JSON or as title/author
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("source").required(true).args(["data", "title"])))]
pub struct BookInput {
    /// Book record as a JSON object
    #[arg(long, conflicts_with_all = ["title", "author"])]
    pub data: Option<String>,

    /// Book title
    #[arg(long)]
    pub title: Option<String>,

    /// Book author
    #[arg(long, requires = "title")]
    pub author: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
