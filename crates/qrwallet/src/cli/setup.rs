use clap::{Parser, Subcommand};
use qrwalletapp::model::CURRENT_SCHEMA_VERSION;
use std::path::PathBuf;

/// Format: "v0.3.0 (schema 2)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| format!("v{} (schema {})", VERSION, CURRENT_SCHEMA_VERSION))
}

#[derive(Parser, Debug)]
#[command(
    name = "qrwallet",
    bin_name = "qrwallet",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Keep your QR codes in one place", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $QRWALLET_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List stored codes
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only codes whose name or content contains this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a code (reads a scanned payload from stdin when CONTENT is omitted)
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Text encoded in the code
        content: Option<String>,
    },

    /// Rename a code
    #[command(display_order = 3)]
    Rename {
        /// Index (e.g. 2) or id of the code
        selector: String,

        /// New name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Delete one or more codes
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Indexes (e.g. 1 3), ranges (e.g. 2-4) or ids
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Move a code to another position
    #[command(alias = "mv", display_order = 5)]
    Move {
        /// Current position (1-based)
        from: usize,

        /// New position (1-based)
        to: usize,
    },

    /// Show codes ready for rendering
    #[command(alias = "view", display_order = 6)]
    Show {
        /// Indexes, ranges or ids
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Image size in pixels (default from config)
        #[arg(long)]
        size: Option<u32>,

        /// Print render requests as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show storage status: schema version, backups, paths
    #[command(display_order = 7)]
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
