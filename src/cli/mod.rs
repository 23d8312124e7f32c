pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Track attendance markers posted in a chat channel. Sync once, query fast.
#[derive(Parser, Debug)]
#[command(name = "kintai", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Kintai directory (default: .kintai)
    #[arg(long, global = true, env = "KINTAI_DIR")]
    pub dir: Option<String>,

    /// Verbose output (debug diagnostics on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Kintai in the current project
    Init {
        /// Channel whose export holds the message history
        #[arg(long)]
        channel: String,
    },

    /// Bring the record cache up to date with the channel
    Sync,

    /// Show attendance records for one or more authors
    Query {
        /// Author handle to include. Repeat for several: --author <@1> --author <@2>
        #[arg(long = "author", required = true)]
        authors: Vec<String>,
        /// Only records after this point: YYYY-MM-DD, RFC 3339, or 7d / 2w / 1m (default: 1m)
        #[arg(long)]
        since: Option<String>,
        /// Show per-category totals instead of individual records
        #[arg(long)]
        summary: bool,
    },

    /// Show which category a message text would be filed under
    Classify {
        /// Message text
        text: String,
    },

    /// List categories with their markers and colors
    Categories,

    /// Show configuration and cache status
    Status,
}
