pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::fetcher::parallel::DEFAULT_WORKERS;

#[derive(Parser)]
#[command(name = "publico")]
#[command(about = "Browse Público news from the terminal", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers for fetching article details
    #[arg(short, long, default_value_t = DEFAULT_WORKERS, global = true)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Latest headlines
    Latest(ListArgs),
    /// Top (featured) stories
    Top(ListArgs),
    /// Search articles
    Search {
        /// Search text
        query: String,

        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a full article
    Show {
        /// Article URL or numeric ID
        target: String,
    },
    /// Print the article ID embedded in a URL
    Id {
        /// Article URL
        url: String,
    },
    /// Launch the TUI
    Tui {
        /// Start on top stories instead of the latest headlines
        #[arg(long, conflicts_with = "search")]
        top: bool,

        /// Start with a search
        #[arg(long, value_name = "QUERY")]
        search: Option<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Fetch full details for every listed article
    #[arg(long)]
    pub details: bool,

    /// Print normalized articles as JSON
    #[arg(long)]
    pub json: bool,

    /// Show at most this many articles
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}
