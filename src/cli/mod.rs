pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::feed::Mode;

#[derive(Parser)]
#[command(name = "tusk")]
#[command(about = "Read your Mastodon mentions from the terminal", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/tusk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Instance URL, overrides the config file
    #[arg(long, global = true)]
    pub instance: Option<String>,

    /// Access token, overrides the config file
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List mentions, newest first
    Mentions {
        /// Which mentions to show: "all" or "private"
        #[arg(short, long, default_value = "all")]
        mode: Mode,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Load mentions once, then check whether newer ones arrived
    Check {
        #[arg(short, long, default_value = "all")]
        mode: Mode,
    },
    /// Keep polling for new mentions until Ctrl-C
    Watch {
        #[arg(short, long, default_value = "all")]
        mode: Mode,

        /// Poll interval (e.g., "30s", "5m", "1h"); defaults to the config value
        #[arg(short, long)]
        interval: Option<String>,
    },
    /// Show a cached status by id
    Show {
        /// Status id
        id: String,
    },
}
