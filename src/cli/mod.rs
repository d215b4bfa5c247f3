//! Command-line interface definition

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "shortkey", version, about = "Map long URLs to short keys")]
pub struct Cli {
    /// Path to the TOML configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Generate a key for a URL and store the mapping
    Shorten { url: String },
    /// Print the URL stored under a key
    Get { key: String },
    /// Print the number of stored entries
    Stats,
    /// Print every stored entry
    List,
    /// Write a consistent snapshot of the store to a file
    Export { path: String },
    /// Delete every stored entry
    Clear {
        /// Confirm the irreversible deletion
        #[arg(long)]
        yes: bool,
    },
    /// Print a sample configuration file
    Config,
}

impl Cli {
    /// The command to run, `serve` when none was given.
    pub fn command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Serve)
    }
}
