//! CLI mode
//!
//! One-shot commands against the store file. Each command opens the store,
//! does its work and closes it again.

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::api::services::{SharedFactory, SharedStore};
use crate::cli::Command;
use crate::config::StaticConfig;
use crate::runtime::lifetime;
use crate::store::{FileSink, KeyValueStore};

/// Run a single CLI command
///
/// `Command::Serve` is handled by the server mode and rejected here.
pub fn run_cli(command: &Command, config: &StaticConfig) -> Result<ExitCode> {
    if let Command::Config = command {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(ExitCode::SUCCESS);
    }

    if let Command::Clear { yes: false } = command {
        eprintln!(
            "{} clearing deletes every entry; re-run with --yes to confirm",
            "Refusing:".yellow().bold()
        );
        return Ok(ExitCode::FAILURE);
    }

    let startup = lifetime::startup::prepare_startup(config)?;
    let outcome = execute(command, &startup.store, &startup.factory);
    startup.shutdown();
    outcome
}

fn execute(
    command: &Command,
    store: &SharedStore,
    factory: &SharedFactory,
) -> Result<ExitCode> {
    match command {
        Command::Shorten { url } => {
            let key = factory.generate_and_store(url)?;
            println!("{} {} -> {}", "Created".green().bold(), key.cyan(), url);
        }
        Command::Get { key } => match store.get(key)? {
            Some(url) => println!("{}", url),
            None => {
                eprintln!("{} {}", "Not found:".red().bold(), key);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Stats => {
            println!("{} {}", "Entries:".bold(), store.size()?);
        }
        Command::List => {
            let entries = store.entries()?;
            for (key, url) in &entries {
                println!("{}  {}", key.cyan(), url);
            }
            println!("{} {}", "Total:".bold(), entries.len());
        }
        Command::Export { path } => {
            let mut sink = FileSink::new(path);
            let filename = sink
                .path()
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("backup.db")
                .to_string();
            store.backup(&filename, &mut sink)?;
            let written = sink
                .finish()
                .with_context(|| format!("Failed to finish backup at '{}'", path))?;
            println!("{} {} ({} bytes)", "Exported".green().bold(), path, written);
        }
        Command::Clear { yes: true } => {
            store.clear()?;
            println!("{}", "Store cleared".green().bold());
        }
        Command::Clear { yes: false } | Command::Config | Command::Serve => {
            bail!("command {:?} is not a store command", command)
        }
    }
    Ok(ExitCode::SUCCESS)
}
