//! CLI for the scout media source finder.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use scout_core::config;
use std::path::PathBuf;

use commands::{run_adblock, run_blocked, run_import_har, run_scan};

/// Top-level CLI for scout.
#[derive(Debug, Parser)]
#[command(name = "scout")]
#[command(about = "scout: find and rank playable media sources on a web page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan a saved HTML document and print ranked candidates.
    Scan {
        /// Path to the saved page.
        path: PathBuf,

        /// Address the page was loaded from; relative URLs resolve against it.
        #[arg(long, value_name = "URL")]
        page_url: String,

        /// Run the on-demand full scan instead of the load-time scan.
        #[arg(long)]
        batch: bool,
    },

    /// Replay a HAR capture as one page session and print ranked candidates.
    ImportHar {
        /// Path to the HAR file.
        path: PathBuf,

        /// Override the page address (defaults to the first HTML document).
        #[arg(long, value_name = "URL")]
        page_url: Option<String>,
    },

    /// Check a host or URL against the blocklist and ad heuristics.
    Blocked {
        /// Host name or full URL.
        target: String,
    },

    /// Show or change the persisted ad-filter toggle.
    Adblock {
        #[arg(value_enum, default_value_t = AdblockAction::Status)]
        action: AdblockAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AdblockAction {
    On,
    Off,
    Status,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scan {
                path,
                page_url,
                batch,
            } => run_scan(&cfg, &path, &page_url, batch)?,
            CliCommand::ImportHar { path, page_url } => {
                run_import_har(&cfg, &path, page_url.as_deref()).await?
            }
            CliCommand::Blocked { target } => run_blocked(&cfg, &target)?,
            CliCommand::Adblock { action } => run_adblock(&cfg, action)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
