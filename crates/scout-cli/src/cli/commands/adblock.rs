//! `scout adblock <on|off|status>`

use anyhow::Result;
use scout_core::config::{self, ScoutConfig};

use crate::cli::AdblockAction;

pub fn run_adblock(cfg: &ScoutConfig, action: AdblockAction) -> Result<()> {
    let enabled = match action {
        AdblockAction::Status => cfg.adblock_enabled,
        AdblockAction::On => config::set_adblock_enabled(true)?.adblock_enabled,
        AdblockAction::Off => config::set_adblock_enabled(false)?.adblock_enabled,
    };
    println!("Ad filter: {}", if enabled { "on" } else { "off" });
    Ok(())
}
