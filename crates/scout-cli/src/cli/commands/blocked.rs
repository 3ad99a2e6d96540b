//! `scout blocked <host|url>`

use anyhow::Result;
use scout_core::classify::looks_like_ad;
use scout_core::config::ScoutConfig;
use scout_core::url_model::host_of;

use super::load_blocklist;

pub fn run_blocked(cfg: &ScoutConfig, target: &str) -> Result<()> {
    let blocklist = load_blocklist(cfg)?;
    match host_of(target) {
        Some(host) => {
            let listed = blocklist.is_blocked(&host);
            let ad = looks_like_ad(target, &blocklist);
            println!("{host}: {}", if listed { "blocklisted" } else { "not blocklisted" });
            println!("{target}: {}", if ad { "ad-like" } else { "not ad-like" });
        }
        None => {
            let listed = blocklist.is_blocked(target);
            println!("{target}: {}", if listed { "blocklisted" } else { "not blocklisted" });
        }
    }
    Ok(())
}
