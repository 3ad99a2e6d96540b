use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::sniffer::DEFAULT_STRUCTURED_DEPTH;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) scout/0.1";

/// Global configuration loaded from `~/.config/scout/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutConfig {
    /// Hard-block (403) ad/tracker requests at interception time. Ranking
    /// penalties for ad-looking candidates apply regardless.
    #[serde(default = "default_adblock_enabled")]
    pub adblock_enabled: bool,
    /// Blocklist file; defaults to `blocklist.txt` next to the config file.
    #[serde(default)]
    pub blocklist_path: Option<PathBuf>,
    /// Maximum nesting walked inside JSON-LD blocks.
    #[serde(default = "default_structured_depth")]
    pub structured_data_max_depth: usize,
    /// User-Agent sent with playback requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_adblock_enabled() -> bool {
    true
}

fn default_structured_depth() -> usize {
    DEFAULT_STRUCTURED_DEPTH
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            adblock_enabled: default_adblock_enabled(),
            blocklist_path: None,
            structured_data_max_depth: default_structured_depth(),
            user_agent: default_user_agent(),
        }
    }
}

impl ScoutConfig {
    /// Configured blocklist path, or `blocklist.txt` in the XDG config dir.
    pub fn resolved_blocklist_path(&self) -> Result<PathBuf> {
        match &self.blocklist_path {
            Some(p) => Ok(p.clone()),
            None => {
                let xdg_dirs = xdg::BaseDirectories::with_prefix("scout")?;
                Ok(xdg_dirs.get_config_home().join("blocklist.txt"))
            }
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("scout")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ScoutConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<ScoutConfig> {
    if !path.exists() {
        let default_cfg = ScoutConfig::default();
        save_at(path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ScoutConfig = toml::from_str(&data)
        .with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

pub fn save_at(path: &Path, cfg: &ScoutConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
    Ok(())
}

/// Persist the ad-filter toggle; the only state that survives a session.
pub fn set_adblock_enabled(enabled: bool) -> Result<ScoutConfig> {
    set_adblock_enabled_at(&config_path()?, enabled)
}

pub fn set_adblock_enabled_at(path: &Path, enabled: bool) -> Result<ScoutConfig> {
    let mut cfg = load_or_init_at(path)?;
    cfg.adblock_enabled = enabled;
    save_at(path, &cfg)?;
    tracing::info!(enabled, "ad filter toggled");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ScoutConfig::default();
        assert!(cfg.adblock_enabled);
        assert!(cfg.blocklist_path.is_none());
        assert_eq!(cfg.structured_data_max_depth, 16);
        assert!(cfg.user_agent.contains("scout"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ScoutConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ScoutConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.adblock_enabled, cfg.adblock_enabled);
        assert_eq!(parsed.structured_data_max_depth, cfg.structured_data_max_depth);
        assert_eq!(parsed.user_agent, cfg.user_agent);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let cfg: ScoutConfig = toml::from_str("adblock_enabled = false\n").unwrap();
        assert!(!cfg.adblock_enabled);
        assert_eq!(cfg.structured_data_max_depth, 16);

        let cfg: ScoutConfig = toml::from_str(
            r#"
            blocklist_path = "/etc/scout/hosts.txt"
            structured_data_max_depth = 4
        "#,
        )
        .unwrap();
        assert!(cfg.adblock_enabled);
        assert_eq!(cfg.blocklist_path, Some(PathBuf::from("/etc/scout/hosts.txt")));
        assert_eq!(cfg.resolved_blocklist_path().unwrap(), PathBuf::from("/etc/scout/hosts.txt"));
        assert_eq!(cfg.structured_data_max_depth, 4);
    }

    #[test]
    fn load_creates_then_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(cfg.adblock_enabled);
        assert!(path.exists());

        set_adblock_enabled_at(&path, false).unwrap();
        let reloaded = load_or_init_at(&path).unwrap();
        assert!(!reloaded.adblock_enabled);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "adblock_enabled = \"maybe\"").unwrap();
        assert!(load_or_init_at(&path).is_err());
    }
}
