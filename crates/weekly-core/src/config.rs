//! Settings snapshot read once per command from `~/.config/weeklytool/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `[smart_paste]` section: gates and tunes URL paste formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartPasteConfig {
    /// Master on/off switch.
    pub enabled: bool,
    /// Format pastes that have no recognized section above them with `* [Title](url)`.
    pub fallback_format: bool,
    /// Per-request timeout for the title fetch, in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for SmartPasteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fallback_format: false,
            request_timeout_ms: 5000,
        }
    }
}

impl SmartPasteConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Global configuration. Missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyConfig {
    pub smart_paste: SmartPasteConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("weeklytool")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<WeeklyConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: WeeklyConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WeeklyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WeeklyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}
