use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Log file used when neither the config nor the caller names one.
pub const DEFAULT_LOG_PATH: &str = "logs/urlharvest.log";

/// Upstream endpoints queried by the sources (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Archive index CDX search endpoint.
    pub archive_index: String,
    /// Crawl index search endpoint, including the collection name.
    pub crawl_index: String,
    /// Reputation service domain report endpoint.
    pub reputation: String,
    /// Replay prefix used to build capture URLs in versions mode.
    pub archive_replay: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            archive_index: "http://web.archive.org/cdx/search/cdx".to_string(),
            crawl_index: "http://index.commoncrawl.org/CC-MAIN-2018-22-index".to_string(),
            reputation: "https://www.virustotal.com/vtapi/v2/domain/report".to_string(),
            archive_replay: "https://web.archive.org/web".to_string(),
        }
    }
}

/// Transfer settings shared by every source request.
///
/// Timeouts are off unless configured: a hung upstream only delays its domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Global configuration loaded from `~/.config/urlharvest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Log file path; `None` means [`DEFAULT_LOG_PATH`].
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub http: HttpSettings,
}

impl HarvestConfig {
    /// Effective log file path (configured or default).
    pub fn log_path(&self) -> PathBuf {
        match &self.log_path {
            Some(p) if !p.as_os_str().is_empty() => p.clone(),
            _ => PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlharvest")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HarvestConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HarvestConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<HarvestConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: HarvestConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
