//! Optional config file loading and the fetch settings for a run.
//!
//! Search order: ./versescrape.toml, then $XDG_CONFIG_HOME/versescrape/config.toml
//! (or ~/.config/versescrape/config.toml).

use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_VERSION: &str = "NKJV";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Bible version identifier, e.g. "NKJV" or "ESV".
    pub version: Option<String>,
    /// Seconds allowed to establish the connection.
    pub connect_timeout_secs: Option<u64>,
    /// Seconds allowed for the response once connected.
    pub read_timeout_secs: Option<u64>,
    /// HTTP User-Agent header.
    pub user_agent: Option<String>,
    /// Output format: text (default) or json.
    pub format: Option<String>,
}

/// Settings handed to the fetch collaborator. Built once per run and not changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub version: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

/// Search order: (1) ./versescrape.toml, (2) $XDG_CONFIG_HOME/versescrape/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("versescrape.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("versescrape").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            tracing::debug!(path = %path.display(), "Loaded config");
            return Ok(Some(config));
        }
    }
    Ok(None)
}
