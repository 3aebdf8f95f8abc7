use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client: ClientConfig,
    pub server: ServerConfig,
    pub daft: DaftConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the server hosting `/api/analyze`
    pub base_url: String,
    /// Request timeout; unset means the transport default
    pub timeout_secs: Option<u64>,
}

/// Where the analyze endpoint gets its listings from
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Fixed placeholder listings
    Placeholder,
    /// Live scrape of daft.ie
    Daft,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub source: SourceKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DaftConfig {
    pub base_url: String,
    /// Result pages to walk per search
    pub max_pages: u32,
    /// Pause before each result page request
    pub page_delay_ms: u64,
    /// Pause before each listing detail request
    pub detail_delay_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            source: SourceKind::Placeholder,
        }
    }
}

impl Default for DaftConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.daft.ie".to_string(),
            max_pages: 1,
            page_delay_ms: 2000,
            detail_delay_ms: 1000,
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

/// Load the config from `path`, or from the default location when `None`.
///
/// Falls back to defaults when the file cannot be used. A missing default
/// file is expected; a missing explicit one is worth a warning.
pub fn load(path: Option<&Path>) -> Config {
    if let Some(path) = path {
        return match read(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{:#}, using defaults", e);
                Config::default()
            }
        };
    }

    let path = match config_path() {
        Some(path) => path,
        None => {
            tracing::info!("Could not determine home directory, using default config");
            return Config::default();
        }
    };
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }
    match read(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{:#}, using defaults", e);
            Config::default()
        }
    }
}

/// Read and parse one config file.
pub fn read(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("housing-analyzer")
            .join("config.toml")
    })
}
