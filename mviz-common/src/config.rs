//! Configuration loading and directory resolution
//!
//! Directories and the upstream URL resolve through the same priority
//! order everywhere:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default upstream for the proxy server: the world outline the map
/// pages draw.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";

/// Default listen ports per server.
pub const DEFAULT_WEB_PORT: u16 = 3000;
pub const DEFAULT_PROXY_PORT: u16 = 3001;

/// TOML configuration file schema (`config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub upstream_url: Option<String>,
    pub web_port: Option<u16>,
    pub proxy_port: Option<u16>,
}

impl TomlConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from the platform config directory; a missing or unreadable
    /// file is not an error and yields the empty config.
    pub fn load() -> Self {
        for path in config_file_candidates() {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => return config,
                Err(e) => {
                    warn!("Ignoring unreadable config {}: {}", path.display(), e);
                }
            }
        }
        Self::default()
    }
}

/// Candidate config file paths for the platform, highest priority first
fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("mviz").join("config.toml"));
    }
    if cfg!(target_os = "linux") {
        candidates.push(PathBuf::from("/etc/mviz/config.toml"));
    }
    candidates
}

/// Resolve the static data directory.
pub fn resolve_data_dir(cli_arg: Option<PathBuf>, config: &TomlConfig) -> PathBuf {
    resolve_path(cli_arg, "MVIZ_DATA_DIR", config.data_dir.clone(), "data")
}

/// Resolve the static assets directory.
pub fn resolve_assets_dir(cli_arg: Option<PathBuf>, config: &TomlConfig) -> PathBuf {
    resolve_path(cli_arg, "MVIZ_ASSETS_DIR", config.assets_dir.clone(), "assets")
}

/// Resolve the proxy upstream URL.
pub fn resolve_upstream_url(cli_arg: Option<String>, config: &TomlConfig) -> String {
    if let Some(url) = cli_arg {
        return url;
    }
    if let Ok(url) = std::env::var("MVIZ_UPSTREAM_URL") {
        return url;
    }
    if let Some(url) = &config.upstream_url {
        return url.clone();
    }
    DEFAULT_UPSTREAM_URL.to_string()
}

/// Resolve a server port. The command line and environment resolve
/// together through clap (the port argument carries an env fallback),
/// so `cli_arg` already covers priorities 1 and 2.
pub fn resolve_port(cli_arg: Option<u16>, config_value: Option<u16>, default: u16) -> u16 {
    cli_arg.or(config_value).unwrap_or(default)
}

fn resolve_path(
    cli_arg: Option<PathBuf>,
    env_var_name: &str,
    config_value: Option<PathBuf>,
    default: &str,
) -> PathBuf {
    // Priority 1: command-line argument
    if let Some(path) = cli_arg {
        return path;
    }
    // Priority 2: environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return PathBuf::from(path);
    }
    // Priority 3: TOML config file
    if let Some(path) = config_value {
        return path;
    }
    // Priority 4: compiled default, relative to the working directory
    PathBuf::from(default)
}
