use eyre::{Context, Result, eyre};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use cadbridge::rpc::{DEFAULT_HOST, DEFAULT_PORT, RpcClientConfig};

pub const HOST_ENV: &str = "FUSION_SERVER_HOST";
pub const PORT_ENV: &str = "FUSION_SERVER_PORT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub fusion: FusionConfig,
}

/// Where the CAD host's bridge listens
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_ms: Option<u64>,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout_ms: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            fusion: FusionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply host/port from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply host/port from an arbitrary variable lookup
    ///
    /// A port that does not parse is an error; connecting to the default
    /// instead would hide the typo.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.trim().is_empty()) {
            self.fusion.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.fusion.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| eyre!("Invalid {}={:?}: {}", PORT_ENV, port, e))?;
        }
        Ok(())
    }

    /// Log level from the file, falling back to info
    pub fn log_filter(&self) -> LevelFilter {
        match self.log_level.as_deref() {
            None => LevelFilter::Info,
            Some(level) => level.trim().parse().unwrap_or_else(|_| {
                log::warn!("Unknown log_level {:?}, using info", level);
                LevelFilter::Info
            }),
        }
    }

    /// Command-line flags win over file and environment
    pub fn apply_overrides(&mut self, host: Option<&str>, port: Option<u16>) {
        if let Some(host) = host {
            self.fusion.host = host.to_string();
        }
        if let Some(port) = port {
            self.fusion.port = port;
        }
    }

    pub fn rpc_config(&self) -> RpcClientConfig {
        RpcClientConfig {
            host: self.fusion.host.clone(),
            port: self.fusion.port,
            request_timeout_ms: self.fusion.request_timeout_ms,
        }
    }
}
