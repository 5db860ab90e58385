//! Configuration for the claim client.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (CLAIMVOICE_ENDPOINT)
//! 2. Config file (.claimvoice/config.yaml)
//! 3. Defaults (http://localhost:8000/run_pipeline)
//!
//! Config file discovery:
//! - Searches current directory and parents for .claimvoice/config.yaml
//! - Falls back to ~/.claimvoice/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::DEFAULT_ENDPOINT;
use crate::capture::wav_file::DEFAULT_MAX_ARTIFACT_BYTES;

/// Environment override for the submission URL
pub const ENDPOINT_ENV: &str = "CLAIMVOICE_ENDPOINT";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub endpoint: Option<EndpointConfig>,
    #[serde(default)]
    pub capture: Option<CaptureConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    pub max_artifact_bytes: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Submission URL
    pub endpoint: String,
    /// Largest recording accepted for upload
    pub max_artifact_bytes: u64,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_artifact_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
            config_file: None,
        }
    }
}

/// Find config file by searching a directory and its parents
fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".claimvoice").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

fn find_config_file() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_file_from(&cwd))
        .or_else(|| {
            dirs::home_dir()
                .map(|home| home.join(".claimvoice").join("config.yaml"))
                .filter(|path| path.exists())
        })
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge the file and environment layers over the defaults
fn resolve(file: Option<(PathBuf, ConfigFile)>, env_endpoint: Option<String>) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();

    if let Some((path, file)) = file {
        if let Some(url) = file.endpoint.and_then(|e| e.url) {
            config.endpoint = url;
        }
        if let Some(max) = file.capture.and_then(|c| c.max_artifact_bytes) {
            config.max_artifact_bytes = max;
        }
        config.config_file = Some(path);
    }

    if let Some(url) = env_endpoint.filter(|url| !url.trim().is_empty()) {
        config.endpoint = url;
    }

    config
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let file = match find_config_file() {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    Ok(resolve(file, std::env::var(ENDPOINT_ENV).ok()))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
