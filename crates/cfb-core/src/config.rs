use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use jsonschema::{validator_for, Validator};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::board::SortOrder;
use crate::session::MOCK_ADDRESSES;
use crate::submission::Limits;

pub const DEFAULT_CONFIG_PATH: &str = "configs/default.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind; loopback unless told otherwise.
    pub bind: String,
    pub port: u16,
    /// Upper bound on in-flight HTTP requests.
    pub max_concurrency: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 8093,
            max_concurrency: 256,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Simulated confirmation latency before a submission is recorded.
    pub delay_ms: u64,
    pub title_max: usize,
    pub message_max: usize,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            title_max: 100,
            message_max: 1000,
        }
    }
}

impl SubmissionConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            title_max: self.title_max,
            message_max: self.message_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct SessionConfig {
    /// Pool that `connect` draws from.
    pub mock_addresses: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mock_addresses: MOCK_ADDRESSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BoardConfig {
    /// Start with the sample records.
    pub seed: bool,
    pub default_sort: SortOrder,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: true,
            default_sort: SortOrder::Votes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub submission: SubmissionConfig,
    pub session: SessionConfig,
    pub board: BoardConfig,
}

static CONFIG_SCHEMA: Lazy<Validator> = Lazy::new(|| {
    let schema = schemars::schema_for!(Config);
    let schema_value = serde_json::to_value(&schema).expect("schema value");
    validator_for(&schema_value).expect("valid schema")
});

/// Returns the JSON schema describing the configuration structure.
///
/// # Panics
///
/// Panics if schema generation fails; this indicates a programming error.
pub fn config_schema_json() -> serde_json::Value {
    let schema = schemars::schema_for!(Config);
    serde_json::to_value(&schema).expect("schema json")
}

pub fn write_schema_file(path: &str) -> std::io::Result<()> {
    let schema_json = config_schema_json();
    std::fs::write(path, serde_json::to_string_pretty(&schema_json)?)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)?;
    let json_value = serde_json::to_value(&raw)?;
    let validation_errors: Vec<_> = CONFIG_SCHEMA
        .iter_errors(&json_value)
        .map(|e| e.to_string())
        .collect();
    if !validation_errors.is_empty() {
        return Err(anyhow::anyhow!(validation_errors.join(", ")));
    }
    let cfg: Config = toml::from_str(content)?;
    Ok(cfg)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid CFB_PORT: {0}")]
    InvalidPort(String),
    #[error("invalid CFB_HTTP_MAX_CONC: {0}")]
    InvalidConcurrency(String),
    #[error("invalid CFB_SUBMIT_DELAY_MS: {0}")]
    InvalidDelay(String),
    #[error("invalid CFB_SEED: {0}")]
    InvalidSeed(String),
    #[error("config file {0} not found")]
    Missing(String),
}

impl Config {
    /// Layer `CFB_*` environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(bind) = env_nonempty("CFB_BIND") {
            self.server.bind = bind;
        }
        if let Some(raw) = env_nonempty("CFB_PORT") {
            self.server.port = raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?;
        }
        if let Some(raw) = env_nonempty("CFB_HTTP_MAX_CONC") {
            self.server.max_concurrency = raw
                .parse()
                .ok()
                .filter(|n: &usize| *n > 0)
                .ok_or(ConfigError::InvalidConcurrency(raw))?;
        }
        if let Some(raw) = env_nonempty("CFB_SUBMIT_DELAY_MS") {
            self.submission.delay_ms = raw.parse().map_err(|_| ConfigError::InvalidDelay(raw))?;
        }
        if let Some(raw) = env_nonempty("CFB_SEED") {
            self.board.seed = match raw.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => return Err(ConfigError::InvalidSeed(raw)),
            };
        }
        Ok(())
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Effective configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<String>,
}

/// Discover, validate, and env-override the runtime configuration.
pub fn load_effective() -> Result<LoadedConfig> {
    let (path, origin) = discovered_config_path();
    let (mut config, source) = match path {
        Some(path) if path.exists() => {
            let cfg = load_config(&path)?;
            tracing::info!(path = %path.display(), origin, "loaded runtime config");
            (cfg, Some(path.display().to_string()))
        }
        Some(path) if origin == "env" => {
            return Err(ConfigError::Missing(path.display().to_string()).into());
        }
        _ => {
            tracing::info!("no config file discovered; using defaults");
            (Config::default(), None)
        }
    };
    config.apply_env_overrides()?;
    Ok(LoadedConfig { config, source })
}

fn discovered_config_path() -> (Option<PathBuf>, &'static str) {
    if let Some(explicit) = env_nonempty("CFB_CONFIG") {
        return (Some(PathBuf::from(explicit)), "env");
    }
    (resolve_config_path(DEFAULT_CONFIG_PATH), "search")
}

/// Look for `rel` under `CFB_CONFIG_DIR`, the executable's directory and its
/// parent, then the working directory.
pub fn resolve_config_path(rel: &str) -> Option<PathBuf> {
    let rel_path = Path::new(rel);
    if rel_path.is_absolute() {
        return rel_path.exists().then(|| rel_path.to_path_buf());
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(cfg_dir) = env_nonempty("CFB_CONFIG_DIR") {
        candidates.push(PathBuf::from(cfg_dir));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.to_path_buf());
            if let Some(parent) = exe_dir.parent() {
                candidates.push(parent.to_path_buf());
            }
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }

    candidates
        .into_iter()
        .map(|base| base.join(rel_path))
        .find(|p| p.exists())
}
