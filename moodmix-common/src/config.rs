//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Missing or broken configuration never stops the service from starting;
//! the offending source is logged and skipped.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_NAME: &str = "moodmix";
pub const DEFAULT_PERSIST_TIMEOUT_MS: u64 = 2000;

pub const ENV_HOST: &str = "MOODMIX_HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_PERSIST_TIMEOUT_MS: &str = "MOODMIX_PERSIST_TIMEOUT_MS";
pub const ENV_CONFIG_FILE: &str = "MOODMIX_CONFIG";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub persist_timeout_ms: Option<u64>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// `None` disables recommendation history
    pub database_url: Option<String>,
    pub database_name: String,
    /// Upper bound for a single persistence or connectivity call
    pub persist_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            persist_timeout: Duration::from_millis(DEFAULT_PERSIST_TIMEOUT_MS),
        }
    }
}

impl ServiceConfig {
    /// Resolve configuration from CLI, environment, TOML file and defaults
    pub fn resolve(cli: &CliOverrides) -> Self {
        let toml = load_toml_config(cli.config_file.as_deref());
        Self::resolve_with(cli, &toml)
    }

    /// Resolve against an already-loaded TOML config
    pub fn resolve_with(cli: &CliOverrides, toml: &TomlConfig) -> Self {
        let defaults = Self::default();

        let host = cli
            .host
            .clone()
            .or_else(|| env_string(ENV_HOST))
            .or_else(|| toml.host.clone())
            .unwrap_or(defaults.host);

        let port = cli
            .port
            .or_else(|| env_parsed(ENV_PORT))
            .or(toml.port)
            .unwrap_or(defaults.port);

        let database_url = cli
            .database_url
            .clone()
            .or_else(|| env_string(ENV_DATABASE_URL))
            .or_else(|| toml.database_url.clone());

        let database_name = env_string(ENV_DATABASE_NAME)
            .or_else(|| toml.database_name.clone())
            .unwrap_or(defaults.database_name);

        let persist_timeout = env_parsed(ENV_PERSIST_TIMEOUT_MS)
            .or(toml.persist_timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.persist_timeout);

        Self {
            host,
            port,
            database_url,
            database_name,
            persist_timeout,
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Presence of the persistence connection variables, read at call time
///
/// Only presence is checked, never validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionEnv {
    pub database_url_set: bool,
    pub database_name_set: bool,
}

impl ConnectionEnv {
    pub fn from_env() -> Self {
        Self {
            database_url_set: env_string(ENV_DATABASE_URL).is_some(),
            database_name_set: env_string(ENV_DATABASE_NAME).is_some(),
        }
    }
}

/// Load the TOML config, falling back to an empty config on any problem
///
/// An explicitly requested file (CLI or `MOODMIX_CONFIG`) that cannot be read
/// is warned about; a missing file at the default location is expected.
fn load_toml_config(explicit: Option<&Path>) -> TomlConfig {
    let explicit = explicit
        .map(Path::to_path_buf)
        .or_else(|| env_string(ENV_CONFIG_FILE).map(PathBuf::from));

    let (path, requested) = match explicit {
        Some(path) => (path, true),
        None => match default_config_path() {
            Some(path) => (path, false),
            None => return TomlConfig::default(),
        },
    };

    if !path.exists() {
        if requested {
            warn!("Config file not found: {} (using defaults)", path.display());
        } else {
            debug!("No config file at {}", path.display());
        }
        return TomlConfig::default();
    }

    match TomlConfig::load(&path) {
        Ok(config) => {
            debug!("Loaded config file {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Platform config file location, e.g. `~/.config/moodmix/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("moodmix").join("config.toml"))
}

/// Non-empty environment variable
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Environment variable parsed into `T`; unparsable values are warned about and ignored
fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    let raw = env_string(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            None
        }
    }
}
