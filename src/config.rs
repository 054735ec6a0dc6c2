use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::{Result, eyre::Context};
use serde::{Deserialize, Serialize};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/openmusic";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Falls back to the libpq `PG*` variables when unset
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            sqlx_logging: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("open-music").join("config.toml"))
    }

    /// Load the default config file, or the built-in defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the default config to the default path, unless a file is already there
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| color_eyre::eyre::eyre!("No config directory on this platform"))?;

        if path.exists() {
            log::info!("Config already exists at: {}", path.display());
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(&Self::default()).wrap_err("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }
}

impl DatabaseConfig {
    /// Resolve the connection URL: explicit setting, then `PG*` variables, then the default
    pub fn resolve_url(&self) -> String {
        self.url
            .clone()
            .or_else(|| url_from_pg_env(|key| std::env::var(key).ok()))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Build a postgres URL from the variables libpq understands.
/// Returns `None` when none of host, database or user is set.
fn url_from_pg_env(var: impl Fn(&str) -> Option<String>) -> Option<String> {
    let host = var("PGHOST");
    let database = var("PGDATABASE");
    let user = var("PGUSER");

    if host.is_none() && database.is_none() && user.is_none() {
        return None;
    }

    let credentials = match (user, var("PGPASSWORD")) {
        (Some(user), Some(password)) => format!(
            "{}:{}@",
            urlencoding::encode(&user),
            urlencoding::encode(&password)
        ),
        (Some(user), None) => format!("{}@", urlencoding::encode(&user)),
        (None, _) => String::new(),
    };

    Some(format!(
        "postgres://{}{}:{}/{}",
        credentials,
        host.unwrap_or_else(|| "localhost".to_string()),
        var("PGPORT").unwrap_or_else(|| "5432".to_string()),
        database.unwrap_or_default()
    ))
}
