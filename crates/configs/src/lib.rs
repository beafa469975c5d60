//! Process configuration: TOML file first, environment variables as fallback.
//!
//! Loaded once at startup and handed to the store and router explicitly.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub items: ItemsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// How by-id operations answer when no item matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotFoundPolicy {
    /// get answers 200 with a plain-text message; update and delete answer 200 with `null`.
    #[default]
    Legacy,
    /// every by-id operation answers 404 with a JSON error body.
    Strict,
}

impl NotFoundPolicy {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(NotFoundPolicy::Legacy),
            "strict" => Ok(NotFoundPolicy::Strict),
            other => Err(anyhow!("items.not_found must be `legacy` or `strict`, got `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ItemsConfig {
    #[serde(default)]
    pub not_found: NotFoundPolicy,
}

/// Record store backend, chosen by the scheme of `database.url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    JsonFile(PathBuf),
}

/// Env vars consulted for the store URL, in priority order.
pub const DATABASE_URL_VARS: [&str; 3] = ["DATABASE_URL", "MONGO_URI", "mongoUri"];

/// `CONFIG_PATH` (default `config.toml`), with the env fallback of [`load_or_env`].
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_or_env(&path)
}

/// Load `path`, or build from env vars when the file does not exist.
/// A file that exists but cannot be read or parsed is an error.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => load_from_str(&content).map_err(|e| anyhow!("{path}: {e}")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::from_env(),
        Err(e) => Err(anyhow!("cannot read {path}: {e}")),
    }
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Build a config purely from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(policy) = std::env::var("ITEMS_NOT_FOUND") {
            cfg.items.not_found = NotFoundPolicy::parse(&policy)?;
        }
        Ok(cfg)
    }

    /// Read `config.toml` (or `CONFIG_PATH`); fall back to env vars when it is missing.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill an empty `url` from the first set variable in [`DATABASE_URL_VARS`].
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Some(url) = DATABASE_URL_VARS.iter().find_map(|k| std::env::var(k).ok()) {
                self.url = url;
            }
        }
    }

    pub fn backend(&self) -> Result<StoreBackend> {
        let url = self.url.trim();
        let lower = url.to_lowercase();
        if lower.starts_with("postgresql://") || lower.starts_with("postgres://") {
            return Ok(StoreBackend::Postgres);
        }
        if lower.starts_with("file://") {
            let path = &url["file://".len()..];
            if path.is_empty() {
                return Err(anyhow!("database.url file:// needs a path"));
            }
            return Ok(StoreBackend::JsonFile(PathBuf::from(path)));
        }
        Err(anyhow!("database.url must start with postgres://, postgresql:// or file://"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!(
                "database.url is empty; set it in config.toml or via DATABASE_URL / MONGO_URI"
            ));
        }
        self.backend()?;
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
