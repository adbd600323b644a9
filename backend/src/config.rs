use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_STATIC_DIR: &str = "frontend/dist";
pub const DEFAULT_KEY_PREFIX: &str = "todo";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BIND_ADDR '{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("STORE '{0}' is not supported, expected 'redis' or 'memory'")]
    UnknownStore(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Redis,
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub redis_url: String,
    pub key_prefix: String,
    /// Directory of the built frontend; `None` serves the API only.
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind = var("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value: bind.clone(), source })?;

        let store = match var("STORE", "redis").to_ascii_lowercase().as_str() {
            "redis" => StoreKind::Redis,
            "memory" => StoreKind::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let static_dir = var("STATIC_DIR", DEFAULT_STATIC_DIR);
        let static_dir = (!static_dir.trim().is_empty()).then(|| PathBuf::from(static_dir));

        Ok(Self {
            bind_addr,
            store,
            redis_url: var("REDIS_URL", DEFAULT_REDIS_URL),
            key_prefix: var("REDIS_KEY_PREFIX", DEFAULT_KEY_PREFIX),
            static_dir,
        })
    }
}
