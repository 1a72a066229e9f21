//! Configuration loading and representation.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3002;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value '{0}': expected an integer between 0 and 65535")]
    InvalidPort(String),

    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
}

/// Where orders are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Postgres { url: String },
}

/// Process configuration, read once at startup by the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
        }
    }
}

impl Config {
    /// Read `PORT`, `BIND_ADDR` and `DATABASE_URL` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let bind_addr = lookup("BIND_ADDR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let database_url = lookup("DATABASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            bind_addr,
            port,
            database_url,
        })
    }

    pub fn storage(&self) -> StorageBackend {
        match &self.database_url {
            Some(url) => StorageBackend::Postgres { url: url.clone() },
            None => StorageBackend::InMemory,
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_addr, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}
