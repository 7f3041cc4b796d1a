//! Runtime settings loaded from defaults and environment variables.
//!
//! Variables use the `TASK_TRACKER` prefix and `__` as the nesting
//! separator, for example `TASK_TRACKER__SERVER__PORT=9000` or
//! `TASK_TRACKER__STORAGE__BACKEND=postgres`.

use config::{Config, ConfigError, Environment, Map};
use serde::Deserialize;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use thiserror::Error;

const ENV_PREFIX: &str = "TASK_TRACKER";
const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error(transparent)]
    Load(#[from] ConfigError),
    /// `server.host` is not an IP address.
    #[error("invalid server host {host}: {source}")]
    InvalidHost {
        /// Configured host value.
        host: String,
        /// Parse failure.
        source: AddrParseError,
    },
    /// The postgres backend was selected without a connection URL.
    #[error("storage.database_url is required when storage.backend is postgres")]
    MissingDatabaseUrl,
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Ephemeral process-local storage.
    Memory,
    /// Durable `PostgreSQL` storage.
    Postgres,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// IP address to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageSettings {
    /// Selected backend.
    pub backend: StorageBackend,
    /// Connection URL for the postgres backend.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Maximum number of pooled postgres connections.
    pub pool_size: u32,
}

/// Complete runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Listener settings.
    pub server: ServerSettings,
    /// Storage settings.
    pub storage: StorageSettings,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a value cannot be deserialized or the
    /// combination is invalid.
    pub fn new() -> Result<Self, SettingsError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads settings from an explicit variable map instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a value cannot be deserialized or the
    /// combination is invalid.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self, SettingsError> {
        Self::load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self, SettingsError> {
        let settings: Self = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("storage.backend", "memory")?
            .set_default("storage.pool_size", 8)?
            .add_source(environment.separator(ENV_SEPARATOR).try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        self.socket_addr()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database_url()?;
        }
        Ok(())
    }

    /// Returns the address the server binds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `server.host` is not an IP
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|source| SettingsError::InvalidHost {
                host: self.server.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Returns the postgres connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no non-blank URL
    /// is configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.storage
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }
}
