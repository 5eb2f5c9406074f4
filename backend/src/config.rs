//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `REGISTRY_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::DEFAULT_REQUEST_TIMEOUT;
use crate::outbound::persistence::DEFAULT_MAX_POOL_SIZE;

/// Port used when `server_port` is not configured.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Errors raised when settings are missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{name} must be set")]
    Missing { name: &'static str },
    #[error("server_port {value:?} is not a valid port")]
    InvalidPort { value: String },
}

/// Runtime settings for the registry service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REGISTRY")]
pub struct AppSettings {
    /// PostgreSQL connection URL for the primary store.
    pub database_url: Option<String>,
    /// MongoDB URI for the secondary store; the path names the database.
    pub mongodb_uri: Option<String>,
    /// Listening port, written as `3001` or `:3001`.
    pub server_port: Option<String>,
    /// Opaque secret held for signing integrations.
    pub secret_key: Option<String>,
    /// Per-request budget in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Upper bound for each store's connection pool.
    pub max_pool_size: Option<u32>,
}

impl AppSettings {
    /// Primary store URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        required(self.database_url.as_deref(), "database_url")
    }

    /// Secondary store URI.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when unset or blank.
    pub fn mongodb_uri(&self) -> Result<&str, SettingsError> {
        required(self.mongodb_uri.as_deref(), "mongodb_uri")
    }

    /// Listening port, accepting an optional leading colon.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidPort`] for non-numeric values.
    pub fn port(&self) -> Result<u16, SettingsError> {
        let Some(raw) = self.server_port.as_deref().map(str::trim) else {
            return Ok(DEFAULT_SERVER_PORT);
        };
        if raw.is_empty() {
            return Ok(DEFAULT_SERVER_PORT);
        }
        raw.strip_prefix(':')
            .unwrap_or(raw)
            .parse()
            .map_err(|_| SettingsError::InvalidPort {
                value: raw.to_owned(),
            })
    }

    /// Secret key material, wiped from memory when dropped.
    pub fn secret_key(&self) -> Option<Zeroizing<String>> {
        self.secret_key.clone().map(Zeroizing::new)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_millis)
    }

    pub fn max_pool_size(&self) -> u32 {
        self.max_pool_size.unwrap_or(DEFAULT_MAX_POOL_SIZE)
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(SettingsError::Missing { name })
}
