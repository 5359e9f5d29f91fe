//! Service configuration
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional `photos.toml` in the working directory, then environment
//! variables.
//!
//! # Environment Variables
//! - `SERVER_HOST` / `SERVER_PORT`: listen address (default: `0.0.0.0:3002`)
//! - `STORAGE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection URL
//! - `DATABASE_MAX_CONNECTIONS` (default: 10), `DATABASE_MIN_CONNECTIONS` (default: 1)
//! - `DATABASE_CONNECTION_TIMEOUT`: acquire timeout in seconds (default: 30)
//! - `JWT_SECRET`: token signing secret (required)
//! - `JWT_TOKEN_TTL`: token lifetime in seconds (default: tokens do not expire)

use anyhow::{Context, Result};
use common::database::DatabaseConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::jwt::JwtConfig;

/// Where records are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_host: String,
    pub server_port: u16,
    pub storage_backend: StorageBackend,
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub database_connection_timeout: u64,
    pub jwt_secret: String,
    #[serde(default)]
    pub jwt_token_ttl: Option<u64>,
}

impl Settings {
    /// Load settings from defaults, `photos.toml` and the environment
    pub fn load() -> Result<Self> {
        let defaults = DatabaseConfig::default();

        let settings = Config::builder()
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 3002_i64)?
            .set_default("storage_backend", "postgres")?
            .set_default("database_url", defaults.database_url)?
            .set_default(
                "database_max_connections",
                i64::from(defaults.max_connections),
            )?
            .set_default(
                "database_min_connections",
                i64::from(defaults.min_connections),
            )?
            .set_default(
                "database_connection_timeout",
                defaults.connection_timeout as i64,
            )?
            .add_source(File::with_name("photos").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration (is JWT_SECRET set?)")
    }

    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Database pool settings
    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            database_url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connection_timeout: self.database_connection_timeout,
        }
    }

    /// Token signing settings
    pub fn jwt(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            token_ttl: self.jwt_token_ttl,
        }
    }
}
