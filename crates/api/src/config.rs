//! # API Configuration Module
//!
//! Loads configuration for the whenmeet API server from environment
//! variables, with defaults where sensible.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind to (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `STORE_BACKEND`: `postgres`, `file` or `memory` (default: "postgres")
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `STORE_PATH`: JSON document for the `file` backend (default: "whenmeet.json")
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: per-request timeout (default: 30)

use eyre::{eyre, Result, WrapErr};
use std::{collections::HashMap, env, path::PathBuf};
use tracing::Level;

/// Where meeting records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres { database_url: String },
    File { path: PathBuf },
    Memory,
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::File { .. } => "file",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Configuration for the whenmeet API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Selected storage backend
    pub store_backend: StoreBackend,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// - `STORE_BACKEND` is not one of the known backends
    /// - `DATABASE_URL` is missing while the postgres backend is selected
    /// - `API_PORT` cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::vars().collect())
    }

    /// Same as [`ApiConfig::from_env`] over an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let var = |key: &str| vars.get(key).cloned();

        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let store_backend = match var("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres {
                database_url: var("DATABASE_URL")
                    .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?,
            },
            "file" => StoreBackend::File {
                path: var("STORE_PATH")
                    .unwrap_or_else(|| "whenmeet.json".to_string())
                    .into(),
            },
            "memory" => StoreBackend::Memory,
            other => return Err(eyre!("Unknown STORE_BACKEND '{}'", other)),
        };

        // Logging settings
        let log_level = parse_log_level(var("LOG_LEVEL").as_deref().unwrap_or("info"));

        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            store_backend,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a level name to a tracing level, falling back to INFO.
pub fn parse_log_level(value: &str) -> Level {
    match value.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
