use eyre::Result;
use std::{collections::HashMap, env, path::PathBuf};
use tracing::Level;

/// Settings for the command-line client.
///
/// The client only ever talks to a local JSON store; the path can be
/// overridden per invocation with `--store`.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// JSON document holding this device's meetings (`WHENMEET_STORE`)
    pub store_path: PathBuf,
    /// Log level written to stderr (`LOG_LEVEL`, defaults to warn)
    pub log_level: Level,
}

impl CliConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let store_path = vars
            .get("WHENMEET_STORE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("whenmeet.json"));

        let log_level = match vars
            .get("LOG_LEVEL")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            Some("trace") => Level::TRACE,
            Some("debug") => Level::DEBUG,
            Some("info") => Level::INFO,
            Some("error") => Level::ERROR,
            _ => Level::WARN,
        };

        Ok(Self {
            store_path,
            log_level,
        })
    }
}
