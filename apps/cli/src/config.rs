//! # Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`FIDELIDADE_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup; passed by reference to the commands.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "FIDELIDADE_DB_PATH";

/// Environment variable overriding the store name shown on the dashboard.
pub const STORE_NAME_ENV: &str = "FIDELIDADE_STORE_NAME";

const DEFAULT_STORE_NAME: &str = "Fidelidade";
const DATABASE_FILE: &str = "fidelidade.db";

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Explicit database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Name printed at the top of the dashboard.
    pub store_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FIDELIDADE_DB_PATH`: database file
    /// - `FIDELIDADE_STORE_NAME`: dashboard title
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = get(DB_PATH_ENV) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = get(STORE_NAME_ENV) {
            config.store_name = name.trim().to_string();
        }

        config
    }

    /// Applies the `--db` flag, if given.
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.database_path = path;
        }
        self
    }

    /// Returns the database file to open.
    ///
    /// Falls back to the platform data directory, creating it if needed:
    /// - **Linux**: `~/.local/share/fidelidade-pos/fidelidade.db`
    /// - **macOS**: `~/Library/Application Support/com.fidelidade.pos/fidelidade.db`
    /// - **Windows**: `%APPDATA%\fidelidade\pos\data\fidelidade.db`
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("com", "fidelidade", "pos").ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();

        std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir {
            path: data_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(data_dir.join(DATABASE_FILE))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the app data directory; pass --db or set FIDELIDADE_DB_PATH")]
    NoDataDir,

    #[error("Could not create data directory {}: {reason}", .path.display())]
    DataDir { path: PathBuf, reason: String },
}
