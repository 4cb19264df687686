//! # Configuration
//!
//! Settings are resolved in three layers, later layers winning:
//! 1. Built-in defaults
//! 2. An optional TOML file (`--config`, or `maturity.toml` in the working
//!    directory when present)
//! 3. CLI flags
//!
//! ```toml
//! database = "maturity.db"
//! backend = "redb"        # memory | file | redb
//! store_key = "gapAnalysis"
//! host = "127.0.0.1"
//! port = 8080
//! ```

use maturity_core::primitives::DEFAULT_STORE_KEY;
use maturity_core::{DimensionRepository, MaturityError, StorageBackend};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "maturity.toml";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Path of the durable store (file or redb backend).
    pub database: PathBuf,
    /// Storage backend: "memory", "file" or "redb".
    pub backend: String,
    /// Key holding the gap analysis collection.
    pub store_key: String,
    /// Host the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server binds to.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("maturity.db"),
            backend: "redb".to_string(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Values given on the command line. `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub backend: Option<String>,
    pub store_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl AppConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, MaturityError> {
        toml::from_str(text).map_err(|e| MaturityError::ConfigError(e.to_string()))
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `maturity.toml` is used if
    /// present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, MaturityError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let metadata = std::fs::metadata(&path).map_err(|e| {
            MaturityError::ConfigError(format!("Cannot read config {:?}: {}", path, e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(MaturityError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            MaturityError::ConfigError(format!("Cannot read config {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&text)
            .map_err(|e| MaturityError::ConfigError(format!("{:?}: {}", path, e)))
    }

    /// Apply CLI overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if let Some(store_key) = overrides.store_key {
            self.store_key = store_key;
        }
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        self
    }

    /// Check values that cannot be caught by parsing.
    pub fn validate(&self) -> Result<(), MaturityError> {
        if !StorageBackend::NAMES.contains(&self.backend.as_str()) {
            return Err(MaturityError::ConfigError(format!(
                "Unknown backend: {}. Use: {}",
                self.backend,
                StorageBackend::NAMES.join(", ")
            )));
        }
        if self.store_key.trim().is_empty() {
            return Err(MaturityError::ConfigError(
                "store_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Open the configured backend and wrap it in a repository.
    pub fn open_repository(&self) -> Result<DimensionRepository<StorageBackend>, MaturityError> {
        self.validate()?;
        let backend = StorageBackend::open(&self.backend, &self.database)?;
        Ok(DimensionRepository::with_key(backend, self.store_key.clone()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
