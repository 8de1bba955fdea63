use carioca_core::COLLECTION;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

const DEFAULT_MESSAGE_TTL_MS: u64 = 2_000;
const DEFAULT_DATA_DIR: &str = "data";
const COLLECTION_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CariocaConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CariocaConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: CariocaConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Memory,
    #[default]
    Jsonl,
}

/// Where accepted hands are recorded.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            collection: default_collection(),
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.collection.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "store.collection".to_string(),
                message: "collection name must not be empty".to_string(),
            });
        }

        if !self.collection.chars().all(|c| COLLECTION_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: "store.collection".to_string(),
                message: "collection may only contain alphanumeric characters, '.', '_' or '-'"
                    .to_string(),
            });
        }

        if self.backend == StoreBackend::Jsonl && self.data_dir.components().count() == 0 {
            return Err(ValidationError::InvalidField {
                field: "store.data_dir".to_string(),
                message: "jsonl backend needs a data directory".to_string(),
            });
        }

        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_collection() -> String {
    COLLECTION.to_string()
}

/// Presentation policy for the interactive session.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_clear_on_valid")]
    pub clear_on_valid: bool,
    #[serde(default = "default_message_ttl_ms")]
    pub message_ttl_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clear_on_valid: default_clear_on_valid(),
            message_ttl_ms: default_message_ttl_ms(),
        }
    }
}

impl SessionConfig {
    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.message_ttl_ms)
    }
}

fn default_clear_on_valid() -> bool {
    true
}

fn default_message_ttl_ms() -> u64 {
    DEFAULT_MESSAGE_TTL_MS
}

/// Logging defaults to warnings on stderr, with an optional JSON log file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default)]
    pub json_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tracing_level: default_tracing_level(),
            json_file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
