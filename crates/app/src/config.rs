//! Runtime configuration.
//!
//! Backend selection is explicit: an unrecognized value is a startup error,
//! never a silent fallback to a different backend.

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use credline_directory::{DirectoryStore, InMemoryDirectory};

/// Environment variable naming the directory backend.
pub const DIRECTORY_BACKEND_VAR: &str = "CREDLINE_DIRECTORY_BACKEND";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown directory backend {0:?} (supported: \"memory\")")]
    UnknownDirectoryBackend(String),
}

/// Which [`DirectoryStore`] implementation to run against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectoryBackend {
    #[default]
    InMemory,
}

impl FromStr for DirectoryBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(DirectoryBackend::InMemory),
            other => Err(ConfigError::UnknownDirectoryBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub directory_backend: DirectoryBackend,
}

impl AppConfig {
    /// Read configuration from the environment. An absent variable means the
    /// default backend; a present but unrecognized one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let directory_backend = match std::env::var(DIRECTORY_BACKEND_VAR) {
            Ok(value) => value.parse()?,
            Err(_) => DirectoryBackend::default(),
        };
        Ok(Self { directory_backend })
    }

    pub fn build_directory(&self) -> Arc<dyn DirectoryStore> {
        match self.directory_backend {
            DirectoryBackend::InMemory => Arc::new(InMemoryDirectory::new()),
        }
    }
}
