//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Charts directory not found: {}", .path.display())]
    ChartsDirNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid chart descriptor {}: {message}", .path.display())]
    InvalidDescriptor { path: PathBuf, message: String },

    #[error("Missing required configuration: {name}")]
    MissingConfig { name: String, hint: String },

    #[error("Version resolution failed: {message}")]
    Version { message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list charts: {0}")]
    Walk(#[from] walkdir::Error),
}

impl CoreError {
    /// Create a version resolution error
    pub fn version(message: impl Into<String>) -> Self {
        Self::Version {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
