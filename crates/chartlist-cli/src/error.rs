//! CLI error types with exit code handling
//!
//! Maps core errors onto a small set of diagnostics, each with its own exit
//! code.

use chartlist_core::CoreError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Required configuration missing or invalid
    #[error("Configuration error: {message}")]
    #[diagnostic(code(chartlist::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Chart version could not be resolved
    #[error("Version error: {message}")]
    #[diagnostic(code(chartlist::cli::version))]
    Version {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Malformed chart descriptor
    #[error("Chart error: {message}")]
    #[diagnostic(code(chartlist::cli::chart))]
    Chart { message: String },

    /// IO error (charts directory, output file)
    #[error("IO error: {message}")]
    #[diagnostic(code(chartlist::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Version { .. } => exit_codes::VERSION_ERROR,
            CliError::Chart { .. } => exit_codes::CHART_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingConfig { name, hint } => {
                CliError::config_with_help(format!("{} is required", name), hint)
            }
            CoreError::Version { message } => CliError::Version {
                message,
                help: Some(
                    "set VERSION explicitly or run from a checkout where 'make get-version' works"
                        .to_string(),
                ),
            },
            err @ (CoreError::InvalidDescriptor { .. } | CoreError::Parse { .. }) => {
                CliError::Chart {
                    message: err.to_string(),
                }
            }
            err @ (CoreError::ChartsDirNotFound { .. }
            | CoreError::Read { .. }
            | CoreError::Write { .. }
            | CoreError::Walk(_)) => CliError::Io {
                message: err.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_registry_maps_to_config() {
        let err = CliError::from(CoreError::MissingConfig {
            name: "OCI_CHARTS_REGISTRY".to_string(),
            hint: "set it".to_string(),
        });
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
        insta::assert_snapshot!(
            err.to_string(),
            @"Configuration error: OCI_CHARTS_REGISTRY is required"
        );
    }

    #[test]
    fn test_version_error_exit_code() {
        let err = CliError::from(CoreError::version("'make get-version' printed an empty version"));
        assert_eq!(err.exit_code(), exit_codes::VERSION_ERROR);
        assert!(err.to_string().contains("empty version"));
    }

    #[test]
    fn test_descriptor_error_maps_to_chart() {
        let err = CliError::from(CoreError::InvalidDescriptor {
            path: PathBuf::from("charts/x/Chart.yaml"),
            message: "bad".to_string(),
        });
        assert_eq!(err.exit_code(), exit_codes::CHART_ERROR);
        assert!(err.to_string().contains("charts/x/Chart.yaml"));
    }

    #[test]
    fn test_missing_dir_maps_to_io() {
        let err = CliError::from(CoreError::ChartsDirNotFound {
            path: PathBuf::from("/repo/charts"),
        });
        assert_eq!(err.exit_code(), exit_codes::IO_ERROR);
    }
}
