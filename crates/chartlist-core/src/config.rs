//! Collector configuration
//!
//! Both tools build their configuration once at startup and pass it into
//! the collectors. Nothing below this module reads the environment.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Name of the chart whose OCI reference is listed
pub const DEFAULT_CHART_NAME: &str = "pelagia-ceph";

/// Default image list file name, relative to the repository root
pub const DEFAULT_IMAGES_LIST: &str = "images.list";

/// Default chart list file name, relative to the repository root
pub const DEFAULT_CHARTS_LIST: &str = "charts.list";

/// Charts directory name, relative to the repository root
pub const CHARTS_DIR: &str = "charts";

/// Image collector configuration
#[derive(Debug, Clone)]
pub struct ImageListConfig {
    /// Directory holding one subdirectory per chart
    pub charts_dir: PathBuf,

    /// Where `images.list` is written
    pub output_file: PathBuf,

    /// Registry prefix, `None` when unset or blank
    pub registry: Option<String>,
}

impl ImageListConfig {
    /// Defaults for a repository checkout: `<root>/charts` and `<root>/images.list`
    pub fn for_repo(repo_root: &Path) -> Self {
        Self {
            charts_dir: repo_root.join(CHARTS_DIR),
            output_file: repo_root.join(DEFAULT_IMAGES_LIST),
            registry: None,
        }
    }

    /// Set the registry prefix; blank values clear it
    pub fn with_registry(mut self, registry: Option<&str>) -> Self {
        self.registry = non_blank(registry);
        self
    }
}

/// Chart reference collector configuration
#[derive(Debug, Clone)]
pub struct ChartListConfig {
    /// Directory holding one subdirectory per chart
    pub charts_dir: PathBuf,

    /// Where `charts.list` is written
    pub output_file: PathBuf,

    /// OCI registry the chart is published to (no `oci://` prefix)
    pub registry: String,

    /// Chart name to match against `Chart.yaml`
    pub chart_name: String,
}

impl ChartListConfig {
    /// Defaults for a repository checkout
    ///
    /// Fails before anything touches the filesystem when the registry is
    /// missing or blank.
    pub fn for_repo(repo_root: &Path, registry: Option<&str>) -> Result<Self> {
        let registry = non_blank(registry).ok_or_else(|| CoreError::MissingConfig {
            name: "OCI_CHARTS_REGISTRY".to_string(),
            hint: "set it to the chart registry, e.g. ghcr.io/owner/charts".to_string(),
        })?;

        Ok(Self {
            charts_dir: repo_root.join(CHARTS_DIR),
            output_file: repo_root.join(DEFAULT_CHARTS_LIST),
            registry,
            chart_name: DEFAULT_CHART_NAME.to_string(),
        })
    }
}

/// Trim a value, treating blank as unset
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
